use crate::create_statistics_struct;
use crate::statistics::log_statistic;
use crate::statistics::log_statistic_postfix;
use crate::statistics::Statistic;
use crate::statistics::StatisticLogger;

/// Structure responsible for storing several statistics of the solving process of the solver.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct SolverStatistics {
    /// Core statistics of the solver engine (e.g. the number of decisions)
    pub(crate) engine_statistics: EngineStatistics,
    /// The statistics related to explanations and learned nogoods
    pub(crate) learned_clause_statistics: LearnedClauseStatistics,
}

impl SolverStatistics {
    pub(crate) fn log(&self, statistic_logger: StatisticLogger, verbose: bool) {
        log_statistic("nodes", self.engine_statistics.num_decisions);
        log_statistic("failures", self.engine_statistics.num_conflicts);
        log_statistic("solutions", self.engine_statistics.num_solutions);
        log_statistic("peakDepth", self.engine_statistics.peak_depth);
        if verbose {
            log_statistic("propagations", self.engine_statistics.num_propagations);
            self.learned_clause_statistics.log(statistic_logger)
        }
        log_statistic_postfix();
    }
}

create_statistics_struct!(
    /// Core statistics of the solver engine (e.g. the number of decisions)
    EngineStatistics {
        /// The number of decisions taken by the solver
        num_decisions: u64,
        /// The number of contradictions met during search
        num_conflicts: u64,
        /// The number of solutions reported by the search
        num_solutions: u64,
        /// The number of times a constraint was propagated
        num_propagations: u64,
        /// The peak depth of the search tree
        peak_depth: u64,
});

create_statistics_struct!(
    /// The statistics related to explanations and learned nogoods
    LearnedClauseStatistics {
        /// The number of explanations which were requested
        num_explanations: u64,
        /// The number of nogoods added to the constraint set
        num_learned_clauses: u64,
        /// The number of learned nogoods consisting of a single predicate
        num_unit_nogoods_learned: u64,
        /// The number of literals dropped from conflicts by minimisation
        num_removed_literals: u64,
});

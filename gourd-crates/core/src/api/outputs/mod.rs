use crate::basic_types::Solution;
#[cfg(doc)]
use crate::termination::TerminationCondition;
#[cfg(doc)]
use crate::Solver;

/// The result of a call to [`Solver::solve_one`].
#[derive(Debug, Clone, PartialEq)]
pub enum SatisfactionResult {
    /// Indicates that a solution was found. The solver stays at the solution until the next call,
    /// which continues the search after it.
    Satisfiable(Solution),
    /// Indicates that there are no (further) solutions.
    Exhausted,
    /// Indicates that it is not known whether a solution exists. This is likely due to a
    /// [`TerminationCondition`] triggering; the search can be resumed.
    Unknown,
}

/// The result of a call to [`Solver::solve_all`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumerationResult {
    /// Every solution was reported.
    Complete { num_solutions: usize },
    /// A [`TerminationCondition`] stopped the enumeration; more solutions may exist.
    Incomplete { num_solutions: usize },
}

impl EnumerationResult {
    pub fn num_solutions(&self) -> usize {
        match self {
            EnumerationResult::Complete { num_solutions }
            | EnumerationResult::Incomplete { num_solutions } => *num_solutions,
        }
    }
}

/// The result of a call to [`Solver::optimise`].
#[derive(Debug, Clone, PartialEq)]
pub enum OptimisationResult {
    /// Indicates that an optimal solution has been found and proven to be optimal. It provides an
    /// instance of [`Solution`] which contains the optimal solution.
    Optimal(Solution),
    /// Indicates that a solution was found and provides an instance of [`Solution`] which contains
    /// best known solution by the solver.
    Satisfiable(Solution),
    /// Indicates that there is no solution to the problem.
    Infeasible,
    /// Indicates that it is not known whether a solution exists. This is likely due to a
    /// [`TerminationCondition`] triggering.
    Unknown,
}

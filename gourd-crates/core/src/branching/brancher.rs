use crate::basic_types::Solution;
#[cfg(doc)]
use crate::branching::value_selection::ValueSelector;
#[cfg(doc)]
use crate::branching::variable_selection::VariableSelector;
use crate::branching::SelectionContext;
use crate::engine::predicates::Predicate;
use crate::statistics::StatisticLogger;

/// A trait for definining a branching strategy (oftentimes utilising a [`VariableSelector`] and a
/// [`ValueSelector`]).
///
/// In general, implementations of this trait define how the search of the solver proceeds. It is
/// required that the returned decision does not hold yet, so that it shrinks the domain of at
/// least one variable. When a decision is undone, the search posts its negation instead.
///
/// If the [`Brancher`] (or any component thereof) is implemented incorrectly then the
/// behaviour of the solver is undefined.
pub trait Brancher {
    /// Returns the next decision concerning a single variable and value; it returns the
    /// [`Predicate`] corresponding to this decision (or [`None`] if all variables under
    /// consideration are instantiated).
    ///
    /// Variables which this brancher leaves open are decided by the solver in creation order.
    fn next_decision(&mut self, context: &mut SelectionContext) -> Option<Predicate>;

    /// Called after a contradiction has been met.
    fn on_conflict(&mut self) {}

    /// Called every time a decision is undone.
    fn on_backtrack(&mut self) {}

    /// Called whenever the search reports a solution.
    fn on_solution(&mut self, _solution: &Solution) {}

    /// Logs statistics of the brancher using the provided [`StatisticLogger`].
    fn log_statistics(&self, _statistic_logger: StatisticLogger) {}
}

impl<B: Brancher + ?Sized> Brancher for Box<B> {
    fn next_decision(&mut self, context: &mut SelectionContext) -> Option<Predicate> {
        (**self).next_decision(context)
    }

    fn on_conflict(&mut self) {
        (**self).on_conflict()
    }

    fn on_backtrack(&mut self) {
        (**self).on_backtrack()
    }

    fn on_solution(&mut self, solution: &Solution) {
        (**self).on_solution(solution)
    }

    fn log_statistics(&self, statistic_logger: StatisticLogger) {
        (**self).log_statistics(statistic_logger)
    }
}

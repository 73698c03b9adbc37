use crate::basic_types::Solution;
use crate::branching::SelectionContext;
use crate::engine::predicates::Predicate;
use crate::engine::variables::VarId;

/// A trait containing the interface for [`ValueSelector`]s, specifying the appropriate hooks into
/// the solver and the methods required for selecting a value for a given variable.
pub trait ValueSelector {
    /// Determines which value in the domain of `decision_variable` to branch next on.
    /// The `decision_variable` is not instantiated (as it otherwise should not have been
    /// selected). Returns a [`Predicate`] specifying the required change in the domain.
    fn select_value(&mut self, context: &mut SelectionContext, decision_variable: VarId)
        -> Predicate;

    /// This method is called when a solution is found.
    fn on_solution(&mut self, _solution: &Solution) {}
}

use crate::branching::SelectionContext;
use crate::engine::variables::VarId;

/// A trait containing the interface for [`VariableSelector`]s, specifying the appropriate hooks
/// into the solver and the methods required for selecting variables.
pub trait VariableSelector {
    /// Determines which variable to select next if there are any left to branch on.
    /// Should only return [`None`] when all variables which have been passed to the
    /// [`VariableSelector`] have been instantiated.
    fn select_variable(&mut self, context: &mut SelectionContext) -> Option<VarId>;

    /// Called every time a decision is undone.
    fn on_backtrack(&mut self) {}
}

use log::warn;

use crate::branching::variable_selection::VariableSelector;
use crate::branching::SelectionContext;
use crate::engine::variables::VarId;

/// Selects the first variable of the list which is not instantiated yet. A real variable counts
/// as instantiated once its interval is no wider than its precision.
///
/// This is the selector of [`crate::Solver::default_brancher`], over the variables in creation
/// order.
#[derive(Debug, Clone)]
pub struct InputOrder {
    variables: Vec<VarId>,
}

impl InputOrder {
    pub fn new(variables: &[VarId]) -> Self {
        if variables.is_empty() {
            warn!("InputOrder has no variables to select from");
        }
        InputOrder {
            variables: variables.to_vec(),
        }
    }
}

impl VariableSelector for InputOrder {
    fn select_variable(&mut self, context: &mut SelectionContext) -> Option<VarId> {
        self.variables
            .iter()
            .find(|&&variable| !context.is_instantiated(variable))
            .copied()
    }
}

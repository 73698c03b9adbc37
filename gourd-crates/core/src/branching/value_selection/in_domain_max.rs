use crate::branching::value_selection::ValueSelector;
use crate::branching::SelectionContext;
use crate::engine::predicates::Predicate;
use crate::engine::variables::VarId;
use crate::predicate;

/// [`ValueSelector`] which chooses the largest value: an integer variable is fixed to its upper
/// bound, a real variable is restricted to the upper half of its domain.
#[derive(Debug, Copy, Clone)]
pub struct InDomainMax;

impl ValueSelector for InDomainMax {
    fn select_value(
        &mut self,
        context: &mut SelectionContext,
        decision_variable: VarId,
    ) -> Predicate {
        let bounds = context.bounds(decision_variable);
        if context.kind(decision_variable).is_integer() {
            predicate![decision_variable == bounds.upper]
        } else {
            predicate![decision_variable >= bounds.midpoint()]
        }
    }
}

use crate::branching::value_selection::ValueSelector;
use crate::branching::SelectionContext;
use crate::engine::predicates::Predicate;
use crate::engine::variables::VarId;
use crate::predicate;

/// A [`ValueSelector`] which fixes an integer variable to a value chosen uniformly at random from
/// its domain, and restricts a real variable to a randomly chosen half of its domain.
///
/// The randomness comes from the seeded generator of the solver, so runs with the same seed make
/// the same choices.
#[derive(Debug, Copy, Clone)]
pub struct InDomainRandom;

impl ValueSelector for InDomainRandom {
    fn select_value(
        &mut self,
        context: &mut SelectionContext,
        decision_variable: VarId,
    ) -> Predicate {
        if !context.kind(decision_variable).is_integer() {
            let midpoint = context.bounds(decision_variable).midpoint();
            return if context.random().generate_bool(0.5) {
                predicate![decision_variable <= midpoint]
            } else {
                predicate![decision_variable >= midpoint]
            };
        }

        let values = context.integer_values(decision_variable);
        let index = context.random().generate_usize_in_range(0..values.len());
        predicate![decision_variable == values[index]]
    }
}

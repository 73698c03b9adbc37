use crate::branching::value_selection::ValueSelector;
use crate::branching::SelectionContext;
use crate::engine::predicates::Predicate;
use crate::engine::variables::VarId;
use crate::predicate;

/// [`ValueSelector`] which chooses the smallest value: an integer variable is fixed to its lower
/// bound, a real variable is restricted to the lower half of its domain.
#[derive(Debug, Copy, Clone)]
pub struct InDomainMin;

impl ValueSelector for InDomainMin {
    fn select_value(
        &mut self,
        context: &mut SelectionContext,
        decision_variable: VarId,
    ) -> Predicate {
        let bounds = context.bounds(decision_variable);
        if context.kind(decision_variable).is_integer() {
            predicate![decision_variable == bounds.lower]
        } else {
            predicate![decision_variable <= bounds.midpoint()]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basic_types::tests::TestRandom;
    use crate::engine::VariableOrigin;

    #[test]
    fn integer_variables_are_fixed_to_the_lower_bound() {
        let store = SelectionContext::create_for_testing(&[(3, 10)]);
        let mut test_rng = TestRandom::default();
        let mut context = SelectionContext::new(&store, &mut test_rng);
        let variable = context.model_variables().next().expect("one variable");

        let selected = InDomainMin.select_value(&mut context, variable);

        assert_eq!(selected, predicate![variable == 3]);
    }

    #[test]
    fn real_variables_take_the_lower_half() {
        let mut store = SelectionContext::create_for_testing(&[]);
        let variable = store.grow_real(0.0, 10.0, 0.01).expect("valid domain");
        assert_eq!(store.origin(variable), VariableOrigin::Model);
        let mut test_rng = TestRandom::default();
        let mut context = SelectionContext::new(&store, &mut test_rng);

        let selected = InDomainMin.select_value(&mut context, variable);

        assert_eq!(selected, predicate![variable <= 5.0]);
    }
}

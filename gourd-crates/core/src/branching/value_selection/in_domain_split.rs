use crate::branching::value_selection::ValueSelector;
use crate::branching::SelectionContext;
use crate::engine::predicates::Predicate;
use crate::engine::variables::VarId;
use crate::gourd_assert_advanced;
use crate::predicate;

/// A [`ValueSelector`] which splits the domain in half (based on the lower-bound and upper-bound,
/// disregarding holes) and removes the upper-half from the domain.
///
/// Note that this strategy will not necessarily result in an equal split if there are holes in the
/// domain.
#[derive(Debug, Copy, Clone)]
pub struct InDomainSplit;

impl ValueSelector for InDomainSplit {
    fn select_value(
        &mut self,
        context: &mut SelectionContext,
        decision_variable: VarId,
    ) -> Predicate {
        let bounds = context.bounds(decision_variable);
        if !context.kind(decision_variable).is_integer() {
            return predicate![decision_variable <= bounds.midpoint()];
        }

        // The domain has at least 2 values, otherwise the variable would not have been selected
        let bound = bounds.lower + ((bounds.upper - bounds.lower) / 2.0).floor();
        gourd_assert_advanced!(
            bound >= bounds.lower && bound < bounds.upper,
            "It should hold that {} <= {bound} < {}",
            bounds.lower,
            bounds.upper
        );
        predicate![decision_variable <= bound]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basic_types::tests::TestRandom;

    #[test]
    fn test_returns_correct_literal() {
        let store = SelectionContext::create_for_testing(&[(0, 10)]);
        let mut test_rng = TestRandom::default();
        let mut context = SelectionContext::new(&store, &mut test_rng);
        let variable = context.model_variables().next().expect("one variable");

        let selected = InDomainSplit.select_value(&mut context, variable);

        assert_eq!(selected, predicate![variable <= 5]);
    }

    #[test]
    fn two_values_are_split_into_one_each() {
        let store = SelectionContext::create_for_testing(&[(4, 5)]);
        let mut test_rng = TestRandom::default();
        let mut context = SelectionContext::new(&store, &mut test_rng);
        let variable = context.model_variables().next().expect("one variable");

        let selected = InDomainSplit.select_value(&mut context, variable);

        assert_eq!(selected, predicate![variable <= 4]);
    }
}

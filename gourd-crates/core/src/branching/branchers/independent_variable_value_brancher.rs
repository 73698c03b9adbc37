use crate::basic_types::Solution;
use crate::branching::value_selection::InDomainMin;
use crate::branching::value_selection::ValueSelector;
use crate::branching::variable_selection::InputOrder;
use crate::branching::variable_selection::VariableSelector;
use crate::branching::Brancher;
use crate::branching::SelectionContext;
use crate::engine::predicates::Predicate;

/// An implementation of a [`Brancher`] which simply uses a single
/// [`VariableSelector`] and a single [`ValueSelector`] independently of one another.
#[derive(Debug, Clone)]
pub struct IndependentVariableValueBrancher<VariableSelect, ValueSelect> {
    /// The [`VariableSelector`] of the [`Brancher`], determines which (unfixed) variable to branch
    /// next on.
    variable_selector: VariableSelect,
    /// The [`ValueSelector`] of the [`Brancher`] determines which value in the domain to branch
    /// next on given a variable.
    value_selector: ValueSelect,
}

/// The brancher returned by [`crate::Solver::default_brancher`].
pub type DefaultBrancher = IndependentVariableValueBrancher<InputOrder, InDomainMin>;

impl<VariableSelect, ValueSelect> IndependentVariableValueBrancher<VariableSelect, ValueSelect>
where
    VariableSelect: VariableSelector,
    ValueSelect: ValueSelector,
{
    pub fn new(variable_selector: VariableSelect, value_selector: ValueSelect) -> Self {
        IndependentVariableValueBrancher {
            variable_selector,
            value_selector,
        }
    }
}

impl<VariableSelect, ValueSelect> Brancher
    for IndependentVariableValueBrancher<VariableSelect, ValueSelect>
where
    VariableSelect: VariableSelector,
    ValueSelect: ValueSelector,
{
    /// First we select a variable
    ///  - If all variables under consideration are instantiated (i.e. `select_variable` returns
    ///    None) then we simply return None
    ///  - Otherwise we select a value and return the corresponding predicate
    fn next_decision(&mut self, context: &mut SelectionContext) -> Option<Predicate> {
        self.variable_selector
            .select_variable(context)
            .map(|selected_variable| {
                self.value_selector
                    .select_value(context, selected_variable)
            })
    }

    fn on_backtrack(&mut self) {
        self.variable_selector.on_backtrack()
    }

    fn on_solution(&mut self, solution: &Solution) {
        self.value_selector.on_solution(solution);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basic_types::tests::TestRandom;
    use crate::branching::value_selection::InDomainMax;
    use crate::predicate;

    #[test]
    fn decisions_follow_the_selectors() {
        let mut store = SelectionContext::create_for_testing(&[(0, 3), (2, 6)]);
        let variables = store.variables().collect::<Vec<_>>();
        let mut brancher =
            IndependentVariableValueBrancher::new(InputOrder::new(&variables), InDomainMax);
        let mut test_rng = TestRandom::default();

        {
            let mut context = SelectionContext::new(&store, &mut test_rng);
            assert_eq!(
                brancher.next_decision(&mut context),
                Some(predicate![variables[0] == 3])
            );
        }

        let _ = store
            .post(predicate![variables[0] == 3])
            .expect("non-empty domain");
        let _ = store
            .post(predicate![variables[1] == 2])
            .expect("non-empty domain");

        let mut context = SelectionContext::new(&store, &mut test_rng);
        assert_eq!(brancher.next_decision(&mut context), None);
    }
}

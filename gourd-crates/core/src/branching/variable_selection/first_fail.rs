use log::warn;

use crate::branching::variable_selection::VariableSelector;
use crate::branching::SelectionContext;
use crate::engine::variables::VarId;

/// A [`VariableSelector`] which selects the variable with the smallest domain, based on the number
/// of values left (or, for real variables, the number of `epsilon`-wide slices).
///
/// Ties are broken by the order of the provided list.
#[derive(Debug, Clone)]
pub struct FirstFail {
    variables: Vec<VarId>,
}

impl FirstFail {
    pub fn new(variables: &[VarId]) -> Self {
        if variables.is_empty() {
            warn!("The FirstFail variable selector was not provided with any variables");
        }
        FirstFail {
            variables: variables.to_vec(),
        }
    }
}

impl VariableSelector for FirstFail {
    fn select_variable(&mut self, context: &mut SelectionContext) -> Option<VarId> {
        let mut selected: Option<(VarId, u64)> = None;

        for &variable in &self.variables {
            if context.is_instantiated(variable) {
                continue;
            }
            let size = context.domain_size(variable);
            let is_smaller = match selected {
                Some((_, smallest)) => size < smallest,
                None => true,
            };
            if is_smaller {
                selected = Some((variable, size));
            }
        }

        selected.map(|(variable, _)| variable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basic_types::tests::TestRandom;
    use crate::predicate;

    #[test]
    fn smallest_domain_is_selected() {
        let store = SelectionContext::create_for_testing(&[(0, 10), (5, 7), (0, 2)]);
        let mut test_rng = TestRandom::default();
        let variables = store.variables().collect::<Vec<_>>();
        let mut strategy = FirstFail::new(&variables);

        let mut context = SelectionContext::new(&store, &mut test_rng);

        // both have three values left; the first one in the list wins
        assert_eq!(strategy.select_variable(&mut context), Some(variables[1]));
    }

    #[test]
    fn holes_count_towards_the_domain_size() {
        let mut store = SelectionContext::create_for_testing(&[(0, 3), (0, 4)]);
        let mut test_rng = TestRandom::default();
        let variables = store.variables().collect::<Vec<_>>();
        let _ = store
            .post(predicate![variables[1] != 2])
            .expect("non-empty domain");
        let _ = store
            .post(predicate![variables[1] != 3])
            .expect("non-empty domain");
        let mut strategy = FirstFail::new(&variables);

        let mut context = SelectionContext::new(&store, &mut test_rng);

        assert_eq!(strategy.select_variable(&mut context), Some(variables[1]));
    }
}

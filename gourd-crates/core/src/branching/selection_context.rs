use crate::basic_types::Interval;
use crate::basic_types::Random;
#[cfg(doc)]
use crate::branching::Brancher;
use crate::engine::variables::VarId;
use crate::engine::variables::VariableKind;
use crate::engine::VariableOrigin;
use crate::engine::VariableStore;

/// The read-only view of the domains given to a [`Brancher`], together with the random
/// generator of the solver.
#[derive(Debug)]
pub struct SelectionContext<'a> {
    store: &'a VariableStore,
    random_generator: &'a mut dyn Random,
}

impl<'a> SelectionContext<'a> {
    pub(crate) fn new(store: &'a VariableStore, random_generator: &'a mut dyn Random) -> Self {
        SelectionContext {
            store,
            random_generator,
        }
    }

    /// Returns a random generator which can be used to generate random values (see [`Random`] for
    /// more information).
    pub fn random(&mut self) -> &mut dyn Random {
        self.random_generator
    }

    pub fn is_instantiated(&self, variable: VarId) -> bool {
        self.store.is_instantiated(variable)
    }

    pub fn kind(&self, variable: VarId) -> VariableKind {
        self.store.kind(variable)
    }

    pub fn bounds(&self, variable: VarId) -> Interval {
        self.store.bounds(variable)
    }

    pub fn lower_bound(&self, variable: VarId) -> f64 {
        self.store.bounds(variable).lower
    }

    pub fn upper_bound(&self, variable: VarId) -> f64 {
        self.store.bounds(variable).upper
    }

    /// The number of values left in the domain of an integer variable. For a real variable this
    /// is the number of `epsilon`-wide slices its domain spans.
    pub fn domain_size(&self, variable: VarId) -> u64 {
        self.store.domain_size(variable)
    }

    /// Whether the integer variable can take `value`. Always false for a real variable.
    pub fn contains(&self, variable: VarId, value: i32) -> bool {
        self.store
            .integer_domain(variable)
            .is_some_and(|domain| domain.contains(value))
    }

    /// The values left in the domain of an integer variable, in increasing order.
    pub fn integer_values(&self, variable: VarId) -> Vec<i32> {
        self.store
            .integer_domain(variable)
            .map(|domain| domain.iter().collect())
            .unwrap_or_default()
    }

    /// All variables created by the client, in creation order.
    pub fn model_variables(&self) -> impl Iterator<Item = VarId> + '_ {
        self.store
            .variables()
            .filter(|&variable| self.store.origin(variable) == VariableOrigin::Model)
    }

    /// All variables, including the truth variables of constraints, in creation order.
    pub fn all_variables(&self) -> impl Iterator<Item = VarId> + '_ {
        self.store.variables()
    }

    #[cfg(test)]
    pub(crate) fn create_for_testing(domains: &[(i32, i32)]) -> VariableStore {
        use crate::engine::variables::DomainSpec;

        let mut store = VariableStore::default();
        for &(lower, upper) in domains {
            let _ = store
                .grow_integer(&DomainSpec::interval(lower, upper), VariableOrigin::Model)
                .expect("valid domain");
        }
        store
    }
}

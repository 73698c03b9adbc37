use std::collections::VecDeque;

use log::debug;

use crate::basic_types::Contradiction;
use crate::containers::KeyedVec;
use crate::engine::solver_statistics::EngineStatistics;
use crate::engine::variables::VarId;
use crate::engine::ConstraintId;
use crate::engine::ConstraintSet;
use crate::engine::VariableStore;
use crate::gourd_assert_moderate;
use crate::propagators;

/// FIFO queue of variables whose domain changed, each variable present at most once.
#[derive(Debug, Clone, Default)]
struct VariableQueue {
    queue: VecDeque<VarId>,
    is_enqueued: KeyedVec<VarId, bool>,
}

impl VariableQueue {
    fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    fn enqueue(&mut self, variable: VarId) {
        self.is_enqueued.accomodate(variable, false);
        if !self.is_enqueued[variable] {
            self.is_enqueued[variable] = true;
            self.queue.push_back(variable);
        }
    }

    fn pop(&mut self) -> Option<VarId> {
        let variable = self.queue.pop_front()?;
        self.is_enqueued[variable] = false;
        Some(variable)
    }

    fn clear(&mut self) {
        for variable in self.queue.drain(..) {
            self.is_enqueued[variable] = false;
        }
    }
}

/// Runs constraints until no domain changes any more.
///
/// Constraints are woken up through the variables they watch. Constraints which were just added,
/// or whose effects were undone without any of their variables changing, are scheduled directly
/// and run before any variable is processed.
#[derive(Debug, Clone, Default)]
pub(crate) struct PropagationEngine {
    variable_queue: VariableQueue,
    pending: VecDeque<ConstraintId>,
}

impl PropagationEngine {
    pub(crate) fn enqueue_constraint(&mut self, constraint: ConstraintId) {
        if !self.pending.contains(&constraint) {
            self.pending.push_back(constraint);
        }
    }

    /// Forgets the queued variables, e.g. after the domains they changed were restored.
    /// Scheduled constraints are kept.
    pub(crate) fn clear_variable_queue(&mut self) {
        self.variable_queue.clear();
    }

    pub(crate) fn is_at_fixed_point(&self) -> bool {
        self.variable_queue.is_empty() && self.pending.is_empty()
    }

    pub(crate) fn propagate(
        &mut self,
        store: &mut VariableStore,
        constraints: &ConstraintSet,
        statistics: &mut EngineStatistics,
    ) -> Result<(), Contradiction> {
        self.collect_modified(store);

        loop {
            if let Some(constraint) = self.pending.pop_front() {
                self.run(constraint, store, constraints, statistics)?;
                continue;
            }

            let Some(variable) = self.variable_queue.pop() else {
                break;
            };
            for &constraint in constraints.watchers(variable) {
                self.run(constraint, store, constraints, statistics)?;
            }
        }

        gourd_assert_moderate!(self.is_at_fixed_point());
        Ok(())
    }

    fn run(
        &mut self,
        constraint: ConstraintId,
        store: &mut VariableStore,
        constraints: &ConstraintSet,
        statistics: &mut EngineStatistics,
    ) -> Result<(), Contradiction> {
        statistics.num_propagations += 1;

        match propagators::propagate(&constraints[constraint], store) {
            Ok(()) => {
                self.collect_modified(store);
                Ok(())
            }
            Err(inconsistency) => {
                debug!("{constraint} failed: {inconsistency:?}");
                self.variable_queue.clear();
                self.pending.clear();
                store.clear_modified();
                Err(Contradiction::in_constraint(constraint, inconsistency))
            }
        }
    }

    fn collect_modified(&mut self, store: &mut VariableStore) {
        for variable in store.drain_modified() {
            self.variable_queue.enqueue(variable);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basic_types::Interval;
    use crate::constraints::sum;
    use crate::constraints::Expression;
    use crate::constraints::Relation;
    use crate::engine::variables::DomainSpec;
    use crate::engine::ConstraintNode;
    use crate::engine::VariableOrigin;
    use crate::propagators::Comparison;

    fn add_comparison(
        store: &mut VariableStore,
        constraints: &mut ConstraintSet,
        relation: Relation,
        lhs: Expression,
        rhs: Expression,
    ) -> ConstraintId {
        let truth = store
            .grow_integer(&DomainSpec::boolean(), VariableOrigin::Reification)
            .expect("valid domain");
        let comparison = Comparison::new(relation, lhs, rhs, store);
        let id = constraints.add(ConstraintNode::Compare { comparison, truth });
        constraints.mark_posted(id);
        id
    }

    #[test]
    fn chains_of_comparisons_reach_a_fixed_point() {
        let mut store = VariableStore::default();
        let mut constraints = ConstraintSet::default();
        let mut engine = PropagationEngine::default();
        let mut statistics = EngineStatistics::default();

        let x = store
            .grow_integer(&DomainSpec::interval(0, 10), VariableOrigin::Model)
            .expect("valid domain");
        let y = store
            .grow_integer(&DomainSpec::interval(0, 10), VariableOrigin::Model)
            .expect("valid domain");
        let z = store
            .grow_integer(&DomainSpec::interval(0, 10), VariableOrigin::Model)
            .expect("valid domain");

        let first = add_comparison(
            &mut store,
            &mut constraints,
            Relation::LessThan,
            x.into(),
            y.into(),
        );
        let second = add_comparison(
            &mut store,
            &mut constraints,
            Relation::LessThan,
            y.into(),
            z.into(),
        );
        engine.enqueue_constraint(first);
        engine.enqueue_constraint(second);

        engine
            .propagate(&mut store, &constraints, &mut statistics)
            .expect("consistent");

        assert_eq!(store.bounds(x), Interval::new(0.0, 8.0));
        assert_eq!(store.bounds(y), Interval::new(1.0, 9.0));
        assert_eq!(store.bounds(z), Interval::new(2.0, 10.0));
        assert!(engine.is_at_fixed_point());
    }

    #[test]
    fn propagating_at_the_fixed_point_changes_nothing() {
        let mut store = VariableStore::default();
        let mut constraints = ConstraintSet::default();
        let mut engine = PropagationEngine::default();
        let mut statistics = EngineStatistics::default();

        let x = store
            .grow_integer(&DomainSpec::interval(0, 10), VariableOrigin::Model)
            .expect("valid domain");
        let id = add_comparison(
            &mut store,
            &mut constraints,
            Relation::LessThanOrEqual,
            x.into(),
            Expression::Constant(4.0),
        );
        engine.enqueue_constraint(id);
        engine
            .propagate(&mut store, &constraints, &mut statistics)
            .expect("consistent");
        let num_entries = store.num_trail_entries();

        engine
            .propagate(&mut store, &constraints, &mut statistics)
            .expect("consistent");

        assert_eq!(store.num_trail_entries(), num_entries);
    }

    #[test]
    fn failure_reports_the_constraint() {
        let mut store = VariableStore::default();
        let mut constraints = ConstraintSet::default();
        let mut engine = PropagationEngine::default();
        let mut statistics = EngineStatistics::default();

        let x = store
            .grow_integer(&DomainSpec::interval(0, 3), VariableOrigin::Model)
            .expect("valid domain");
        let y = store
            .grow_integer(&DomainSpec::interval(0, 3), VariableOrigin::Model)
            .expect("valid domain");
        let id = add_comparison(
            &mut store,
            &mut constraints,
            Relation::Equal,
            sum(x, y),
            Expression::Constant(9.0),
        );
        engine.enqueue_constraint(id);

        let contradiction = engine
            .propagate(&mut store, &constraints, &mut statistics)
            .expect_err("inconsistent");

        assert_eq!(contradiction.constraint, Some(id));
        assert!(engine.is_at_fixed_point());
    }
}

//! Turning a recorded contradiction into a small [`ConflictClause`].
//!
//! The predicates which were forced when the contradiction happened are replayed on a copy of
//! the state, from the root. Predicates are then dropped one at a time, keeping each removal
//! after which the replay still fails. The result is minimal: dropping any single remaining
//! predicate makes the contradiction disappear.
//!
//! A conflict which does not fail on replay is handed back as it was recorded, marked as
//! unverified; such a clause is never learned.
use log::debug;

use crate::basic_types::ConflictClause;
use crate::basic_types::Contradiction;
use crate::engine::predicates::Predicate;
use crate::engine::State;

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Explanation {
    /// Forcing every predicate of the clause and propagating fails.
    Verified(ConflictClause),
    /// The recorded predicates did not fail on replay.
    Unverified(ConflictClause),
}

impl Explanation {
    pub(crate) fn is_verified(&self) -> bool {
        matches!(self, Explanation::Verified(_))
    }

    pub(crate) fn into_clause(self) -> ConflictClause {
        match self {
            Explanation::Verified(clause) | Explanation::Unverified(clause) => clause,
        }
    }
}

pub(crate) fn explain(
    state: &State,
    literals: &[Predicate],
    contradiction: Contradiction,
) -> Explanation {
    let mut scratch = state.clone();
    scratch.restore_to(0);

    if let Err(root_contradiction) = scratch.propagate_to_fixed_point() {
        return Explanation::Verified(ConflictClause::new(
            vec![],
            root_contradiction.constraint,
            root_contradiction.variable,
        ));
    }

    let Some(mut detected) = replay_fails(&mut scratch, literals) else {
        debug!("conflict over {} predicates could not be replayed", literals.len());
        return Explanation::Unverified(ConflictClause::new(
            literals.to_vec(),
            contradiction.constraint,
            contradiction.variable,
        ));
    };

    let mut kept = literals.to_vec();
    let mut index = 0;
    while index < kept.len() {
        let candidate = kept
            .iter()
            .enumerate()
            .filter(|&(other, _)| other != index)
            .map(|(_, &predicate)| predicate)
            .collect::<Vec<_>>();

        match replay_fails(&mut scratch, &candidate) {
            Some(contradiction) => {
                kept = candidate;
                detected = contradiction;
            }
            None => index += 1,
        }
    }

    debug!(
        "explanation reduced from {} to {} predicates",
        literals.len(),
        kept.len()
    );
    Explanation::Verified(ConflictClause::new(
        kept,
        detected.constraint,
        detected.variable,
    ))
}

/// Forces every predicate above the root and propagates; returns the contradiction, if any. The
/// state is back at the root afterwards.
fn replay_fails(state: &mut State, literals: &[Predicate]) -> Option<Contradiction> {
    state.new_checkpoint();
    let result = literals
        .iter()
        .try_for_each(|&predicate| state.post_predicate(predicate))
        .and_then(|()| state.propagate_to_fixed_point());
    state.restore_to(0);
    result.err()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraints;
    use crate::engine::variables::DomainSpec;
    use crate::engine::variables::VarId;
    use crate::predicate;

    fn integer(state: &mut State, lower: i32, upper: i32) -> VarId {
        state
            .new_integer(&DomainSpec::interval(lower, upper), None)
            .expect("valid domain")
    }

    fn post(state: &mut State, constraint: constraints::Constraint) {
        let (id, _) = state.add_constraint(constraint).expect("valid constraint");
        state.post_constraint(id).expect("feasible");
    }

    #[test]
    fn irrelevant_predicates_are_dropped() {
        let mut state = State::default();
        let a = integer(&mut state, 0, 2);
        let b = integer(&mut state, 0, 2);
        let c = integer(&mut state, 0, 2);
        post(&mut state, constraints::not_equals(a, b));
        state.propagate_to_fixed_point().expect("consistent");

        let literals = [predicate![c == 2], predicate![a == 1], predicate![b == 1]];
        let explanation = explain(
            &state,
            &literals,
            Contradiction {
                constraint: None,
                variable: None,
            },
        );

        assert!(explanation.is_verified());
        let clause = explanation.into_clause();
        assert_eq!(clause.literals(), &[predicate![a == 1], predicate![b == 1]]);
        assert!(clause.constraint().is_some());
    }

    #[test]
    fn the_explaining_state_is_left_untouched() {
        let mut state = State::default();
        let a = integer(&mut state, 0, 2);
        post(&mut state, constraints::less_than(a, 1));
        state.propagate_to_fixed_point().expect("consistent");
        state.new_checkpoint();
        state
            .post_predicate(predicate![a == 0])
            .expect("non-empty domain");

        let _ = explain(
            &state,
            &[predicate![a >= 1]],
            Contradiction {
                constraint: None,
                variable: Some(a),
            },
        );

        assert_eq!(state.decision_level(), 1);
        assert_eq!(state.variables.boolean_value(a), Some(false));
    }

    #[test]
    fn infeasible_models_are_explained_by_the_empty_clause() {
        let mut state = State::default();
        let a = integer(&mut state, 0, 2);
        post(&mut state, constraints::greater_than(a, 5));

        let explanation = explain(
            &state,
            &[predicate![a == 1]],
            Contradiction {
                constraint: None,
                variable: Some(a),
            },
        );

        assert!(explanation.is_verified());
        assert!(explanation.into_clause().is_empty());
    }

    #[test]
    fn consistent_predicates_are_reported_as_recorded() {
        let mut state = State::default();
        let a = integer(&mut state, 0, 2);
        let b = integer(&mut state, 0, 2);
        post(&mut state, constraints::not_equals(a, b));
        state.propagate_to_fixed_point().expect("consistent");

        let literals = [predicate![a == 0], predicate![b == 1]];
        let explanation = explain(
            &state,
            &literals,
            Contradiction {
                constraint: None,
                variable: Some(b),
            },
        );

        assert!(!explanation.is_verified());
        let clause = explanation.into_clause();
        assert_eq!(clause.literals(), &literals);
        assert_eq!(clause.variable(), Some(b));
    }
}

//! One propagation function per kind of [`ConstraintNode`].
pub(crate) mod arithmetic;
mod boolean;
mod comparison;
mod nogood;

pub(crate) use comparison::Comparison;

use crate::basic_types::PropagationStatus;
use crate::engine::ConstraintNode;
use crate::engine::StoredConstraint;
use crate::engine::VariableStore;

/// Narrows the domains of the variables of `constraint`.
///
/// A propagator never makes a domain empty; it reports the inconsistency instead.
pub(crate) fn propagate(constraint: &StoredConstraint, store: &mut VariableStore) -> PropagationStatus {
    let posted = constraint.posted;
    match &constraint.node {
        ConstraintNode::Compare { comparison, truth } => {
            comparison::propagate_comparison(comparison, *truth, posted, store)
        }
        ConstraintNode::And { operands, truth } => {
            boolean::propagate_conjunction(operands, *truth, posted, store)
        }
        ConstraintNode::Or { operands, truth } => {
            boolean::propagate_disjunction(operands, *truth, posted, store)
        }
        ConstraintNode::Not { operand, truth } => {
            boolean::propagate_negation(*operand, *truth, posted, store)
        }
        ConstraintNode::Implies {
            antecedent,
            consequent,
            truth,
        } => boolean::propagate_implication(*antecedent, *consequent, *truth, posted, store),
        ConstraintNode::Iff { left, right, truth } => {
            boolean::propagate_equivalence(*left, *right, *truth, posted, store)
        }
        ConstraintNode::Literal { truth } => boolean::propagate_literal(*truth, posted, store),
        ConstraintNode::Nogood { predicates } => nogood::propagate_nogood(predicates, store),
    }
}

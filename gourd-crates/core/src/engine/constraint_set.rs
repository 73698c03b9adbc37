use std::fmt::Display;
use std::fmt::Formatter;

use crate::containers::KeyedVec;
use crate::containers::StorageKey;
use crate::engine::predicates::Predicate;
use crate::engine::variables::VarId;
use crate::propagators::Comparison;

/// A handle to a constraint stored in a [`crate::Solver`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConstraintId(u32);

impl StorageKey for ConstraintId {
    fn index(&self) -> usize {
        self.0 as usize
    }

    fn create_from_index(index: usize) -> Self {
        ConstraintId(index as u32)
    }
}

impl Display for ConstraintId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "c{}", self.0)
    }
}

/// A flattened constraint. Every node except a nogood owns a 0/1 truth variable which is 1
/// exactly when the node holds; operands of boolean nodes are the truth variables of their
/// children.
#[derive(Clone, Debug)]
pub(crate) enum ConstraintNode {
    Compare {
        comparison: Comparison,
        truth: VarId,
    },
    And {
        operands: Vec<VarId>,
        truth: VarId,
    },
    Or {
        operands: Vec<VarId>,
        truth: VarId,
    },
    Not {
        operand: VarId,
        truth: VarId,
    },
    Implies {
        antecedent: VarId,
        consequent: VarId,
        truth: VarId,
    },
    Iff {
        left: VarId,
        right: VarId,
        truth: VarId,
    },
    /// A client-provided 0/1 variable added as a constraint on its own.
    Literal {
        truth: VarId,
    },
    /// A learned clause: the predicates may not all hold at the same time.
    Nogood {
        predicates: Vec<Predicate>,
    },
}

impl ConstraintNode {
    pub(crate) fn truth(&self) -> Option<VarId> {
        match self {
            ConstraintNode::Compare { truth, .. }
            | ConstraintNode::And { truth, .. }
            | ConstraintNode::Or { truth, .. }
            | ConstraintNode::Not { truth, .. }
            | ConstraintNode::Implies { truth, .. }
            | ConstraintNode::Iff { truth, .. }
            | ConstraintNode::Literal { truth } => Some(*truth),
            ConstraintNode::Nogood { .. } => None,
        }
    }

    /// The variables whose changes should wake up this node.
    pub(crate) fn watched_variables(&self) -> Vec<VarId> {
        let mut variables = match self {
            ConstraintNode::Compare { comparison, .. } => {
                let mut variables = comparison.lhs.variables();
                for variable in comparison.rhs.variables() {
                    if !variables.contains(&variable) {
                        variables.push(variable);
                    }
                }
                variables
            }
            ConstraintNode::And { operands, .. } | ConstraintNode::Or { operands, .. } => {
                operands.clone()
            }
            ConstraintNode::Not { operand, .. } => vec![*operand],
            ConstraintNode::Implies {
                antecedent,
                consequent,
                ..
            } => vec![*antecedent, *consequent],
            ConstraintNode::Iff { left, right, .. } => vec![*left, *right],
            ConstraintNode::Literal { .. } => vec![],
            ConstraintNode::Nogood { predicates } => {
                let mut variables = Vec::new();
                for predicate in predicates {
                    if !variables.contains(&predicate.variable()) {
                        variables.push(predicate.variable());
                    }
                }
                variables
            }
        };

        if let Some(truth) = self.truth() {
            if !variables.contains(&truth) {
                variables.push(truth);
            }
        }
        variables
    }
}

#[derive(Clone, Debug)]
pub(crate) struct StoredConstraint {
    pub(crate) node: ConstraintNode,
    /// Posted constraints must hold; this is never undone by backtracking.
    pub(crate) posted: bool,
}

/// Owns every constraint and the watch lists mapping variables to the constraints mentioning
/// them.
#[derive(Clone, Debug, Default)]
pub(crate) struct ConstraintSet {
    constraints: KeyedVec<ConstraintId, StoredConstraint>,
    watch_lists: KeyedVec<VarId, Vec<ConstraintId>>,
}

impl ConstraintSet {
    pub(crate) fn add(&mut self, node: ConstraintNode) -> ConstraintId {
        let watched = node.watched_variables();
        let id = self.constraints.push(StoredConstraint {
            node,
            posted: false,
        });

        for variable in watched {
            self.watch_lists.accomodate(variable, Vec::new());
            self.watch_lists[variable].push(id);
        }
        id
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.constraints.len()
    }

    pub(crate) fn mark_posted(&mut self, id: ConstraintId) {
        self.constraints[id].posted = true;
    }

    pub(crate) fn watchers(&self, variable: VarId) -> &[ConstraintId] {
        self.watch_lists
            .get(variable)
            .map(|watchers| watchers.as_slice())
            .unwrap_or(&[])
    }
}

impl std::ops::Index<ConstraintId> for ConstraintSet {
    type Output = StoredConstraint;

    fn index(&self, index: ConstraintId) -> &Self::Output {
        &self.constraints[index]
    }
}

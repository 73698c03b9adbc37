use std::fmt::Display;
use std::fmt::Formatter;

use itertools::Itertools;

use crate::engine::predicates::Predicate;
use crate::engine::variables::VarId;
use crate::engine::ConstraintId;

/// A set of predicates which cannot hold together with the constraints of the model.
///
/// Produced by [`crate::Solver::get_explanation`]. Forcing all literals at the root and
/// propagating reproduces the contradiction reported by [`ConflictClause::constraint`] and
/// [`ConflictClause::variable`]. An empty clause means the model itself is infeasible.
#[derive(Clone, Debug, PartialEq)]
pub struct ConflictClause {
    literals: Vec<Predicate>,
    constraint: Option<ConstraintId>,
    variable: Option<VarId>,
}

impl ConflictClause {
    pub(crate) fn new(
        literals: Vec<Predicate>,
        constraint: Option<ConstraintId>,
        variable: Option<VarId>,
    ) -> Self {
        ConflictClause {
            literals,
            constraint,
            variable,
        }
    }

    pub fn literals(&self) -> &[Predicate] {
        &self.literals
    }

    /// The constraint which detected the contradiction, if the contradiction was not caused by
    /// the literals directly.
    pub fn constraint(&self) -> Option<ConstraintId> {
        self.constraint
    }

    /// The variable whose domain became empty, if any.
    pub fn variable(&self) -> Option<VarId> {
        self.variable
    }

    pub fn len(&self) -> usize {
        self.literals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }
}

impl Display for ConflictClause {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.literals.is_empty() {
            write!(f, "false")
        } else {
            write!(f, "{}", self.literals.iter().join(" & "))
        }
    }
}

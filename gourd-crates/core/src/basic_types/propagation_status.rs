use thiserror::Error;

use crate::engine::variables::VarId;
use crate::engine::ConstraintId;

/// The result of a propagator invocation.
pub(crate) type PropagationStatus = Result<(), Inconsistency>;

/// A domain operation would have removed every value of the variable.
///
/// The operation is not applied, the domain keeps its previous contents.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct EmptyDomain(pub(crate) VarId);

/// Why a propagator gave up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Inconsistency {
    /// A variable ran out of values.
    EmptyDomain(VarId),
    /// The constraint is violated without any particular domain becoming empty, e.g. both sides of
    /// a disequality are fixed to the same value.
    Violated,
}

impl Inconsistency {
    pub(crate) fn variable(&self) -> Option<VarId> {
        match self {
            Inconsistency::EmptyDomain(variable) => Some(*variable),
            Inconsistency::Violated => None,
        }
    }
}

impl From<EmptyDomain> for Inconsistency {
    fn from(value: EmptyDomain) -> Self {
        Inconsistency::EmptyDomain(value.0)
    }
}

/// A contradiction detected while propagating: the current domains admit no solution.
///
/// Reports the constraint which detected it (if any, decisions and assumptions can fail on their
/// own) and the variable whose domain became empty (if any).
#[derive(Error, Clone, Copy, Debug, PartialEq, Eq)]
#[error("contradiction (constraint: {constraint:?}, variable: {variable:?})")]
pub struct Contradiction {
    pub constraint: Option<ConstraintId>,
    pub variable: Option<VarId>,
}

impl Contradiction {
    pub(crate) fn in_constraint(constraint: ConstraintId, inconsistency: Inconsistency) -> Self {
        Contradiction {
            constraint: Some(constraint),
            variable: inconsistency.variable(),
        }
    }
}

impl From<EmptyDomain> for Contradiction {
    fn from(value: EmptyDomain) -> Self {
        Contradiction {
            constraint: None,
            variable: Some(value.0),
        }
    }
}

use thiserror::Error;

use crate::engine::ConstraintId;
#[cfg(doc)]
use crate::Solver;

/// Errors related to posting constraints in the [`Solver`].
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum ConstraintOperationError {
    /// The constraint was already known to be false when it was posted, for example because it
    /// was reified and its truth variable was fixed to 0.
    #[error("Posting {0} failed because the constraint is already false")]
    InfeasibleConstraint(ConstraintId),
}

use log::warn;

use crate::engine::variables::VarId;
use crate::engine::ConstraintId;
use crate::ConstraintOperationError;
use crate::Solver;

/// A structure which is responsible for deciding how a [`super::Constraint`] added to the
/// [`Solver`] is used. For an example on how to use this, see [`crate::constraints`].
///
/// The constraint is already part of the model when the poster is created; posting it requires it
/// to hold, reifying it hands out its truth variable instead.
#[derive(Debug)]
pub struct ConstraintPoster<'solver> {
    solver: &'solver mut Solver,
    id: ConstraintId,
    truth: VarId,
    used: bool,
}

impl<'a> ConstraintPoster<'a> {
    pub(crate) fn new(solver: &'a mut Solver, id: ConstraintId, truth: VarId) -> Self {
        ConstraintPoster {
            solver,
            id,
            truth,
            used: false,
        }
    }

    /// The handle of the constraint, as reported by [`crate::Contradiction::constraint`].
    pub fn id(&self) -> ConstraintId {
        self.id
    }

    /// Requires the constraint to hold.
    ///
    /// This method returns a [`ConstraintOperationError`] if the constraint is already known to be
    /// false, e.g. because its truth variable was fixed to 0 by an earlier constraint.
    pub fn post(mut self) -> Result<ConstraintId, ConstraintOperationError> {
        self.used = true;
        self.solver.post_constraint(self.id)?;
        Ok(self.id)
    }

    /// Returns the 0/1 variable which is 1 exactly when the constraint holds, without requiring
    /// the constraint to hold.
    pub fn reify(mut self) -> VarId {
        self.used = true;
        self.truth
    }
}

impl Drop for ConstraintPoster<'_> {
    fn drop(&mut self) {
        if !self.used {
            warn!("A constraint poster is never used, this is likely a mistake.");
        }
    }
}

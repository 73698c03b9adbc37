use thiserror::Error;

use crate::engine::variables::VarId;
#[cfg(doc)]
use crate::Solver;

/// Errors caused by the way the [`Solver`] is used: malformed variables, constraints which break
/// a precondition, or queries which are not valid in the current state.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    #[error("No variable is known under the name '{0}'")]
    UnknownVariable(String),
    #[error("The name '{0}' is already used by another variable")]
    DuplicateName(String),
    #[error("Variable {0} is not instantiated")]
    NotInstantiated(VarId),
    #[error("Variable {0} is a real variable, not an integer variable")]
    NotInteger(VarId),
    #[error("A solution can only be recorded while the search is at a solution")]
    NotInSolutionState,
    #[error("No contradiction has been recorded since the last search started")]
    NoConflict,
    #[error("The divisor of a quotient can take the value zero")]
    DivisorSpansZero,
    #[error("Variable {0} is used as a boolean but its domain is not within {{0, 1}}")]
    NotBoolean(VarId),
    #[error("The bounds [{lower}, {upper}] do not describe a non-empty finite domain")]
    InvalidBounds { lower: f64, upper: f64 },
    #[error("The precision {0} of a real variable must be strictly positive and finite")]
    InvalidPrecision(f64),
    #[error("An integer variable needs at least one value")]
    EmptyDomain,
    #[error("The solution does not fit the variables of this solver")]
    IncompatibleSolution,
}

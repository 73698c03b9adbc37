mod conflict_clause;
mod constraint_operation_error;
mod interval;
mod model_error;
mod propagation_status;
mod random;
mod solution;
mod trail;

pub use conflict_clause::ConflictClause;
pub use constraint_operation_error::ConstraintOperationError;
pub use interval::Interval;
pub use model_error::ModelError;
pub use propagation_status::Contradiction;
pub(crate) use propagation_status::EmptyDomain;
pub(crate) use propagation_status::Inconsistency;
pub(crate) use propagation_status::PropagationStatus;
pub use random::Random;
pub use solution::Solution;
pub use solution::Value;
pub(crate) use trail::Trail;

#[cfg(test)]
pub(crate) mod tests {
    pub(crate) use super::random::tests::TestRandom;
}

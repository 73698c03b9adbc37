mod constraint_set;
pub(crate) mod explanation;
pub(crate) mod predicates;
mod propagation_engine;
pub(crate) mod search;
mod solver_options;
pub(crate) mod solver_statistics;
mod state;
pub(crate) mod termination;
mod variable_names;
mod variable_store;
pub(crate) mod variables;

pub use constraint_set::ConstraintId;
pub(crate) use constraint_set::ConstraintNode;
pub(crate) use constraint_set::ConstraintSet;
pub(crate) use constraint_set::StoredConstraint;
pub(crate) use propagation_engine::PropagationEngine;
pub use search::Decision;
pub(crate) use search::SearchOutcome;
pub(crate) use search::SearchSession;
pub use search::SearchState;
pub use solver_options::LearningOptions;
pub use solver_options::SolverOptions;
pub(crate) use state::State;
pub(crate) use variable_names::VariableNames;
pub(crate) use variable_store::VariableOrigin;
pub(crate) use variable_store::VariableStore;

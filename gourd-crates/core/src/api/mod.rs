mod outputs;
pub(crate) mod solver;

pub use solver::Solver;

pub mod results {
    //! Contains the outputs of solving using the [`Solver`].
    //!
    //! We differentiate between 3 different types of results:
    //! - For finding a single solution ([`SatisfactionResult`])
    //! - For enumerating all solutions ([`EnumerationResult`])
    //! - For an **optimisation** problem ([`OptimisationResult`])
    pub use crate::api::outputs::EnumerationResult;
    pub use crate::api::outputs::OptimisationResult;
    pub use crate::api::outputs::SatisfactionResult;
    pub use crate::basic_types::Solution;
    pub use crate::basic_types::Value;
    #[cfg(doc)]
    use crate::Solver;
}

pub mod variables {
    //! Contains the variables which are used by the [`Solver`].
    //!
    //! Variables are represented by [`VarId`]s when interacting with the [`Solver`]. There are two
    //! kinds ([`VariableKind`]):
    //! - Integer variables, created from a [`DomainSpec`] using [`Solver::new_integer`]. Their
    //!   domain may contain holes.
    //! - Real variables, created from bounds and a precision using [`Solver::new_real`]. A real
    //!   variable counts as instantiated once its interval is no wider than its precision.
    //!
    //! The current domain of a variable can be inspected as a [`Domain`].
    pub use crate::engine::variables::Domain;
    pub use crate::engine::variables::DomainSpec;
    pub use crate::engine::variables::VarId;
    pub use crate::engine::variables::VariableKind;
    #[cfg(doc)]
    use crate::Solver;
}

pub mod options {
    //! Contains the options which can be passed to the [`Solver`].
    //!
    //! These influence the following aspects:
    //! - The seed of the random choices made during search
    //! - Whether explanations are learned as nogoods
    pub use crate::engine::LearningOptions;
    pub use crate::engine::SolverOptions;
    pub use crate::optimisation::OptimisationDirection;
    #[cfg(doc)]
    use crate::Solver;
}

pub mod termination {
    //! Contains the conditions which are used to determine when the [`Solver`] should terminate
    //! even when the state of the satisfaction/optimisation problem is unknown.
    //!
    //! The main [`TerminationCondition`] is a condition which is polled by the [`Solver`] during
    //! the search process. It indicates when the [`Solver`] should stop, even if no definitive
    //! conclusions have been made.
    //!
    //! The most common example would be [`TimeBudget`], which terminates the [`Solver`] whenever
    //! the time budget is exceeded.
    pub use crate::engine::termination::Combinator;
    pub use crate::engine::termination::DecisionBudget;
    pub use crate::engine::termination::Indefinite;
    pub use crate::engine::termination::TerminationCondition;
    pub use crate::engine::termination::TimeBudget;
    #[cfg(doc)]
    use crate::Solver;
}

pub mod predicates {
    //! Contains the atomic constraints over a single variable, see [`Predicate`]. Predicates are
    //! used as assumptions (see [`Solver::propagate_under_assumptions`]), as decisions, and as the
    //! literals of a [`ConflictClause`].
    //!
    //! They are most conveniently created with the [`predicate!`](crate::predicate) macro.
    pub use crate::engine::predicates::Predicate;
    pub use crate::engine::predicates::PredicateConstructor;
    #[cfg(doc)]
    use crate::ConflictClause;
    #[cfg(doc)]
    use crate::Solver;
}

//! # Gourd
//! Gourd is a finite-domain constraint satisfaction and optimisation engine. Models are built
//! from bounded integer and real variables, arithmetic comparisons between expressions over
//! those variables, and boolean combinations (conjunction, disjunction, negation, implication
//! and equivalence) of such comparisons.
//!
//! The [`Solver`] is the session object through which everything happens: variables are created
//! through it, constraints are added to it, and it drives the depth-first search which enumerates
//! solutions or proves optimality of an objective. When a part of the search space fails, the
//! solver can explain the failure as a minimal set of [`predicates::Predicate`]s which cannot
//! hold together, and learn that set as a nogood.
//!
//! # Example
//! ```rust
//! # use gourd_core::Solver;
//! # use gourd_core::constraints;
//! # use gourd_core::results::SatisfactionResult;
//! # use gourd_core::termination::Indefinite;
//! # use gourd_core::variables::DomainSpec;
//! let mut solver = Solver::default();
//! let x = solver.new_integer(DomainSpec::interval(0, 5)).unwrap();
//! let y = solver.new_integer(DomainSpec::interval(0, 5)).unwrap();
//!
//! solver
//!     .add_constraint(constraints::equals(x, constraints::sum(y, 3)))
//!     .unwrap()
//!     .post()
//!     .unwrap();
//!
//! let mut brancher = solver.default_brancher();
//! let result = solver.solve_one(&mut brancher, &mut Indefinite);
//! let SatisfactionResult::Satisfiable(solution) = result else {
//!     panic!("expected a solution");
//! };
//! assert_eq!(solution.integer_value(x), Some(3));
//! assert_eq!(solution.integer_value(y), Some(0));
//! ```
pub(crate) mod basic_types;
pub mod containers;
pub(crate) mod engine;
#[doc(hidden)]
pub mod gourd_asserts;
pub(crate) mod propagators;

pub mod branching;
pub mod constraints;
pub mod optimisation;
pub mod statistics;

pub use convert_case;
pub use rand;

// The API module is private but re-exported, so that `gourd_core::Solver` is the path used by
// clients rather than `gourd_core::api::Solver`.
mod api;

pub use api::*;

pub use crate::basic_types::ConflictClause;
pub use crate::basic_types::ConstraintOperationError;
pub use crate::basic_types::Contradiction;
pub use crate::basic_types::Interval;
pub use crate::basic_types::ModelError;
pub use crate::basic_types::Random;
pub use crate::basic_types::Solution;
pub use crate::basic_types::Value;
pub use crate::engine::ConstraintId;
pub use crate::engine::Decision;
pub use crate::engine::SearchState;

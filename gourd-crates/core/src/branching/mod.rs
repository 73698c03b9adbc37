//! Contains structures and traits to define the decision making procedure of the [`Solver`].
//!
//! In general, it provides 3 traits:
//! - The [`Brancher`] which defines how a branching procedure (which selects an unfixed variable
//!   and splits the domain in some way, see [`Decision`]) should operate; the main method of this
//!   trait is the [`Brancher::next_decision`] method.
//! - The [`VariableSelector`] which defines the method required of a variable selector (e.g. which
//!   variable to branch on next).
//! - The [`ValueSelector`] which defines the method required of a value selector (e.g. how to
//!   split the domain of the selected variable).
//!
//! The [`IndependentVariableValueBrancher`] combines one of each, and
//! [`Solver::default_brancher`] creates the brancher used when nothing else is configured: the
//! first unfixed variable in creation order, smallest value first.
//!
//! # Example
//! ```rust
//! # use gourd_core::branching::branchers::IndependentVariableValueBrancher;
//! # use gourd_core::branching::value_selection::InDomainMax;
//! # use gourd_core::branching::variable_selection::FirstFail;
//! # use gourd_core::results::SatisfactionResult;
//! # use gourd_core::termination::Indefinite;
//! # use gourd_core::variables::DomainSpec;
//! # use gourd_core::Solver;
//! let mut solver = Solver::default();
//! let x = solver.new_integer(DomainSpec::interval(0, 10)).unwrap();
//! let y = solver.new_integer(DomainSpec::values([1, 4])).unwrap();
//!
//! let mut brancher = IndependentVariableValueBrancher::new(FirstFail::new(&[x, y]), InDomainMax);
//! let result = solver.solve_one(&mut brancher, &mut Indefinite);
//!
//! let SatisfactionResult::Satisfiable(solution) = result else {
//!     panic!("expected a solution");
//! };
//! assert_eq!(solution.integer_value(x), Some(10));
//! assert_eq!(solution.integer_value(y), Some(4));
//! ```
#[cfg(doc)]
use crate::engine::Decision;
#[cfg(doc)]
use crate::Solver;

mod brancher;
pub mod branchers;
mod selection_context;
pub mod value_selection;
pub mod variable_selection;

pub use brancher::Brancher;
pub use selection_context::SelectionContext;
#[cfg(doc)]
use branchers::IndependentVariableValueBrancher;
#[cfg(doc)]
use value_selection::ValueSelector;
#[cfg(doc)]
use variable_selection::VariableSelector;

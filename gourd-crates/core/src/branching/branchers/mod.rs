//! Provides the [`Brancher`] implementations of the crate.
#[cfg(doc)]
use crate::branching::Brancher;

mod independent_variable_value_brancher;

pub use independent_variable_value_brancher::*;

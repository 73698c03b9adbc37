//! Provides the [`VariableSelector`] trait which is required for variable selectors to implement;
//! the main method in this trait is [`VariableSelector::select_variable`].
//!
//! Implementations are [`InputOrder`], which follows a fixed order, and [`FirstFail`], which
//! picks the variable with the fewest values left.
mod first_fail;
mod input_order;
mod variable_selector;

pub use first_fail::*;
pub use input_order::*;
pub use variable_selector::VariableSelector;

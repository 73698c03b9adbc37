//! Provides the [`ValueSelector`] trait which is required for value selectors to implement; the
//! main method in this trait is [`ValueSelector::select_value`].
//!
//! Integer variables are either fixed to a value or split on a bound; real variables are always
//! split at the midpoint of their domain, the selector only decides which half comes first.
mod in_domain_max;
mod in_domain_min;
mod in_domain_random;
mod in_domain_split;
mod value_selector;

pub use in_domain_max::*;
pub use in_domain_min::*;
pub use in_domain_random::*;
pub use in_domain_split::*;
pub use value_selector::ValueSelector;

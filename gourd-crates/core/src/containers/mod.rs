//! Storage keyed by the dense ids of the solver ([`crate::variables::VarId`],
//! [`crate::ConstraintId`]), and hash collections with a fixed hasher so that iteration order,
//! and with it the search, is the same on every run.
mod keyed_vec;

use fnv::FnvBuildHasher;
pub use keyed_vec::*;

#[allow(clippy::disallowed_types, reason = "the FNV-hashed map is defined in terms of it")]
pub type HashMap<K, V, Hasher = FnvBuildHasher> = std::collections::HashMap<K, V, Hasher>;
#[allow(clippy::disallowed_types, reason = "the FNV-hashed set is defined in terms of it")]
pub type HashSet<K, Hasher = FnvBuildHasher> = std::collections::HashSet<K, Hasher>;

//! Variables and their domains.
mod domain;
mod integer_domain;
mod real_domain;
mod var_id;

pub use domain::Domain;
pub use domain::DomainSpec;
pub use domain::VariableKind;
pub(crate) use integer_domain::IntegerDomain;
pub(crate) use real_domain::RealDomain;
pub use var_id::VarId;

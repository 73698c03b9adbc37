use std::fmt::Display;
use std::fmt::Formatter;

use itertools::Itertools;

use crate::basic_types::Interval;

/// Integer domains with holes are listed value by value up to this many values.
const MAX_LISTED_VALUES: u64 = 64;

/// The kind of a variable.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum VariableKind {
    Integer,
    Real { epsilon: f64 },
}

impl VariableKind {
    pub fn is_integer(&self) -> bool {
        matches!(self, VariableKind::Integer)
    }
}

/// The initial domain of an integer variable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DomainSpec {
    /// All integers in `[lower, upper]`.
    Interval { lower: i32, upper: i32 },
    /// Exactly the listed values; duplicates are ignored.
    Values(Vec<i32>),
}

impl DomainSpec {
    pub fn interval(lower: i32, upper: i32) -> DomainSpec {
        DomainSpec::Interval { lower, upper }
    }

    pub fn values(values: impl IntoIterator<Item = i32>) -> DomainSpec {
        DomainSpec::Values(values.into_iter().collect())
    }

    /// The domain `{0, 1}`.
    pub fn boolean() -> DomainSpec {
        DomainSpec::Interval { lower: 0, upper: 1 }
    }
}

/// A description of the current domain of a variable.
#[derive(Clone, Debug, PartialEq)]
pub enum Domain {
    Integer {
        lower_bound: i32,
        upper_bound: i32,
        /// The values strictly between the bounds which have been removed, in increasing order.
        holes: Vec<i32>,
    },
    Real {
        lower_bound: f64,
        upper_bound: f64,
        epsilon: f64,
    },
}

impl Domain {
    pub fn bounds(&self) -> Interval {
        match self {
            Domain::Integer {
                lower_bound,
                upper_bound,
                ..
            } => Interval::new(*lower_bound as f64, *upper_bound as f64),
            Domain::Real {
                lower_bound,
                upper_bound,
                ..
            } => Interval::new(*lower_bound, *upper_bound),
        }
    }

    pub fn is_instantiated(&self) -> bool {
        match self {
            Domain::Integer {
                lower_bound,
                upper_bound,
                ..
            } => lower_bound == upper_bound,
            Domain::Real {
                lower_bound,
                upper_bound,
                epsilon,
            } => upper_bound - lower_bound <= *epsilon,
        }
    }

    /// The number of values in an integer domain; `None` for real domains.
    pub fn integer_size(&self) -> Option<u64> {
        match self {
            Domain::Integer {
                lower_bound,
                upper_bound,
                holes,
            } => {
                let width = (*upper_bound as i64 - *lower_bound as i64 + 1) as u64;
                Some(width - holes.len() as u64)
            }
            Domain::Real { .. } => None,
        }
    }

    /// The values of an integer domain in increasing order; `None` for real domains.
    ///
    /// The values are produced lazily, see [`Domain::integer_size`] before collecting them.
    pub fn integer_values(&self) -> Option<impl Iterator<Item = i32> + '_> {
        match self {
            Domain::Integer {
                lower_bound,
                upper_bound,
                holes,
            } => Some(
                (*lower_bound..=*upper_bound)
                    .filter(move |value| holes.binary_search(value).is_err()),
            ),
            Domain::Real { .. } => None,
        }
    }

    /// Whether the domain is small enough to be shown value by value.
    pub(crate) fn is_listable(&self) -> bool {
        self.integer_size()
            .is_some_and(|size| size <= MAX_LISTED_VALUES)
    }
}

/// Formats as `v` once instantiated, as `[l, u]` for intervals and as `{a, b, c}` for integer
/// domains with holes. Large domains with holes are shown as `[l, u] \ {h, i}`. Reals are shown
/// with six decimals.
impl Display for Domain {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Domain::Integer {
                lower_bound,
                upper_bound,
                holes,
            } => {
                if lower_bound == upper_bound {
                    write!(f, "{lower_bound}")
                } else if holes.is_empty() {
                    write!(f, "[{lower_bound}, {upper_bound}]")
                } else if let Some(values) = self.integer_values().filter(|_| self.is_listable()) {
                    write!(f, "{{{}}}", values.format(", "))
                } else {
                    write!(
                        f,
                        "[{lower_bound}, {upper_bound}] \\ {{{}}}",
                        holes.iter().format(", ")
                    )
                }
            }
            Domain::Real {
                lower_bound,
                upper_bound,
                ..
            } => {
                if self.is_instantiated() {
                    write!(f, "{upper_bound:.6}")
                } else {
                    write!(f, "[{lower_bound:.6}, {upper_bound:.6}]")
                }
            }
        }
    }
}

use std::fmt::Debug;
use std::fmt::Display;
use std::fmt::Formatter;
use std::ops::Not;

use crate::engine::variables::VarId;

/// An atomic constraint over a single variable.
///
/// Predicates are the literals of search: decisions, the refutations posted when a decision is
/// undone, assumptions and the members of a [`crate::ConflictClause`] are all predicates.
///
/// The strict bounds exist so that negation does not depend on the kind of the variable. On an
/// integer variable `[x > v]` is the same as `[x >= floor(v) + 1]`; on a real variable a strict
/// bound is treated as its closure, `[x > v]` behaves as `[x >= v]`.
#[derive(Clone, Copy, PartialEq)]
pub enum Predicate {
    LowerBound { variable: VarId, lower_bound: f64 },
    StrictLowerBound { variable: VarId, lower_bound: f64 },
    UpperBound { variable: VarId, upper_bound: f64 },
    StrictUpperBound { variable: VarId, upper_bound: f64 },
    NotEqual { variable: VarId, not_equal_constant: f64 },
    Equal { variable: VarId, equality_constant: f64 },
}

impl Predicate {
    pub fn variable(&self) -> VarId {
        match *self {
            Predicate::LowerBound { variable, .. }
            | Predicate::StrictLowerBound { variable, .. }
            | Predicate::UpperBound { variable, .. }
            | Predicate::StrictUpperBound { variable, .. }
            | Predicate::NotEqual { variable, .. }
            | Predicate::Equal { variable, .. } => variable,
        }
    }

    /// The constant the variable is compared against.
    pub fn value(&self) -> f64 {
        match *self {
            Predicate::LowerBound { lower_bound, .. }
            | Predicate::StrictLowerBound { lower_bound, .. } => lower_bound,
            Predicate::UpperBound { upper_bound, .. }
            | Predicate::StrictUpperBound { upper_bound, .. } => upper_bound,
            Predicate::NotEqual {
                not_equal_constant, ..
            } => not_equal_constant,
            Predicate::Equal {
                equality_constant, ..
            } => equality_constant,
        }
    }

    pub fn is_equality_predicate(&self) -> bool {
        matches!(self, Predicate::Equal { .. })
    }
}

impl Not for Predicate {
    type Output = Predicate;

    fn not(self) -> Self::Output {
        match self {
            Predicate::LowerBound {
                variable,
                lower_bound,
            } => Predicate::StrictUpperBound {
                variable,
                upper_bound: lower_bound,
            },
            Predicate::StrictLowerBound {
                variable,
                lower_bound,
            } => Predicate::UpperBound {
                variable,
                upper_bound: lower_bound,
            },
            Predicate::UpperBound {
                variable,
                upper_bound,
            } => Predicate::StrictLowerBound {
                variable,
                lower_bound: upper_bound,
            },
            Predicate::StrictUpperBound {
                variable,
                upper_bound,
            } => Predicate::LowerBound {
                variable,
                lower_bound: upper_bound,
            },
            Predicate::NotEqual {
                variable,
                not_equal_constant,
            } => Predicate::Equal {
                variable,
                equality_constant: not_equal_constant,
            },
            Predicate::Equal {
                variable,
                equality_constant,
            } => Predicate::NotEqual {
                variable,
                not_equal_constant: equality_constant,
            },
        }
    }
}

impl Display for Predicate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let operator = match self {
            Predicate::LowerBound { .. } => ">=",
            Predicate::StrictLowerBound { .. } => ">",
            Predicate::UpperBound { .. } => "<=",
            Predicate::StrictUpperBound { .. } => "<",
            Predicate::NotEqual { .. } => "!=",
            Predicate::Equal { .. } => "==",
        };
        write!(f, "[{} {operator} {}]", self.variable(), self.value())
    }
}

impl Debug for Predicate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predicate;

    #[test]
    fn negating_twice_is_the_identity() {
        let x = VarId::new(0);

        for predicate in [
            predicate![x >= 2],
            predicate![x > 2],
            predicate![x <= 2],
            predicate![x < 2],
            predicate![x == 2],
            predicate![x != 2],
        ] {
            assert_eq!(!!predicate, predicate);
        }
    }

    #[test]
    fn negated_lower_bound_is_a_strict_upper_bound() {
        let x = VarId::new(3);

        assert_eq!(!predicate![x >= 5], predicate![x < 5]);
        assert_eq!((!predicate![x >= 5]).to_string(), "[x3 < 5]");
    }
}

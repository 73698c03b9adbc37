use super::predicate::Predicate;
use crate::engine::variables::VarId;

/// A trait which defines methods for creating a [`Predicate`].
///
/// Bounds are accepted as anything which converts into an `f64`, so both `predicate![x >= 5]`
/// and `predicate![x >= 2.5]` work.
pub trait PredicateConstructor {
    /// Creates a lower-bound predicate (e.g. `[x >= v]`).
    fn lower_bound_predicate(&self, bound: impl Into<f64>) -> Predicate;

    /// Creates a strict lower-bound predicate (e.g. `[x > v]`).
    fn strict_lower_bound_predicate(&self, bound: impl Into<f64>) -> Predicate;

    /// Creates an upper-bound predicate (e.g. `[x <= v]`).
    fn upper_bound_predicate(&self, bound: impl Into<f64>) -> Predicate;

    /// Creates a strict upper-bound predicate (e.g. `[x < v]`).
    fn strict_upper_bound_predicate(&self, bound: impl Into<f64>) -> Predicate;

    /// Creates an equality predicate (e.g. `[x == v]`).
    fn equality_predicate(&self, value: impl Into<f64>) -> Predicate;

    /// Creates a disequality predicate (e.g. `[x != v]`).
    fn disequality_predicate(&self, value: impl Into<f64>) -> Predicate;
}

impl PredicateConstructor for VarId {
    fn lower_bound_predicate(&self, bound: impl Into<f64>) -> Predicate {
        Predicate::LowerBound {
            variable: *self,
            lower_bound: bound.into(),
        }
    }

    fn strict_lower_bound_predicate(&self, bound: impl Into<f64>) -> Predicate {
        Predicate::StrictLowerBound {
            variable: *self,
            lower_bound: bound.into(),
        }
    }

    fn upper_bound_predicate(&self, bound: impl Into<f64>) -> Predicate {
        Predicate::UpperBound {
            variable: *self,
            upper_bound: bound.into(),
        }
    }

    fn strict_upper_bound_predicate(&self, bound: impl Into<f64>) -> Predicate {
        Predicate::StrictUpperBound {
            variable: *self,
            upper_bound: bound.into(),
        }
    }

    fn equality_predicate(&self, value: impl Into<f64>) -> Predicate {
        Predicate::Equal {
            variable: *self,
            equality_constant: value.into(),
        }
    }

    fn disequality_predicate(&self, value: impl Into<f64>) -> Predicate {
        Predicate::NotEqual {
            variable: *self,
            not_equal_constant: value.into(),
        }
    }
}

/// A macro which allows for the creation of a [`Predicate`].
///
/// # Example
/// ```rust
/// # use gourd_core::Solver;
/// # use gourd_core::predicate;
/// # use gourd_core::predicates::Predicate;
/// # use gourd_core::variables::DomainSpec;
/// let mut solver = Solver::default();
/// let x = solver.new_integer(DomainSpec::interval(0, 10)).unwrap();
///
/// assert_eq!(
///     predicate!(x >= 5),
///     Predicate::LowerBound {
///         variable: x,
///         lower_bound: 5.0
///     }
/// );
/// assert_eq!(
///     predicate!(x != 5),
///     Predicate::NotEqual {
///         variable: x,
///         not_equal_constant: 5.0
///     }
/// );
/// ```
#[macro_export]
macro_rules! predicate {
    ($($var:ident).+$([$index:expr])? >= $bound:expr) => {{
        #[allow(unused, reason = "Could be imported twice")]
        use $crate::predicates::PredicateConstructor;
        $($var).+$([$index])?.lower_bound_predicate($bound)
    }};
    ($($var:ident).+$([$index:expr])? > $bound:expr) => {{
        #[allow(unused, reason = "Could be imported twice")]
        use $crate::predicates::PredicateConstructor;
        $($var).+$([$index])?.strict_lower_bound_predicate($bound)
    }};
    ($($var:ident).+$([$index:expr])? <= $bound:expr) => {{
        #[allow(unused, reason = "Could be imported twice")]
        use $crate::predicates::PredicateConstructor;
        $($var).+$([$index])?.upper_bound_predicate($bound)
    }};
    ($($var:ident).+$([$index:expr])? < $bound:expr) => {{
        #[allow(unused, reason = "Could be imported twice")]
        use $crate::predicates::PredicateConstructor;
        $($var).+$([$index])?.strict_upper_bound_predicate($bound)
    }};
    ($($var:ident).+$([$index:expr])? == $value:expr) => {{
        #[allow(unused, reason = "Could be imported twice")]
        use $crate::predicates::PredicateConstructor;
        $($var).+$([$index])?.equality_predicate($value)
    }};
    ($($var:ident).+$([$index:expr])? != $value:expr) => {{
        #[allow(unused, reason = "Could be imported twice")]
        use $crate::predicates::PredicateConstructor;
        $($var).+$([$index])?.disequality_predicate($value)
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn macro_nested_identifiers_are_matched() {
        struct Wrapper {
            x: VarId,
        }

        let wrapper = Wrapper { x: VarId::new(0) };

        assert_eq!(
            Predicate::UpperBound {
                variable: wrapper.x,
                upper_bound: 3.0
            },
            predicate![wrapper.x <= 3]
        );
        assert_eq!(
            Predicate::Equal {
                variable: wrapper.x,
                equality_constant: 2.5
            },
            predicate![wrapper.x == 2.5]
        );
    }

    #[test]
    fn macro_index_expressions_are_matched() {
        let variables = [VarId::new(0), VarId::new(1)];

        assert_eq!(
            Predicate::StrictLowerBound {
                variable: variables[1],
                lower_bound: 4.0
            },
            predicate![variables[1] > 4]
        );
    }
}

use std::fmt::Display;
use std::fmt::Formatter;
use std::ops::Add;
use std::ops::Mul;
use std::ops::Neg;
use std::ops::Sub;

/// A closed interval `[lower, upper]` over the extended reals.
///
/// Intervals are the currency of propagation: expressions are evaluated to an interval which
/// contains every value they can take, and the interval a relation allows is projected back onto
/// the operands. An interval with `lower > upper` is empty.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Interval {
    pub lower: f64,
    pub upper: f64,
}

impl Interval {
    pub const UNBOUNDED: Interval = Interval {
        lower: f64::NEG_INFINITY,
        upper: f64::INFINITY,
    };

    pub const fn new(lower: f64, upper: f64) -> Interval {
        Interval { lower, upper }
    }

    pub const fn point(value: f64) -> Interval {
        Interval {
            lower: value,
            upper: value,
        }
    }

    pub const fn at_most(upper: f64) -> Interval {
        Interval {
            lower: f64::NEG_INFINITY,
            upper,
        }
    }

    pub const fn at_least(lower: f64) -> Interval {
        Interval {
            lower,
            upper: f64::INFINITY,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lower > self.upper || self.lower.is_nan() || self.upper.is_nan()
    }

    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }

    pub fn midpoint(&self) -> f64 {
        // Halving first keeps the result finite for bounds near `f64::MAX`.
        self.lower / 2.0 + self.upper / 2.0
    }

    pub fn contains(&self, value: f64) -> bool {
        self.lower <= value && value <= self.upper
    }

    pub fn contains_zero(&self) -> bool {
        self.contains(0.0)
    }

    pub fn intersect(&self, other: Interval) -> Interval {
        Interval {
            lower: self.lower.max(other.lower),
            upper: self.upper.min(other.upper),
        }
    }

    /// Whether the two intervals share no value, allowing for a gap of at most `tolerance`.
    pub fn is_disjoint_from(&self, other: Interval, tolerance: f64) -> bool {
        self.upper + tolerance < other.lower || other.upper + tolerance < self.lower
    }

    /// Multiplies every value of the interval by a constant.
    pub fn scale(&self, factor: f64) -> Interval {
        let a = multiply_bounds(self.lower, factor);
        let b = multiply_bounds(self.upper, factor);
        Interval::new(a.min(b), a.max(b))
    }

    /// Divides by `divisor`, which must not contain zero. A divisor which does contain zero
    /// yields the unbounded interval.
    pub fn divide(&self, divisor: Interval) -> Interval {
        if divisor.contains_zero() {
            return Interval::UNBOUNDED;
        }

        let candidates = [
            self.lower / divisor.lower,
            self.lower / divisor.upper,
            self.upper / divisor.lower,
            self.upper / divisor.upper,
        ];
        hull(candidates)
    }
}

impl Default for Interval {
    fn default() -> Self {
        Interval::UNBOUNDED
    }
}

/// `0 * inf` is taken to be zero, the value a bounded factor times an unbounded one approaches.
fn multiply_bounds(lhs: f64, rhs: f64) -> f64 {
    if lhs == 0.0 || rhs == 0.0 {
        0.0
    } else {
        lhs * rhs
    }
}

fn hull(candidates: [f64; 4]) -> Interval {
    if candidates.iter().any(|candidate| candidate.is_nan()) {
        return Interval::UNBOUNDED;
    }

    let lower = candidates.iter().copied().fold(f64::INFINITY, f64::min);
    let upper = candidates.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    Interval::new(lower, upper)
}

impl Add for Interval {
    type Output = Interval;

    fn add(self, rhs: Interval) -> Interval {
        Interval::new(self.lower + rhs.lower, self.upper + rhs.upper)
    }
}

impl Sub for Interval {
    type Output = Interval;

    fn sub(self, rhs: Interval) -> Interval {
        Interval::new(self.lower - rhs.upper, self.upper - rhs.lower)
    }
}

impl Neg for Interval {
    type Output = Interval;

    fn neg(self) -> Interval {
        Interval::new(-self.upper, -self.lower)
    }
}

impl Mul for Interval {
    type Output = Interval;

    fn mul(self, rhs: Interval) -> Interval {
        hull([
            multiply_bounds(self.lower, rhs.lower),
            multiply_bounds(self.lower, rhs.upper),
            multiply_bounds(self.upper, rhs.lower),
            multiply_bounds(self.upper, rhs.upper),
        ])
    }
}

impl Display for Interval {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.lower, self.upper)
    }
}

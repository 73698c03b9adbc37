use crate::basic_types::Interval;

/// Bound updates which move a real bound by less than `epsilon / RESOLUTION_DIVISOR` are
/// dropped; they are also the slack allowed when a new bound crosses the opposite one.
const RESOLUTION_DIVISOR: f64 = 100.0;

/// A real interval with a precision: the variable counts as instantiated once the interval is no
/// wider than `epsilon`.
#[derive(Clone, Copy, Debug)]
pub(crate) struct RealDomain {
    lower_bound: f64,
    upper_bound: f64,
    epsilon: f64,
}

impl RealDomain {
    pub(crate) fn new(lower_bound: f64, upper_bound: f64, epsilon: f64) -> Self {
        RealDomain {
            lower_bound,
            upper_bound,
            epsilon,
        }
    }

    pub(crate) fn lower_bound(&self) -> f64 {
        self.lower_bound
    }

    pub(crate) fn upper_bound(&self) -> f64 {
        self.upper_bound
    }

    pub(crate) fn epsilon(&self) -> f64 {
        self.epsilon
    }

    pub(crate) fn resolution(&self) -> f64 {
        self.epsilon / RESOLUTION_DIVISOR
    }

    pub(crate) fn bounds(&self) -> Interval {
        Interval::new(self.lower_bound, self.upper_bound)
    }

    pub(crate) fn is_instantiated(&self) -> bool {
        self.upper_bound - self.lower_bound <= self.epsilon
    }

    pub(crate) fn set_bounds(&mut self, lower_bound: f64, upper_bound: f64) {
        self.lower_bound = lower_bound;
        self.upper_bound = upper_bound;
    }
}

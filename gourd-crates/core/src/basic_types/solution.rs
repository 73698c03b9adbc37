use std::fmt::Display;
use std::fmt::Formatter;

use crate::containers::KeyedVec;
use crate::engine::variables::VarId;

/// The value of a variable in a [`Solution`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Value {
    Integer(i32),
    /// Real variables are instantiated once their interval is narrower than their precision; the
    /// whole interval is recorded.
    Real { lower: f64, upper: f64 },
}

impl Value {
    pub fn as_integer(&self) -> Option<i32> {
        match self {
            Value::Integer(value) => Some(*value),
            Value::Real { .. } => None,
        }
    }

    /// The value as a float. For reals the upper end of the recorded interval is used.
    pub fn as_f64(&self) -> f64 {
        match self {
            Value::Integer(value) => *value as f64,
            Value::Real { upper, .. } => *upper,
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Integer(value) => write!(f, "{value}"),
            Value::Real { upper, .. } => write!(f, "{upper:.6}"),
        }
    }
}

/// A snapshot of an assignment to every variable of a solver.
///
/// A solution is a deep copy: later search does not change it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Solution {
    values: KeyedVec<VarId, Value>,
}

impl Solution {
    pub(crate) fn new(values: KeyedVec<VarId, Value>) -> Self {
        Solution { values }
    }

    pub fn num_variables(&self) -> usize {
        self.values.len()
    }

    pub fn value(&self, variable: VarId) -> Option<Value> {
        self.values.get(variable).copied()
    }

    pub fn integer_value(&self, variable: VarId) -> Option<i32> {
        self.value(variable).and_then(|value| value.as_integer())
    }

    pub fn real_value(&self, variable: VarId) -> Option<f64> {
        self.value(variable).map(|value| value.as_f64())
    }

    /// Iterates over all variables and their values, in creation order.
    pub fn iter(&self) -> impl Iterator<Item = (VarId, Value)> + '_ {
        self.values
            .iter_with_keys()
            .map(|(variable, value)| (variable, *value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn real_values_are_represented_by_their_upper_bound() {
        let value = Value::Real {
            lower: 4.995,
            upper: 5.0,
        };

        assert_eq!(value.as_f64(), 5.0);
        assert_eq!(value.as_integer(), None);
        assert_eq!(value.to_string(), "5.000000");
    }

    #[test]
    fn unknown_variables_have_no_value() {
        let solution = Solution::new(vec![Value::Integer(3)].into_iter().collect());

        assert_eq!(solution.integer_value(VarId::new(0)), Some(3));
        assert_eq!(solution.value(VarId::new(1)), None);
    }
}

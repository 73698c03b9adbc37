use crate::basic_types::Interval;
use crate::engine::variables::VarId;

/// An arithmetic expression over variables.
///
/// Expressions are evaluated with interval arithmetic. A [`Expression::Quotient`] requires that
/// its divisor can never be zero; the solver refuses constraints where the divisor's domain
/// contains zero.
#[derive(Clone, Debug, PartialEq)]
pub enum Expression {
    Variable(VarId),
    Constant(f64),
    Sum(Box<Expression>, Box<Expression>),
    Scaled(Box<Expression>, f64),
    Quotient(Box<Expression>, Box<Expression>),
}

impl Expression {
    pub fn plus(self, other: impl Into<Expression>) -> Expression {
        Expression::Sum(Box::new(self), Box::new(other.into()))
    }

    pub fn minus(self, other: impl Into<Expression>) -> Expression {
        self.plus(other.into().scaled(-1.0))
    }

    pub fn scaled(self, factor: f64) -> Expression {
        Expression::Scaled(Box::new(self), factor)
    }

    pub fn divided_by(self, divisor: impl Into<Expression>) -> Expression {
        Expression::Quotient(Box::new(self), Box::new(divisor.into()))
    }

    /// The variables occurring in the expression, each once, in order of first occurrence.
    pub fn variables(&self) -> Vec<VarId> {
        let mut variables = Vec::new();
        self.collect_variables(&mut variables);
        variables
    }

    fn collect_variables(&self, variables: &mut Vec<VarId>) {
        match self {
            Expression::Variable(variable) => {
                if !variables.contains(variable) {
                    variables.push(*variable);
                }
            }
            Expression::Constant(_) => {}
            Expression::Sum(lhs, rhs) | Expression::Quotient(lhs, rhs) => {
                lhs.collect_variables(variables);
                rhs.collect_variables(variables);
            }
            Expression::Scaled(inner, _) => inner.collect_variables(variables),
        }
    }

    /// Evaluates the expression given an interval for every variable.
    ///
    /// Passing point intervals evaluates the expression under a full assignment.
    pub fn evaluate_with(&self, bounds_of: &impl Fn(VarId) -> Interval) -> Interval {
        match self {
            Expression::Variable(variable) => bounds_of(*variable),
            Expression::Constant(value) => Interval::point(*value),
            Expression::Sum(lhs, rhs) => lhs.evaluate_with(bounds_of) + rhs.evaluate_with(bounds_of),
            Expression::Scaled(inner, factor) => inner.evaluate_with(bounds_of).scale(*factor),
            Expression::Quotient(dividend, divisor) => dividend
                .evaluate_with(bounds_of)
                .divide(divisor.evaluate_with(bounds_of)),
        }
    }

    /// Whether some divisor of the expression can be zero given the provided bounds.
    pub(crate) fn has_divisor_spanning_zero(&self, bounds_of: &impl Fn(VarId) -> Interval) -> bool {
        match self {
            Expression::Variable(_) | Expression::Constant(_) => false,
            Expression::Sum(lhs, rhs) => {
                lhs.has_divisor_spanning_zero(bounds_of) || rhs.has_divisor_spanning_zero(bounds_of)
            }
            Expression::Scaled(inner, _) => inner.has_divisor_spanning_zero(bounds_of),
            Expression::Quotient(dividend, divisor) => {
                divisor.evaluate_with(bounds_of).contains_zero()
                    || dividend.has_divisor_spanning_zero(bounds_of)
                    || divisor.has_divisor_spanning_zero(bounds_of)
            }
        }
    }

    pub(crate) fn as_variable(&self) -> Option<VarId> {
        match self {
            Expression::Variable(variable) => Some(*variable),
            _ => None,
        }
    }
}

impl From<VarId> for Expression {
    fn from(value: VarId) -> Self {
        Expression::Variable(value)
    }
}

impl From<i32> for Expression {
    fn from(value: i32) -> Self {
        Expression::Constant(value as f64)
    }
}

impl From<f64> for Expression {
    fn from(value: f64) -> Self {
        Expression::Constant(value)
    }
}

/// Creates the expression `lhs + rhs`.
pub fn sum(lhs: impl Into<Expression>, rhs: impl Into<Expression>) -> Expression {
    lhs.into().plus(rhs)
}

/// Creates the expression `lhs - rhs`.
pub fn difference(lhs: impl Into<Expression>, rhs: impl Into<Expression>) -> Expression {
    lhs.into().minus(rhs)
}

/// Creates the expression `factor * expression`.
pub fn scaled(expression: impl Into<Expression>, factor: f64) -> Expression {
    expression.into().scaled(factor)
}

/// Creates the expression `dividend / divisor`.
pub fn quotient(dividend: impl Into<Expression>, divisor: impl Into<Expression>) -> Expression {
    dividend.into().divided_by(divisor)
}

//! Defines the constraints that the [`Solver`] understands.
//!
//! A [`Constraint`] is a tree: comparisons between [`Expression`]s at the leaves, combined with
//! boolean connectives. Adding one to the solver with [`Solver::add_constraint`] gives a
//! [`ConstraintPoster`] which either posts it (the constraint must hold) or reifies it (returns a
//! 0/1 variable which is 1 exactly when the constraint holds).
//!
//! # Example
//! ```
//! # use gourd_core::constraints;
//! # use gourd_core::Solver;
//! # use gourd_core::variables::DomainSpec;
//! let mut solver = Solver::default();
//! let price = solver.new_integer(DomainSpec::interval(0, 100)).unwrap();
//! let premium = solver.new_integer(DomainSpec::boolean()).unwrap();
//!
//! // premium -> price >= 50
//! solver
//!     .add_constraint(
//!         constraints::literal(premium).implies(constraints::greater_than_or_equals(price, 50)),
//!     )
//!     .unwrap()
//!     .post()
//!     .unwrap();
//! ```
mod constraint_poster;
mod expression;

use std::ops::Not;

pub use constraint_poster::ConstraintPoster;
pub use expression::*;

use crate::engine::variables::VarId;
#[cfg(doc)]
use crate::Solver;

/// The relation of a comparison. `>=` and `>` are expressed by swapping the operands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Relation {
    Equal,
    NotEqual,
    LessThanOrEqual,
    LessThan,
}

/// A constraint in tree form, as built by the client.
#[derive(Clone, Debug, PartialEq)]
pub enum Constraint {
    Compare {
        relation: Relation,
        lhs: Expression,
        rhs: Expression,
    },
    /// Holds when every operand holds; an empty conjunction always holds.
    And(Vec<Constraint>),
    /// Holds when some operand holds; an empty disjunction never holds.
    Or(Vec<Constraint>),
    Not(Box<Constraint>),
    Implies(Box<Constraint>, Box<Constraint>),
    Iff(Box<Constraint>, Box<Constraint>),
    /// An existing variable with a domain within `{0, 1}`, which holds when it is 1.
    Literal(VarId),
}

impl Constraint {
    pub fn and(self, other: Constraint) -> Constraint {
        Constraint::And(vec![self, other])
    }

    pub fn or(self, other: Constraint) -> Constraint {
        Constraint::Or(vec![self, other])
    }

    pub fn implies(self, consequent: Constraint) -> Constraint {
        Constraint::Implies(Box::new(self), Box::new(consequent))
    }

    pub fn iff(self, other: Constraint) -> Constraint {
        Constraint::Iff(Box::new(self), Box::new(other))
    }
}

impl Not for Constraint {
    type Output = Constraint;

    fn not(self) -> Self::Output {
        Constraint::Not(Box::new(self))
    }
}

fn compare(relation: Relation, lhs: impl Into<Expression>, rhs: impl Into<Expression>) -> Constraint {
    Constraint::Compare {
        relation,
        lhs: lhs.into(),
        rhs: rhs.into(),
    }
}

/// Creates the constraint `lhs == rhs`.
pub fn equals(lhs: impl Into<Expression>, rhs: impl Into<Expression>) -> Constraint {
    compare(Relation::Equal, lhs, rhs)
}

/// Creates the constraint `lhs != rhs`.
pub fn not_equals(lhs: impl Into<Expression>, rhs: impl Into<Expression>) -> Constraint {
    compare(Relation::NotEqual, lhs, rhs)
}

/// Creates the constraint `lhs <= rhs`.
pub fn less_than_or_equals(lhs: impl Into<Expression>, rhs: impl Into<Expression>) -> Constraint {
    compare(Relation::LessThanOrEqual, lhs, rhs)
}

/// Creates the constraint `lhs < rhs`.
///
/// Between integer expressions this is `lhs <= rhs - 1`; when a real variable is involved it is
/// treated as `lhs <= rhs`.
pub fn less_than(lhs: impl Into<Expression>, rhs: impl Into<Expression>) -> Constraint {
    compare(Relation::LessThan, lhs, rhs)
}

/// Creates the constraint `lhs >= rhs`.
pub fn greater_than_or_equals(
    lhs: impl Into<Expression>,
    rhs: impl Into<Expression>,
) -> Constraint {
    compare(Relation::LessThanOrEqual, rhs, lhs)
}

/// Creates the constraint `lhs > rhs`.
pub fn greater_than(lhs: impl Into<Expression>, rhs: impl Into<Expression>) -> Constraint {
    compare(Relation::LessThan, rhs, lhs)
}

/// Creates the conjunction of the given constraints.
pub fn conjunction(constraints: impl IntoIterator<Item = Constraint>) -> Constraint {
    Constraint::And(constraints.into_iter().collect())
}

/// Creates the disjunction of the given constraints.
pub fn disjunction(constraints: impl IntoIterator<Item = Constraint>) -> Constraint {
    Constraint::Or(constraints.into_iter().collect())
}

/// Creates the constraint stating that the 0/1 variable `variable` is 1.
pub fn literal(variable: VarId) -> Constraint {
    Constraint::Literal(variable)
}

/// Creates a pairwise disequality between all `variables`.
pub fn all_different(variables: &[VarId]) -> Constraint {
    let mut pairs = Vec::new();
    for (index, &first) in variables.iter().enumerate() {
        for &second in &variables[index + 1..] {
            pairs.push(not_equals(first, second));
        }
    }
    conjunction(pairs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn greater_than_swaps_the_operands() {
        let x = VarId::new(0);

        assert_eq!(
            greater_than(x, 3),
            Constraint::Compare {
                relation: Relation::LessThan,
                lhs: Expression::Constant(3.0),
                rhs: Expression::Variable(x),
            }
        );
    }

    #[test]
    fn all_different_creates_every_pair_once() {
        let variables = [VarId::new(0), VarId::new(1), VarId::new(2)];

        let Constraint::And(pairs) = all_different(&variables) else {
            panic!("expected a conjunction");
        };

        assert_eq!(pairs.len(), 3);
    }
}

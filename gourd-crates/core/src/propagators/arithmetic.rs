//! Forward evaluation and backward projection of expressions over interval domains.
//!
//! Projecting an expression onto a target interval narrows the variables in it such that every
//! assignment which keeps the expression inside the target is preserved. Every occurrence of a
//! variable is narrowed separately, which gives bounds consistency on expressions where each
//! variable occurs once.
use crate::basic_types::Inconsistency;
use crate::basic_types::Interval;
use crate::basic_types::PropagationStatus;
use crate::constraints::Expression;
use crate::engine::VariableStore;

/// Relative slack for checking that a constant lies in a target interval computed in floating
/// point.
const CONSTANT_TOLERANCE: f64 = 1e-9;

pub(crate) fn evaluate(expression: &Expression, store: &VariableStore) -> Interval {
    expression.evaluate_with(&|variable| store.bounds(variable))
}

pub(crate) fn project(
    expression: &Expression,
    target: Interval,
    store: &mut VariableStore,
) -> PropagationStatus {
    match expression {
        Expression::Variable(variable) => {
            let _ = store.tighten(*variable, target)?;
            Ok(())
        }
        Expression::Constant(value) => {
            let slack = CONSTANT_TOLERANCE * value.abs().max(1.0);
            if target.is_disjoint_from(Interval::point(*value), slack) {
                Err(Inconsistency::Violated)
            } else {
                Ok(())
            }
        }
        Expression::Sum(lhs, rhs) => {
            let rhs_bounds = evaluate(rhs, store);
            project(lhs, target - rhs_bounds, store)?;

            let lhs_bounds = evaluate(lhs, store);
            project(rhs, target - lhs_bounds, store)
        }
        Expression::Scaled(inner, factor) => {
            if *factor == 0.0 {
                if target.contains_zero() {
                    Ok(())
                } else {
                    Err(Inconsistency::Violated)
                }
            } else {
                project(inner, target.scale(1.0 / factor), store)
            }
        }
        Expression::Quotient(dividend, divisor) => {
            let divisor_bounds = evaluate(divisor, store);
            if divisor_bounds.contains_zero() {
                return Ok(());
            }
            project(dividend, target * divisor_bounds, store)?;

            // divisor = dividend / quotient, which only narrows when the quotient excludes zero
            if !target.contains_zero() {
                let dividend_bounds = evaluate(dividend, store);
                project(divisor, dividend_bounds.divide(target), store)?;
            }
            Ok(())
        }
    }
}

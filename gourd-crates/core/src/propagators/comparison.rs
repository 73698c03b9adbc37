use super::arithmetic::evaluate;
use super::arithmetic::project;
use crate::basic_types::Inconsistency;
use crate::basic_types::Interval;
use crate::basic_types::PropagationStatus;
use crate::constraints::Expression;
use crate::constraints::Relation;
use crate::engine::variables::VarId;
use crate::engine::VariableStore;

/// A reified comparison `truth <-> (lhs relation rhs)`.
#[derive(Clone, Debug)]
pub(crate) struct Comparison {
    pub(crate) relation: Relation,
    pub(crate) lhs: Expression,
    pub(crate) rhs: Expression,
    /// Both sides can only take integer values, so strict comparisons can be shifted by one.
    pub(crate) integral: bool,
    /// How far apart two real values may be while still counting as equal.
    pub(crate) tolerance: f64,
}

impl Comparison {
    pub(crate) fn new(relation: Relation, lhs: Expression, rhs: Expression, store: &VariableStore) -> Self {
        let variables = lhs
            .variables()
            .into_iter()
            .chain(rhs.variables())
            .collect::<Vec<_>>();
        let integral = variables.iter().all(|&variable| store.is_integer(variable))
            && is_integral(&lhs)
            && is_integral(&rhs);
        let tolerance = variables
            .iter()
            .map(|&variable| store.epsilon(variable))
            .sum::<f64>();

        Comparison {
            relation,
            lhs,
            rhs,
            integral,
            tolerance,
        }
    }
}

/// Whether the expression yields integers once its (integer) variables are fixed.
fn is_integral(expression: &Expression) -> bool {
    match expression {
        Expression::Variable(_) => true,
        Expression::Constant(value) => value.fract() == 0.0,
        Expression::Sum(lhs, rhs) => is_integral(lhs) && is_integral(rhs),
        Expression::Scaled(inner, factor) => factor.fract() == 0.0 && is_integral(inner),
        Expression::Quotient(_, _) => false,
    }
}

pub(crate) fn propagate_comparison(
    comparison: &Comparison,
    truth: VarId,
    posted: bool,
    store: &mut VariableStore,
) -> PropagationStatus {
    if posted {
        let _ = store.fix_boolean(truth, true)?;
    }

    match store.boolean_value(truth) {
        Some(true) => enforce(
            comparison.relation,
            &comparison.lhs,
            &comparison.rhs,
            comparison,
            store,
        ),
        Some(false) => {
            let (relation, lhs, rhs) = negate(comparison);
            enforce(relation, lhs, rhs, comparison, store)
        }
        None => {
            if let Some(entailed) = entailment(comparison, store) {
                let _ = store.fix_boolean(truth, entailed)?;
            }
            Ok(())
        }
    }
}

/// The negated comparison, with operands swapped where needed so only the four relations are
/// used.
fn negate(comparison: &Comparison) -> (Relation, &Expression, &Expression) {
    let lhs = &comparison.lhs;
    let rhs = &comparison.rhs;
    match comparison.relation {
        Relation::Equal => (Relation::NotEqual, lhs, rhs),
        Relation::NotEqual => (Relation::Equal, lhs, rhs),
        Relation::LessThanOrEqual => (Relation::LessThan, rhs, lhs),
        Relation::LessThan => (Relation::LessThanOrEqual, rhs, lhs),
    }
}

fn strict_gap(comparison: &Comparison) -> f64 {
    if comparison.integral {
        1.0
    } else {
        0.0
    }
}

fn enforce(
    relation: Relation,
    lhs: &Expression,
    rhs: &Expression,
    comparison: &Comparison,
    store: &mut VariableStore,
) -> PropagationStatus {
    match relation {
        Relation::Equal => {
            let rhs_bounds = evaluate(rhs, store);
            project(lhs, rhs_bounds, store)?;
            let lhs_bounds = evaluate(lhs, store);
            project(rhs, lhs_bounds, store)
        }
        Relation::LessThanOrEqual => enforce_at_most(lhs, rhs, 0.0, store),
        Relation::LessThan => enforce_at_most(lhs, rhs, strict_gap(comparison), store),
        Relation::NotEqual => enforce_not_equal(lhs, rhs, comparison, store),
    }
}

/// Enforces `lhs + gap <= rhs`.
fn enforce_at_most(
    lhs: &Expression,
    rhs: &Expression,
    gap: f64,
    store: &mut VariableStore,
) -> PropagationStatus {
    let rhs_bounds = evaluate(rhs, store);
    project(lhs, Interval::at_most(rhs_bounds.upper - gap), store)?;
    let lhs_bounds = evaluate(lhs, store);
    project(rhs, Interval::at_least(lhs_bounds.lower + gap), store)
}

fn enforce_not_equal(
    lhs: &Expression,
    rhs: &Expression,
    comparison: &Comparison,
    store: &mut VariableStore,
) -> PropagationStatus {
    let lhs_bounds = evaluate(lhs, store);
    let rhs_bounds = evaluate(rhs, store);
    let lhs_fixed = lhs_bounds.width() <= comparison.tolerance;
    let rhs_fixed = rhs_bounds.width() <= comparison.tolerance;

    if lhs_fixed && rhs_fixed {
        return if lhs_bounds.is_disjoint_from(rhs_bounds, comparison.tolerance) {
            Ok(())
        } else {
            Err(Inconsistency::Violated)
        };
    }

    if comparison.integral {
        if let (Some(variable), true) = (lhs.as_variable(), rhs_fixed) {
            let _ = store.remove_value(variable, rhs_bounds.lower.round() as i32)?;
        } else if let (Some(variable), true) = (rhs.as_variable(), lhs_fixed) {
            let _ = store.remove_value(variable, lhs_bounds.lower.round() as i32)?;
        }
    }
    Ok(())
}

/// Whether the comparison is decided by the current domains.
fn entailment(comparison: &Comparison, store: &VariableStore) -> Option<bool> {
    let lhs_bounds = evaluate(&comparison.lhs, store);
    let rhs_bounds = evaluate(&comparison.rhs, store);

    match comparison.relation {
        Relation::LessThanOrEqual => at_most_entailment(lhs_bounds, rhs_bounds, 0.0),
        Relation::LessThan => at_most_entailment(lhs_bounds, rhs_bounds, strict_gap(comparison)),
        Relation::Equal => equality_entailment(comparison, lhs_bounds, rhs_bounds, store),
        Relation::NotEqual => {
            equality_entailment(comparison, lhs_bounds, rhs_bounds, store).map(|equal| !equal)
        }
    }
}

fn at_most_entailment(lhs_bounds: Interval, rhs_bounds: Interval, gap: f64) -> Option<bool> {
    if lhs_bounds.upper + gap <= rhs_bounds.lower {
        Some(true)
    } else if lhs_bounds.lower + gap > rhs_bounds.upper {
        Some(false)
    } else {
        None
    }
}

fn equality_entailment(
    comparison: &Comparison,
    lhs_bounds: Interval,
    rhs_bounds: Interval,
    store: &VariableStore,
) -> Option<bool> {
    if lhs_bounds.is_disjoint_from(rhs_bounds, comparison.tolerance) {
        return Some(false);
    }

    let lhs_fixed = lhs_bounds.width() <= comparison.tolerance;
    let rhs_fixed = rhs_bounds.width() <= comparison.tolerance;
    if lhs_fixed && rhs_fixed {
        return Some(true);
    }

    // a bare integer variable against a fixed value can also be decided by its holes
    if comparison.integral {
        let excluded = |variable: VarId, value: f64| {
            store
                .integer_domain(variable)
                .is_some_and(|domain| !domain.contains(value.round() as i32))
        };
        if let (Some(variable), true) = (comparison.lhs.as_variable(), rhs_fixed) {
            if excluded(variable, rhs_bounds.lower) {
                return Some(false);
            }
        }
        if let (Some(variable), true) = (comparison.rhs.as_variable(), lhs_fixed) {
            if excluded(variable, lhs_bounds.lower) {
                return Some(false);
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraints::sum;
    use crate::engine::variables::DomainSpec;
    use crate::engine::VariableOrigin;

    fn integer(store: &mut VariableStore, lower: i32, upper: i32) -> VarId {
        store
            .grow_integer(&DomainSpec::interval(lower, upper), VariableOrigin::Model)
            .expect("valid domain")
    }

    fn truth_variable(store: &mut VariableStore) -> VarId {
        store
            .grow_integer(&DomainSpec::boolean(), VariableOrigin::Reification)
            .expect("valid domain")
    }

    #[test]
    fn posted_strict_comparison_between_integers_is_shifted() {
        let mut store = VariableStore::default();
        let x = integer(&mut store, 0, 10);
        let y = integer(&mut store, 0, 5);
        let truth = truth_variable(&mut store);
        let comparison = Comparison::new(Relation::LessThan, x.into(), y.into(), &store);

        propagate_comparison(&comparison, truth, true, &mut store).expect("consistent");

        assert_eq!(store.bounds(x), Interval::new(0.0, 4.0));
        assert_eq!(store.bounds(y), Interval::new(1.0, 5.0));
        assert_eq!(store.boolean_value(truth), Some(true));
    }

    #[test]
    fn false_truth_enforces_the_negation() {
        let mut store = VariableStore::default();
        let x = integer(&mut store, 0, 10);
        let truth = truth_variable(&mut store);
        let _ = store.fix_boolean(truth, false).expect("non-empty domain");
        let comparison =
            Comparison::new(Relation::LessThanOrEqual, x.into(), Expression::Constant(3.0), &store);

        propagate_comparison(&comparison, truth, false, &mut store).expect("consistent");

        assert_eq!(store.bounds(x), Interval::new(4.0, 10.0));
    }

    #[test]
    fn entailment_fixes_the_truth_variable() {
        let mut store = VariableStore::default();
        let x = integer(&mut store, 0, 3);
        let y = integer(&mut store, 5, 8);
        let truth = truth_variable(&mut store);
        let comparison = Comparison::new(Relation::Equal, x.into(), y.into(), &store);

        propagate_comparison(&comparison, truth, false, &mut store).expect("consistent");

        assert_eq!(store.boolean_value(truth), Some(false));
    }

    #[test]
    fn disequality_removes_the_fixed_value() {
        let mut store = VariableStore::default();
        let x = integer(&mut store, 0, 4);
        let y = integer(&mut store, 2, 2);
        let truth = truth_variable(&mut store);
        let comparison = Comparison::new(Relation::NotEqual, x.into(), y.into(), &store);

        propagate_comparison(&comparison, truth, true, &mut store).expect("consistent");

        assert!(!store.integer_domain(x).expect("integer").contains(2));
    }

    #[test]
    fn disequality_between_equal_fixed_sides_is_violated() {
        let mut store = VariableStore::default();
        let x = integer(&mut store, 1, 1);
        let y = integer(&mut store, 0, 0);
        let truth = truth_variable(&mut store);
        let comparison =
            Comparison::new(Relation::NotEqual, sum(x, y), Expression::Constant(1.0), &store);

        let result = propagate_comparison(&comparison, truth, true, &mut store);

        assert_eq!(result, Err(Inconsistency::Violated));
    }

    #[test]
    fn real_upper_bound_from_constant() {
        let mut store = VariableStore::default();
        let x = store.grow_real(0.0, 10.0, 0.01).expect("valid domain");
        let truth = truth_variable(&mut store);
        let comparison =
            Comparison::new(Relation::LessThanOrEqual, x.into(), Expression::Constant(5.0), &store);

        propagate_comparison(&comparison, truth, true, &mut store).expect("consistent");

        assert_eq!(store.bounds(x), Interval::new(0.0, 5.0));
        assert!(!comparison.integral);
    }
}

//! Propagation for the boolean connectives. Every node relates its own 0/1 truth variable to the
//! truth variables of its operands.
use crate::basic_types::Inconsistency;
use crate::basic_types::PropagationStatus;
use crate::engine::variables::VarId;
use crate::engine::VariableStore;

fn fix_if_posted(truth: VarId, posted: bool, store: &mut VariableStore) -> PropagationStatus {
    if posted {
        let _ = store.fix_boolean(truth, true)?;
    }
    Ok(())
}

/// A literal on its own only has something to enforce once posted.
pub(crate) fn propagate_literal(truth: VarId, posted: bool, store: &mut VariableStore) -> PropagationStatus {
    fix_if_posted(truth, posted, store)
}

/// `truth <-> (operands[0] /\ operands[1] /\ ...)`
pub(crate) fn propagate_conjunction(
    operands: &[VarId],
    truth: VarId,
    posted: bool,
    store: &mut VariableStore,
) -> PropagationStatus {
    fix_if_posted(truth, posted, store)?;
    propagate_junction(operands, truth, true, store)
}

/// `truth <-> (operands[0] \/ operands[1] \/ ...)`
pub(crate) fn propagate_disjunction(
    operands: &[VarId],
    truth: VarId,
    posted: bool,
    store: &mut VariableStore,
) -> PropagationStatus {
    fix_if_posted(truth, posted, store)?;
    propagate_junction(operands, truth, false, store)
}

/// Shared propagation of conjunction and disjunction. A disjunction is a conjunction with every
/// value flipped, `neutral` is the value which does not decide the junction on its own (true for
/// a conjunction).
fn propagate_junction(
    operands: &[VarId],
    truth: VarId,
    neutral: bool,
    store: &mut VariableStore,
) -> PropagationStatus {
    match store.boolean_value(truth) {
        Some(value) if value == neutral => {
            for &operand in operands {
                let _ = store.fix_boolean(operand, neutral)?;
            }
            Ok(())
        }
        Some(_) => {
            // at least one operand must take the deciding value
            let mut unassigned = None;
            let mut num_unassigned = 0;
            for &operand in operands {
                match store.boolean_value(operand) {
                    Some(value) if value != neutral => return Ok(()),
                    Some(_) => {}
                    None => {
                        num_unassigned += 1;
                        unassigned = Some(operand);
                    }
                }
            }
            match (num_unassigned, unassigned) {
                (0, _) => Err(Inconsistency::Violated),
                (1, Some(operand)) => {
                    let _ = store.fix_boolean(operand, !neutral)?;
                    Ok(())
                }
                _ => Ok(()),
            }
        }
        None => {
            let mut all_neutral = true;
            for &operand in operands {
                match store.boolean_value(operand) {
                    Some(value) if value != neutral => {
                        let _ = store.fix_boolean(truth, !neutral)?;
                        return Ok(());
                    }
                    Some(_) => {}
                    None => all_neutral = false,
                }
            }
            if all_neutral {
                let _ = store.fix_boolean(truth, neutral)?;
            }
            Ok(())
        }
    }
}

/// `truth <-> !operand`
pub(crate) fn propagate_negation(
    operand: VarId,
    truth: VarId,
    posted: bool,
    store: &mut VariableStore,
) -> PropagationStatus {
    fix_if_posted(truth, posted, store)?;

    if let Some(value) = store.boolean_value(truth) {
        let _ = store.fix_boolean(operand, !value)?;
    } else if let Some(value) = store.boolean_value(operand) {
        let _ = store.fix_boolean(truth, !value)?;
    }
    Ok(())
}

/// `truth <-> (antecedent -> consequent)`
pub(crate) fn propagate_implication(
    antecedent: VarId,
    consequent: VarId,
    truth: VarId,
    posted: bool,
    store: &mut VariableStore,
) -> PropagationStatus {
    fix_if_posted(truth, posted, store)?;

    let antecedent_value = store.boolean_value(antecedent);
    let consequent_value = store.boolean_value(consequent);
    match store.boolean_value(truth) {
        Some(true) => {
            if antecedent_value == Some(true) {
                let _ = store.fix_boolean(consequent, true)?;
            } else if consequent_value == Some(false) {
                let _ = store.fix_boolean(antecedent, false)?;
            }
        }
        Some(false) => {
            let _ = store.fix_boolean(antecedent, true)?;
            let _ = store.fix_boolean(consequent, false)?;
        }
        None => {
            if antecedent_value == Some(false) || consequent_value == Some(true) {
                let _ = store.fix_boolean(truth, true)?;
            } else if antecedent_value == Some(true) && consequent_value == Some(false) {
                let _ = store.fix_boolean(truth, false)?;
            }
        }
    }
    Ok(())
}

/// `truth <-> (left <-> right)`
pub(crate) fn propagate_equivalence(
    left: VarId,
    right: VarId,
    truth: VarId,
    posted: bool,
    store: &mut VariableStore,
) -> PropagationStatus {
    fix_if_posted(truth, posted, store)?;

    match (
        store.boolean_value(truth),
        store.boolean_value(left),
        store.boolean_value(right),
    ) {
        (_, Some(left_value), Some(right_value)) => {
            let _ = store.fix_boolean(truth, left_value == right_value)?;
        }
        (Some(equivalent), Some(left_value), None) => {
            let _ = store.fix_boolean(right, left_value == equivalent)?;
        }
        (Some(equivalent), None, Some(right_value)) => {
            let _ = store.fix_boolean(left, right_value == equivalent)?;
        }
        _ => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::variables::DomainSpec;
    use crate::engine::VariableOrigin;

    fn booleans(store: &mut VariableStore, count: usize) -> Vec<VarId> {
        (0..count)
            .map(|_| {
                store
                    .grow_integer(&DomainSpec::boolean(), VariableOrigin::Model)
                    .expect("valid domain")
            })
            .collect()
    }

    #[test]
    fn posted_conjunction_fixes_every_operand() {
        let mut store = VariableStore::default();
        let variables = booleans(&mut store, 3);

        propagate_conjunction(&variables[..2], variables[2], true, &mut store).expect("consistent");

        assert_eq!(store.boolean_value(variables[0]), Some(true));
        assert_eq!(store.boolean_value(variables[1]), Some(true));
    }

    #[test]
    fn false_conjunction_with_one_open_operand_falsifies_it() {
        let mut store = VariableStore::default();
        let variables = booleans(&mut store, 3);
        let _ = store.fix_boolean(variables[0], true).expect("non-empty domain");
        let _ = store.fix_boolean(variables[2], false).expect("non-empty domain");

        propagate_conjunction(&variables[..2], variables[2], false, &mut store)
            .expect("consistent");

        assert_eq!(store.boolean_value(variables[1]), Some(false));
    }

    #[test]
    fn disjunction_becomes_true_once_an_operand_is_true() {
        let mut store = VariableStore::default();
        let variables = booleans(&mut store, 3);
        let _ = store.fix_boolean(variables[1], true).expect("non-empty domain");

        propagate_disjunction(&variables[..2], variables[2], false, &mut store)
            .expect("consistent");

        assert_eq!(store.boolean_value(variables[2]), Some(true));
    }

    #[test]
    fn posted_disjunction_with_all_operands_false_is_violated() {
        let mut store = VariableStore::default();
        let variables = booleans(&mut store, 3);
        let _ = store.fix_boolean(variables[0], false).expect("non-empty domain");
        let _ = store.fix_boolean(variables[1], false).expect("non-empty domain");

        let result = propagate_disjunction(&variables[..2], variables[2], true, &mut store);

        assert_eq!(result, Err(Inconsistency::Violated));
    }

    #[test]
    fn empty_conjunction_is_true() {
        let mut store = VariableStore::default();
        let truth = booleans(&mut store, 1)[0];

        propagate_conjunction(&[], truth, false, &mut store).expect("consistent");

        assert_eq!(store.boolean_value(truth), Some(true));
    }

    #[test]
    fn implication_propagates_forwards_and_backwards() {
        let mut store = VariableStore::default();
        let variables = booleans(&mut store, 3);
        let (antecedent, consequent, truth) = (variables[0], variables[1], variables[2]);
        let _ = store.fix_boolean(consequent, false).expect("non-empty domain");

        propagate_implication(antecedent, consequent, truth, true, &mut store)
            .expect("consistent");

        assert_eq!(store.boolean_value(antecedent), Some(false));
    }

    #[test]
    fn false_implication_fixes_both_sides() {
        let mut store = VariableStore::default();
        let variables = booleans(&mut store, 3);
        let _ = store.fix_boolean(variables[2], false).expect("non-empty domain");

        propagate_implication(variables[0], variables[1], variables[2], false, &mut store)
            .expect("consistent");

        assert_eq!(store.boolean_value(variables[0]), Some(true));
        assert_eq!(store.boolean_value(variables[1]), Some(false));
    }

    #[test]
    fn equivalence_copies_values() {
        let mut store = VariableStore::default();
        let variables = booleans(&mut store, 3);
        let _ = store.fix_boolean(variables[0], false).expect("non-empty domain");

        propagate_equivalence(variables[0], variables[1], variables[2], true, &mut store)
            .expect("consistent");

        assert_eq!(store.boolean_value(variables[1]), Some(false));
    }

    #[test]
    fn negation_fixes_the_truth_from_the_operand() {
        let mut store = VariableStore::default();
        let variables = booleans(&mut store, 2);
        let _ = store.fix_boolean(variables[0], true).expect("non-empty domain");

        propagate_negation(variables[0], variables[1], false, &mut store).expect("consistent");

        assert_eq!(store.boolean_value(variables[1]), Some(false));
    }
}

use crate::basic_types::Inconsistency;
use crate::basic_types::PropagationStatus;
use crate::engine::predicates::Predicate;
use crate::engine::VariableStore;

/// Propagates the nogood `!(p_1 /\ ... /\ p_n)`.
///
/// The nogood is violated once every predicate holds. When all but one predicate hold, the
/// negation of the remaining one is posted.
pub(crate) fn propagate_nogood(predicates: &[Predicate], store: &mut VariableStore) -> PropagationStatus {
    let mut undecided = None;
    let mut num_undecided = 0;

    for &predicate in predicates {
        match store.evaluate_predicate(predicate) {
            Some(false) => return Ok(()),
            Some(true) => {}
            None => {
                num_undecided += 1;
                undecided = Some(predicate);
            }
        }
    }

    match (num_undecided, undecided) {
        (0, _) => Err(Inconsistency::Violated),
        (1, Some(predicate)) => {
            let _ = store.post(!predicate)?;
            Ok(())
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basic_types::Interval;
    use crate::engine::variables::DomainSpec;
    use crate::engine::VariableOrigin;
    use crate::predicate;

    #[test]
    fn unit_nogood_posts_the_negated_predicate() {
        let mut store = VariableStore::default();
        let x = store
            .grow_integer(&DomainSpec::interval(0, 5), VariableOrigin::Model)
            .expect("valid domain");
        let y = store
            .grow_integer(&DomainSpec::interval(0, 5), VariableOrigin::Model)
            .expect("valid domain");
        let _ = store.post(predicate![x == 1]).expect("non-empty domain");

        propagate_nogood(&[predicate![x == 1], predicate![y >= 3]], &mut store)
            .expect("consistent");

        assert_eq!(store.bounds(y), Interval::new(0.0, 2.0));
    }

    #[test]
    fn satisfied_nogood_is_violated() {
        let mut store = VariableStore::default();
        let x = store
            .grow_integer(&DomainSpec::interval(0, 5), VariableOrigin::Model)
            .expect("valid domain");
        let _ = store.post(predicate![x <= 2]).expect("non-empty domain");

        let result = propagate_nogood(&[predicate![x <= 3]], &mut store);

        assert_eq!(result, Err(Inconsistency::Violated));
    }
}

use crate::containers::HashSet;
use crate::gourd_assert_moderate;

/// The values an integer variable may take: an interval with holes punched in it.
///
/// Holes outside the bounds are kept around; they are needed again when the bounds are restored.
#[derive(Clone, Debug)]
pub(crate) struct IntegerDomain {
    lower_bound: i32,
    upper_bound: i32,
    holes: HashSet<i32>,
}

impl IntegerDomain {
    pub(crate) fn new(lower_bound: i32, upper_bound: i32) -> Self {
        gourd_assert_moderate!(lower_bound <= upper_bound);
        IntegerDomain {
            lower_bound,
            upper_bound,
            holes: HashSet::default(),
        }
    }

    /// Creates the domain containing exactly `values`, which must be sorted and non-empty.
    pub(crate) fn from_sorted_values(values: &[i32]) -> Self {
        let mut domain = IntegerDomain::new(values[0], values[values.len() - 1]);
        for window in values.windows(2) {
            for hole in window[0] + 1..window[1] {
                let _ = domain.holes.insert(hole);
            }
        }
        domain
    }

    pub(crate) fn lower_bound(&self) -> i32 {
        self.lower_bound
    }

    pub(crate) fn upper_bound(&self) -> i32 {
        self.upper_bound
    }

    pub(crate) fn contains(&self, value: i32) -> bool {
        self.lower_bound <= value && value <= self.upper_bound && !self.holes.contains(&value)
    }

    pub(crate) fn is_fixed(&self) -> bool {
        self.lower_bound == self.upper_bound
    }

    pub(crate) fn size(&self) -> u64 {
        let span = (self.upper_bound as i64 - self.lower_bound as i64 + 1) as u64;
        let holes_within_bounds = self
            .holes
            .iter()
            .filter(|&&hole| self.lower_bound < hole && hole < self.upper_bound)
            .count() as u64;
        span - holes_within_bounds
    }

    /// The values of the domain in increasing order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = i32> + '_ {
        (self.lower_bound..=self.upper_bound).filter(|value| !self.holes.contains(value))
    }

    /// The holes strictly between the bounds, in increasing order.
    pub(crate) fn holes_within_bounds(&self) -> Vec<i32> {
        let mut holes = self
            .holes
            .iter()
            .copied()
            .filter(|&hole| self.lower_bound < hole && hole < self.upper_bound)
            .collect::<Vec<_>>();
        holes.sort_unstable();
        holes
    }

    /// The smallest value of the domain which is at least `value`, if any.
    pub(crate) fn first_value_from(&self, value: i32) -> Option<i32> {
        let mut candidate = value.max(self.lower_bound);
        while candidate <= self.upper_bound {
            if !self.holes.contains(&candidate) {
                return Some(candidate);
            }
            candidate += 1;
        }
        None
    }

    /// The largest value of the domain which is at most `value`, if any.
    pub(crate) fn last_value_up_to(&self, value: i32) -> Option<i32> {
        let mut candidate = value.min(self.upper_bound);
        while candidate >= self.lower_bound {
            if !self.holes.contains(&candidate) {
                return Some(candidate);
            }
            candidate -= 1;
        }
        None
    }

    pub(crate) fn set_bounds(&mut self, lower_bound: i32, upper_bound: i32) {
        self.lower_bound = lower_bound;
        self.upper_bound = upper_bound;
    }

    pub(crate) fn insert_hole(&mut self, value: i32) {
        let _ = self.holes.insert(value);
    }

    pub(crate) fn remove_hole(&mut self, value: i32) {
        let _ = self.holes.remove(&value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_values_become_bounds_with_holes() {
        let domain = IntegerDomain::from_sorted_values(&[1, 4, 6]);

        assert_eq!(domain.lower_bound(), 1);
        assert_eq!(domain.upper_bound(), 6);
        assert_eq!(domain.iter().collect::<Vec<_>>(), vec![1, 4, 6]);
        assert_eq!(domain.size(), 3);
        assert_eq!(domain.holes_within_bounds(), vec![2, 3, 5]);
    }

    #[test]
    fn value_search_skips_holes() {
        let domain = IntegerDomain::from_sorted_values(&[1, 4, 6]);

        assert_eq!(domain.first_value_from(2), Some(4));
        assert_eq!(domain.last_value_up_to(5), Some(4));
        assert_eq!(domain.first_value_from(7), None);
        assert_eq!(domain.last_value_up_to(0), None);
    }

    #[test]
    fn holes_outside_the_bounds_do_not_count_towards_the_size() {
        let mut domain = IntegerDomain::new(0, 10);
        domain.insert_hole(3);
        domain.set_bounds(4, 10);

        assert_eq!(domain.size(), 7);
        assert!(!domain.contains(3));
    }
}

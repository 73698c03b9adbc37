use std::fmt::Debug;
use std::ops::Range;

use rand::rngs::SmallRng;
use rand::Rng;

use crate::gourd_assert_simple;

/// Abstraction over the source of randomness used during search.
///
/// The solver owns a seeded [`SmallRng`], so runs with the same seed make the same random
/// choices.
pub trait Random: Debug {
    /// Generates a bool which is true with probability `probability`, which must lie in
    /// `[0, 1]`.
    fn generate_bool(&mut self, probability: f64) -> bool;

    /// Generates a usize in `[range.start, range.end)` with equal probability.
    fn generate_usize_in_range(&mut self, range: Range<usize>) -> usize;
}

impl Random for SmallRng {
    fn generate_bool(&mut self, probability: f64) -> bool {
        gourd_assert_simple!(
            (0.0..=1.0).contains(&probability),
            "probability {probability} is not in [0, 1]"
        );
        self.gen_bool(probability)
    }

    fn generate_usize_in_range(&mut self, range: Range<usize>) -> usize {
        self.gen_range(range)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// A [`Random`] which replays a fixed list of outcomes.
    #[derive(Debug, Default)]
    pub(crate) struct TestRandom {
        pub(crate) usizes: Vec<usize>,
        pub(crate) bools: Vec<bool>,
    }

    impl Random for TestRandom {
        fn generate_bool(&mut self, _probability: f64) -> bool {
            self.bools.remove(0)
        }

        fn generate_usize_in_range(&mut self, range: Range<usize>) -> usize {
            let selected = self.usizes.remove(0);
            assert!(range.contains(&selected));
            selected
        }
    }

    #[test]
    fn seeded_generators_agree() {
        use rand::SeedableRng;

        let mut first = SmallRng::seed_from_u64(42);
        let mut second = SmallRng::seed_from_u64(42);

        for _ in 0..10 {
            assert_eq!(
                first.generate_usize_in_range(0..100),
                second.generate_usize_in_range(0..100)
            );
        }
    }
}

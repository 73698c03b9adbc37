#[cfg(doc)]
use crate::Solver;

/// Options for the [`Solver`] which determine how it behaves.
#[derive(Debug, Clone, Copy)]
pub struct SolverOptions {
    /// The seed of the random number generator which is handed to branchers; runs with the same
    /// seed make the same random choices.
    pub random_seed: u64,
    /// The options related to explanations and learned nogoods.
    pub learning: LearningOptions,
    /// Whether [`Solver::log_statistics`] also logs propagation and learning statistics.
    pub verbose_statistics: bool,
}

impl Default for SolverOptions {
    fn default() -> Self {
        SolverOptions {
            random_seed: 42,
            learning: LearningOptions::default(),
            verbose_statistics: false,
        }
    }
}

/// Options related to explanations, see [`Solver::get_explanation`].
#[derive(Debug, Clone, Copy)]
pub struct LearningOptions {
    /// Whether an explained conflict is added to the model as a nogood, so that later search
    /// fails on it without deriving it again.
    pub learn_explanations: bool,
}

impl Default for LearningOptions {
    fn default() -> Self {
        LearningOptions {
            learn_explanations: true,
        }
    }
}

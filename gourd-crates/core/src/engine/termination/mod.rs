mod combinator;
mod decision_budget;
mod indefinite;
mod time_budget;

pub use combinator::*;
pub use decision_budget::*;
pub use indefinite::*;
pub use time_budget::*;

/// Decides when a search gives up before it has found a solution or exhausted the search space.
///
/// The search asks [`TerminationCondition::should_stop`] before every node. A search which is
/// stopped reports that its outcome is unknown and can be resumed later with a fresh condition.
pub trait TerminationCondition {
    fn should_stop(&mut self) -> bool;

    /// Called after the search commits to a decision, before the decision is propagated.
    fn decision_has_been_made(&mut self) {}
}

/// `None` never stops the search.
impl<T: TerminationCondition> TerminationCondition for Option<T> {
    fn should_stop(&mut self) -> bool {
        match self {
            Some(condition) => condition.should_stop(),
            None => false,
        }
    }

    fn decision_has_been_made(&mut self) {
        if let Some(condition) = self {
            condition.decision_has_been_made()
        }
    }
}

impl<T: TerminationCondition + ?Sized> TerminationCondition for &mut T {
    fn should_stop(&mut self) -> bool {
        (**self).should_stop()
    }

    fn decision_has_been_made(&mut self) {
        (**self).decision_has_been_made()
    }
}

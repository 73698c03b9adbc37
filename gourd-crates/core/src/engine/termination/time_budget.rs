use std::time::Duration;
use std::time::Instant;

use super::TerminationCondition;

/// Stops the search once a wall-clock deadline has passed.
///
/// The deadline is fixed when the budget is created, so a search which is resumed with the same
/// budget only gets the time that is left.
#[derive(Clone, Copy, Debug)]
pub struct TimeBudget {
    deadline: Instant,
}

impl TimeBudget {
    pub fn starting_now(budget: Duration) -> TimeBudget {
        TimeBudget {
            deadline: Instant::now() + budget,
        }
    }

    /// The time until the deadline; zero once it has passed.
    pub fn remaining(&self) -> Duration {
        self.deadline.saturating_duration_since(Instant::now())
    }
}

impl TerminationCondition for TimeBudget {
    fn should_stop(&mut self) -> bool {
        Instant::now() >= self.deadline
    }
}

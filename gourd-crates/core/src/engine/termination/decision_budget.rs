use super::TerminationCondition;

/// A [`TerminationCondition`] which triggers once the search has made `budget` decisions.
///
/// The count carries over between calls, so resuming a search with the same budget stops right
/// away; create a new budget to continue.
#[derive(Debug, Copy, Clone)]
pub struct DecisionBudget {
    budget: u64,
    num_decisions: u64,
}

impl DecisionBudget {
    pub fn new(budget: u64) -> Self {
        Self {
            budget,
            num_decisions: 0,
        }
    }

    pub fn num_decisions(&self) -> u64 {
        self.num_decisions
    }
}

impl TerminationCondition for DecisionBudget {
    fn should_stop(&mut self) -> bool {
        self.num_decisions >= self.budget
    }

    fn decision_has_been_made(&mut self) {
        self.num_decisions += 1;
    }
}

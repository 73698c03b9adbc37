use super::TerminationCondition;

/// Stops the search as soon as either of two conditions does, e.g. a [`super::TimeBudget`]
/// together with a [`super::DecisionBudget`]. Both conditions are told about every decision.
#[derive(Clone, Copy, Debug)]
pub struct Combinator<First, Second> {
    first: First,
    second: Second,
}

impl<First, Second> Combinator<First, Second> {
    pub fn new(first: First, second: Second) -> Self {
        Combinator { first, second }
    }
}

impl<First, Second> TerminationCondition for Combinator<First, Second>
where
    First: TerminationCondition,
    Second: TerminationCondition,
{
    fn should_stop(&mut self) -> bool {
        // Both are always polled.
        let first = self.first.should_stop();
        let second = self.second.should_stop();
        first || second
    }

    fn decision_has_been_made(&mut self) {
        self.first.decision_has_been_made();
        self.second.decision_has_been_made();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::termination::DecisionBudget;
    use crate::engine::termination::Indefinite;

    #[test]
    fn stops_once_either_side_stops() {
        let mut combinator = Combinator::new(Indefinite, DecisionBudget::new(1));
        assert!(!combinator.should_stop());

        combinator.decision_has_been_made();

        assert!(combinator.should_stop());
    }
}

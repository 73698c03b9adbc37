use super::TerminationCondition;

/// Lets the search run until it finds a solution or exhausts the search space.
#[derive(Clone, Copy, Debug, Default)]
pub struct Indefinite;

impl TerminationCondition for Indefinite {
    fn should_stop(&mut self) -> bool {
        false
    }
}

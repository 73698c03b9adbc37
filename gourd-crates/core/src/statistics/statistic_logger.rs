use std::fmt::Display;

use itertools::Itertools;

use super::statistic_logging::log_statistic;

/// Logs statistics under a path of names joined by underscores, e.g.
/// `learned_clauses_num_learned_clauses`.
#[derive(Debug, Default, Clone)]
pub struct StatisticLogger {
    path: String,
}

impl StatisticLogger {
    pub fn new<Input: IntoIterator<Item = impl Display>>(path: Input) -> Self {
        Self {
            path: path.into_iter().join("_"),
        }
    }

    /// A logger for the statistic `name` below this one.
    pub fn attach_to_prefix(&self, name: impl Display) -> Self {
        let path = if self.path.is_empty() {
            name.to_string()
        } else {
            format!("{}_{name}", self.path)
        };
        Self { path }
    }

    pub fn log_statistic(&self, value: impl Display) {
        log_statistic(&self.path, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefixes_are_joined_with_underscores() {
        let logger = StatisticLogger::new(["solver", "search"]).attach_to_prefix("decisions");

        assert_eq!(logger.path, "solver_search_decisions");
    }

    #[test]
    fn empty_prefix_is_not_separated() {
        let logger = StatisticLogger::default().attach_to_prefix("conflicts");

        assert_eq!(logger.path, "conflicts");
    }
}

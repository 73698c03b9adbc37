//! Statistics of the [`Solver`], such as the number of decisions and conflicts, and the
//! machinery to log them.
//!
//! Statistics are grouped in structs created by [`create_statistics_struct!`]. Logging a group
//! writes one line per field, named after the path of the field, e.g. `engine_num_decisions`.
pub(crate) mod statistic_logger;
pub(crate) mod statistic_logging;

use std::fmt::Display;

pub use statistic_logger::StatisticLogger;
pub use statistic_logging::configure_statistic_logging;
pub use statistic_logging::log_statistic;
pub use statistic_logging::log_statistic_postfix;
pub use statistic_logging::should_log_statistics;
pub use statistic_logging::StatisticOptions;

#[cfg(doc)]
use crate::Solver;

/// A value, or group of values, which can be logged as statistics.
pub trait Statistic {
    fn log(&self, statistic_logger: StatisticLogger);
}

impl<Value: Display> Statistic for Value {
    fn log(&self, statistic_logger: StatisticLogger) {
        statistic_logger.log_statistic(self);
    }
}

/// Declares a struct of counters which logs every field as a separate statistic.
///
/// # Example
/// ```rust
/// # use gourd_core::create_statistics_struct;
/// create_statistics_struct!(
///     /// Counters of a restart strategy
///     RestartStatistics {
///         num_restarts: u64,
///         /// Conflicts since the last restart
///         num_recent_conflicts: u64,
///     }
/// );
///
/// let mut statistics = RestartStatistics::default();
/// statistics.num_restarts += 1;
/// assert_eq!(statistics.num_recent_conflicts, 0);
/// ```
#[macro_export]
macro_rules! create_statistics_struct {
    ($(#[$struct_documentation:meta])* $name:ident { $($(#[$variable_documentation:meta])* $field:ident : $type:ident),+ $(,)? }) => {
        $(#[$struct_documentation])*
        #[derive(Default, Debug, Copy, Clone, PartialEq, Eq)]
        pub struct $name {
            $($(#[$variable_documentation])* pub $field: $type),+
        }

        impl $crate::statistics::Statistic for $name {
            fn log(&self, statistic_logger: $crate::statistics::StatisticLogger) {
                $(self.$field.log(statistic_logger.attach_to_prefix(stringify!($field)));)+
            }
        }
    };
}

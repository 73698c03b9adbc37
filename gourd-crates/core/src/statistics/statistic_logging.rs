//! Writing statistics as `{prefix} {name}={value}` lines.
//!
//! Nothing is written until [`configure_statistic_logging`] has been called; the configuration is
//! global and fixed by the first call.

use std::fmt::Debug;
use std::fmt::Display;
use std::fmt::Formatter;
use std::io::stdout;
use std::io::Write;
use std::sync::Mutex;
use std::sync::OnceLock;

use convert_case::Case;
use convert_case::Casing;

/// How statistics are written.
///
/// # Example
/// ```rust
/// # use gourd_core::convert_case::Case;
/// # use gourd_core::statistics::StatisticOptions;
/// // Lines such as `%%%mzn-stat: num_decisions=12`, followed by `%%%mzn-stat-end`.
/// let options = StatisticOptions::new("%%%mzn-stat:")
///     .with_casing(Case::Snake)
///     .with_block_end("%%%mzn-stat-end");
/// ```
pub struct StatisticOptions {
    prefix: &'static str,
    block_end: Option<&'static str>,
    casing: Option<Case>,
    writer: Box<dyn Write + Send>,
}

impl StatisticOptions {
    /// Statistics prefixed by `prefix`, with names as they are, written to stdout.
    pub fn new(prefix: &'static str) -> Self {
        StatisticOptions {
            prefix,
            block_end: None,
            casing: None,
            writer: Box::new(stdout()),
        }
    }

    /// A line written after every block of statistics.
    pub fn with_block_end(mut self, block_end: &'static str) -> Self {
        self.block_end = Some(block_end);
        self
    }

    /// Converts statistic names to `casing`.
    pub fn with_casing(mut self, casing: Case) -> Self {
        self.casing = Some(casing);
        self
    }

    pub fn with_writer(mut self, writer: Box<dyn Write + Send>) -> Self {
        self.writer = writer;
        self
    }

    fn write_statistic(&mut self, name: impl Display, value: impl Display) {
        let name = match self.casing {
            Some(casing) => name.to_string().to_case(casing),
            None => name.to_string(),
        };
        let _ = writeln!(self.writer, "{} {name}={value}", self.prefix);
    }

    fn end_block(&mut self) {
        if let Some(block_end) = self.block_end {
            let _ = writeln!(self.writer, "{block_end}");
        }
    }
}

impl Debug for StatisticOptions {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatisticOptions")
            .field("prefix", &self.prefix)
            .field("block_end", &self.block_end)
            .field("casing", &self.casing)
            .finish_non_exhaustive()
    }
}

static STATISTIC_OPTIONS: OnceLock<Mutex<StatisticOptions>> = OnceLock::new();

/// Turns on statistic logging. Returns `false`, and changes nothing, when logging was configured
/// before.
pub fn configure_statistic_logging(options: StatisticOptions) -> bool {
    STATISTIC_OPTIONS.set(Mutex::new(options)).is_ok()
}

/// Whether statistic logging has been configured.
pub fn should_log_statistics() -> bool {
    STATISTIC_OPTIONS.get().is_some()
}

fn with_options(action: impl FnOnce(&mut StatisticOptions)) {
    if let Some(options) = STATISTIC_OPTIONS.get() {
        if let Ok(mut options) = options.lock() {
            action(&mut options);
        }
    }
}

pub fn log_statistic(name: impl Display, value: impl Display) {
    with_options(|options| options.write_statistic(name, value));
}

/// Closes a block of statistics, see [`StatisticOptions::with_block_end`].
pub fn log_statistic_postfix() {
    with_options(StatisticOptions::end_block);
}

use serde::Deserialize;

use crate::quantity::percent::Percent;

/// Configured time-of-day band within which the cheapest slot is sought.
///
/// The hours double as indices into the forecast slot sequence, since the
/// gateway reports one slot per hour. Re-read from the configuration file
/// every cycle, so edits apply without a restart.
#[derive(Copy, Clone, Debug, PartialEq, Deserialize)]
pub struct TimeBand {
    pub start_hour: u32,
    pub end_hour: u32,
    pub soc_limit: Percent,
}

impl TimeBand {
    /// Whether the given wall-clock hour falls inside `start_hour..end_hour`.
    pub const fn contains_hour(&self, hour: u32) -> bool {
        (hour >= self.start_hour) && (hour < self.end_hour)
    }
}

//! DST handling for daily window boundaries.

use chrono::{DateTime, Duration, NaiveDateTime, TimeZone};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// Policy for a window boundary that does not exist on a DST transition day
/// (e.g. 02:30 during spring forward).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DstPolicy {
    /// Drop the whole day from the search range.
    Skip,
    /// Move the boundary to the first valid local time after the gap.
    #[default]
    ShiftForward,
}

/// Resolve a local wall-clock time in `tz`.
///
/// Ambiguous times (fall back) resolve to the earlier instant. Non-existent
/// times follow `policy`; `None` means the day should be skipped.
pub fn localize(tz: &Tz, local: NaiveDateTime, policy: DstPolicy) -> Option<DateTime<Tz>> {
    if let Some(dt) = tz.from_local_datetime(&local).earliest() {
        return Some(dt);
    }
    match policy {
        DstPolicy::Skip => None,
        // Gaps are at most a few hours; probe minute by minute past the gap.
        DstPolicy::ShiftForward => (1..=24 * 60)
            .map(|m| local + Duration::minutes(m))
            .find_map(|probe| tz.from_local_datetime(&probe).earliest()),
    }
}

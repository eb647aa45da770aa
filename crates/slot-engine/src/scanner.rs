//! Slide a meeting-sized window over an availability grid.
//!
//! For one scan window (typically one business day) the scanner emits a
//! [`CandidateSlot`] for every start offset at which a meeting of the
//! requested duration fits inside the longest participant sequence, recording
//! who is free for the entire duration.

use chrono::{DateTime, Duration, FixedOffset};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::availability::ParticipantSchedule;
use crate::error::{Result, SlotError};
use crate::slot::CandidateSlot;
use crate::window::ScanWindow;

/// How a duration that is not a multiple of the interval maps to a number of
/// intervals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntervalRounding {
    /// Round down. A 45-minute meeting on a 30-minute grid checks a single
    /// interval, so only the first 30 minutes are verified.
    #[default]
    Floor,
    /// Round up. Every minute of the meeting is covered by a checked interval.
    Ceil,
}

/// Number of consecutive intervals a meeting of `duration_minutes` occupies.
///
/// # Errors
/// Returns [`SlotError::InvalidConfig`] if either value is zero, or if
/// flooring leaves no interval to check.
pub fn intervals_needed(
    duration_minutes: u32,
    interval_minutes: u32,
    rounding: IntervalRounding,
) -> Result<usize> {
    if interval_minutes == 0 {
        return Err(SlotError::InvalidConfig(
            "interval_minutes must be positive".to_string(),
        ));
    }
    if duration_minutes == 0 {
        return Err(SlotError::InvalidConfig(
            "duration_minutes must be positive".to_string(),
        ));
    }

    let needed = match rounding {
        IntervalRounding::Floor => duration_minutes / interval_minutes,
        IntervalRounding::Ceil => duration_minutes.div_ceil(interval_minutes),
    };
    if needed == 0 {
        return Err(SlotError::InvalidConfig(format!(
            "duration of {} minutes is shorter than one {}-minute interval",
            duration_minutes, interval_minutes
        )));
    }
    Ok(needed as usize)
}

/// Compute a candidate slot for every start offset in the grid.
///
/// # Arguments
///
/// * `schedules`: Decoded schedules sharing `window_start` and `interval_minutes`.
/// * `window_start`: Instant of offset 0.
/// * `interval_minutes`: Length of one availability interval.
/// * `duration_minutes`: Requested meeting length.
/// * `rounding`: See [`IntervalRounding`].
///
/// Offsets run from 0 to `L - intervals_needed` inclusive, where `L` is the
/// longest sequence. A participant whose sequence does not reach the end of a
/// slot is left out of both participant lists for that slot but still counts
/// toward `total_participants`.
///
/// An empty schedule list, empty sequences, or a meeting longer than every
/// sequence produce an empty result.
///
/// # Errors
/// Returns [`SlotError::InvalidConfig`] for an invalid duration/interval
/// combination, before any scanning.
pub fn scan(
    schedules: &[ParticipantSchedule],
    window_start: DateTime<FixedOffset>,
    interval_minutes: u32,
    duration_minutes: u32,
    rounding: IntervalRounding,
) -> Result<Vec<CandidateSlot>> {
    let needed = intervals_needed(duration_minutes, interval_minutes, rounding)?;

    let longest = schedules.iter().map(|s| s.len()).max().unwrap_or(0);
    if longest < needed {
        return Ok(Vec::new());
    }

    let total = schedules.len();
    let interval = Duration::minutes(interval_minutes as i64);
    let duration = Duration::minutes(duration_minutes as i64);

    let slots: Vec<CandidateSlot> = (0..=longest - needed)
        .map(|offset| {
            let slot_start = window_start + interval * offset as i32;
            let slot_end = slot_start + duration;

            let mut available = Vec::new();
            let mut busy = Vec::new();
            for schedule in schedules {
                match schedule.available_for(offset, needed) {
                    Some(true) => available.push(schedule.identity.clone()),
                    Some(false) => busy.push(schedule.identity.clone()),
                    None => {}
                }
            }

            CandidateSlot::new(slot_start, slot_end, available, busy, total)
        })
        .collect();

    debug!(
        window_start = %window_start,
        participants = total,
        intervals = longest,
        intervals_needed = needed,
        candidates = slots.len(),
        "scanned window"
    );

    Ok(slots)
}

/// [`scan`] over a [`ScanWindow`] produced by the date-range expander.
pub fn scan_window(
    schedules: &[ParticipantSchedule],
    window: &ScanWindow,
    duration_minutes: u32,
    rounding: IntervalRounding,
) -> Result<Vec<CandidateSlot>> {
    scan(
        schedules,
        window.start_time,
        window.interval_minutes,
        duration_minutes,
        rounding,
    )
}

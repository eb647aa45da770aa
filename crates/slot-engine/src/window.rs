//! Expand a calendar date range into one scan window per business day.

use std::str::FromStr;

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveTime, Weekday};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::dst::{self, DstPolicy};
use crate::error::{Result, SlotError};

/// A contiguous time range sampled at a fixed interval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanWindow {
    pub start_time: DateTime<FixedOffset>,
    pub end_time: DateTime<FixedOffset>,
    pub interval_minutes: u32,
}

impl ScanWindow {
    pub fn duration_minutes(&self) -> i64 {
        (self.end_time - self.start_time).num_minutes()
    }

    /// Number of whole intervals in the window.
    pub fn interval_count(&self) -> usize {
        if self.interval_minutes == 0 {
            return 0;
        }
        (self.duration_minutes().max(0) / self.interval_minutes as i64) as usize
    }
}

/// Daily time-of-day range, written as `HH:MM-HH:MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyTimeRange {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl DailyTimeRange {
    pub fn new(start: NaiveTime, end: NaiveTime) -> Result<Self> {
        if start >= end {
            return Err(SlotError::InvalidTimeRange(format!(
                "start {} must be before end {}",
                start.format("%H:%M"),
                end.format("%H:%M")
            )));
        }
        Ok(Self { start, end })
    }
}

impl FromStr for DailyTimeRange {
    type Err = SlotError;

    fn from_str(s: &str) -> Result<Self> {
        let (start, end) = s
            .split_once('-')
            .ok_or_else(|| SlotError::InvalidTimeRange(format!("'{}' is not HH:MM-HH:MM", s)))?;
        let parse = |part: &str| {
            NaiveTime::parse_from_str(part.trim(), "%H:%M")
                .map_err(|_| SlotError::InvalidTimeRange(format!("'{}' is not HH:MM-HH:MM", s)))
        };
        Self::new(parse(start)?, parse(end)?)
    }
}

impl std::fmt::Display for DailyTimeRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.start.format("%H:%M"), self.end.format("%H:%M"))
    }
}

/// Parse a `YYYY-MM-DD` date.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| SlotError::InvalidDate(format!("'{}'. Expected YYYY-MM-DD", s)))
}

/// Parse an IANA timezone name.
pub fn parse_timezone(s: &str) -> Result<Tz> {
    s.parse()
        .map_err(|_| SlotError::InvalidTimezone(s.to_string()))
}

fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// One scan window per weekday between `start_date` and `end_date` inclusive.
///
/// Each window spans the daily time range localized to `tz`. Saturdays and
/// Sundays are skipped, windows come back in ascending date order, and a
/// range without weekdays (or with `start_date > end_date`) yields nothing.
///
/// # Errors
/// Returns [`SlotError::InvalidConfig`] if `interval_minutes` is zero.
pub fn expand(
    start_date: NaiveDate,
    end_date: NaiveDate,
    time_range: &DailyTimeRange,
    tz: Tz,
    interval_minutes: u32,
    policy: DstPolicy,
) -> Result<Vec<ScanWindow>> {
    if interval_minutes == 0 {
        return Err(SlotError::InvalidConfig(
            "interval_minutes must be positive".to_string(),
        ));
    }

    let windows = start_date
        .iter_days()
        .take_while(|date| *date <= end_date)
        .filter(|date| !is_weekend(*date))
        .filter_map(|date| {
            let start = dst::localize(&tz, date.and_time(time_range.start), policy)?;
            let end = dst::localize(&tz, date.and_time(time_range.end), policy)?;
            Some(ScanWindow {
                start_time: start.fixed_offset(),
                end_time: end.fixed_offset(),
                interval_minutes,
            })
        })
        .collect();

    Ok(windows)
}

/// String front end for [`expand`]: dates as `YYYY-MM-DD`, time range as
/// `HH:MM-HH:MM`, timezone as an IANA name. Uses [`DstPolicy::ShiftForward`].
pub fn expand_str(
    start_date: &str,
    end_date: &str,
    time_range: &str,
    timezone: &str,
    interval_minutes: u32,
) -> Result<Vec<ScanWindow>> {
    expand(
        parse_date(start_date)?,
        parse_date(end_date)?,
        &time_range.parse()?,
        parse_timezone(timezone)?,
        interval_minutes,
        DstPolicy::default(),
    )
}

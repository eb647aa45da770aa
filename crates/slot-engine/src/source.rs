//! Where schedules come from.
//!
//! The planner asks a [`ScheduleSource`] for every participant's availability
//! view over one scan window. Two implementations exist and one is chosen
//! explicitly through [`crate::config::SourceConfig`]:
//!
//! - [`SimulatedSource`]: random but seeded schedules for demos and tests.
//! - [`RecordedSource`]: real schedule responses fetched earlier and stored
//!   as JSON, keyed by date.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Mutex;

use chrono::{DateTime, FixedOffset};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::availability::{to_availability_view, AvailabilityCode, RawSchedule, ScheduleResponse};
use crate::error::{Result, SlotError};
use crate::window::ScanWindow;

/// A provider of raw schedules for a group of participants.
pub trait ScheduleSource {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Fetch one raw schedule per participant covering `window`, sampled at
    /// `window.interval_minutes`.
    fn get_schedule(&self, participants: &[String], window: &ScanWindow) -> Result<ScheduleResponse>;
}

/// Generates plausible schedules: mostly free, some tentative, busy and
/// out-of-office intervals.
pub struct SimulatedSource {
    rng: Mutex<StdRng>,
}

impl SimulatedSource {
    /// A source whose output is fully determined by `seed`.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// A source seeded from the operating system.
    pub fn from_entropy() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    fn random_code(rng: &mut StdRng) -> AvailabilityCode {
        let roll: f64 = rng.gen();
        if roll < 0.60 {
            AvailabilityCode::Free
        } else if roll < 0.75 {
            AvailabilityCode::Tentative
        } else if roll < 0.95 {
            AvailabilityCode::Busy
        } else {
            AvailabilityCode::OutOfOffice
        }
    }
}

impl ScheduleSource for SimulatedSource {
    fn name(&self) -> &str {
        "simulated"
    }

    fn get_schedule(&self, participants: &[String], window: &ScanWindow) -> Result<ScheduleResponse> {
        let intervals = window.interval_count();
        let mut rng = self
            .rng
            .lock()
            .map_err(|_| SlotError::Source("simulated generator poisoned".to_string()))?;

        debug!(
            participants = participants.len(),
            intervals,
            window_start = %window.start_time,
            "generating simulated schedules"
        );

        let value = participants
            .iter()
            .map(|email| {
                let codes: Vec<AvailabilityCode> =
                    (0..intervals).map(|_| Self::random_code(&mut rng)).collect();
                RawSchedule {
                    schedule_id: email.clone(),
                    availability_view: to_availability_view(&codes),
                }
            })
            .collect();

        Ok(ScheduleResponse { value })
    }
}

/// Schedules fetched for one day, with the grid they were sampled on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordedDay {
    /// Instant of the first interval in every view.
    pub start_time: DateTime<FixedOffset>,
    pub interval_minutes: u32,
    #[serde(flatten)]
    pub response: ScheduleResponse,
}

impl RecordedDay {
    /// Index range of the intervals covering `window`.
    fn intervals_for(&self, window: &ScanWindow) -> Result<(usize, usize)> {
        if window.interval_minutes != self.interval_minutes {
            return Err(SlotError::Source(format!(
                "recorded at {}-minute intervals, requested {}",
                self.interval_minutes, window.interval_minutes
            )));
        }
        let lead = (window.start_time - self.start_time).num_minutes();
        if lead < 0 || lead % self.interval_minutes as i64 != 0 {
            return Err(SlotError::Source(format!(
                "window start {} is not on the recorded grid starting {}",
                window.start_time.to_rfc3339(),
                self.start_time.to_rfc3339()
            )));
        }
        let offset = (lead / self.interval_minutes as i64) as usize;
        Ok((offset, offset + window.interval_count()))
    }
}

/// Previously fetched schedule responses, one per day (`YYYY-MM-DD` in the
/// window's own offset).
///
/// The JSON layout is an object mapping dates to recorded days:
///
/// ```json
/// {
///   "2025-11-17": {
///     "start_time": "2025-11-17T09:00:00+03:00",
///     "interval_minutes": 30,
///     "value": [ { "scheduleId": "a@x.com", "availabilityView": "0022" } ]
///   }
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct RecordedSource {
    days: BTreeMap<String, RecordedDay>,
}

impl RecordedSource {
    pub fn new(days: BTreeMap<String, RecordedDay>) -> Self {
        Self { days }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(Self::new(serde_json::from_str(json)?))
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Dates with a recorded response, ascending.
    pub fn dates(&self) -> impl Iterator<Item = &str> {
        self.days.keys().map(String::as_str)
    }
}

impl ScheduleSource for RecordedSource {
    fn name(&self) -> &str {
        "recorded"
    }

    /// Returns the part of each requested participant's recorded view that
    /// falls inside `window`, in request order. Views that end early stay
    /// short. A participant missing from the recording gets an empty view, so
    /// they still count toward the total without being available or busy.
    fn get_schedule(&self, participants: &[String], window: &ScanWindow) -> Result<ScheduleResponse> {
        let date = window.start_time.format("%Y-%m-%d").to_string();
        let day = self
            .days
            .get(&date)
            .ok_or_else(|| SlotError::Source(format!("no recorded schedule for {}", date)))?;
        let (from, to) = day.intervals_for(window)?;

        let value = participants
            .iter()
            .map(|p| {
                match day
                    .response
                    .value
                    .iter()
                    .find(|raw| raw.schedule_id.eq_ignore_ascii_case(p))
                {
                    Some(raw) => RawSchedule {
                        schedule_id: raw.schedule_id.clone(),
                        availability_view: raw
                            .availability_view
                            .chars()
                            .skip(from)
                            .take(to - from)
                            .collect(),
                    },
                    None => {
                        debug!(participant = %p, date = %date, "participant not in recording");
                        RawSchedule {
                            schedule_id: p.clone(),
                            availability_view: String::new(),
                        }
                    }
                }
            })
            .collect();

        Ok(ScheduleResponse { value })
    }
}

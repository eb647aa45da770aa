//! End-to-end meeting time search.
//!
//! Expands the requested date range into business-day windows, fetches and
//! decodes schedules for each window, scans every window, then ranks, filters
//! and formats the combined candidates. A window that fails (source error or
//! malformed schedule) is skipped and reported; the others still count.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::availability::decode_response;
use crate::config::PlannerConfig;
use crate::error::{Result, SlotError};
use crate::presenter::format_slot;
use crate::ranker;
use crate::scanner::{self, scan_window};
use crate::slot::CandidateSlot;
use crate::source::ScheduleSource;
use crate::window::{self, DailyTimeRange, ScanWindow};

/// A request for meeting suggestions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetingRequest {
    /// First day to search, `YYYY-MM-DD`.
    pub start_date: String,
    /// Last day to search (inclusive), `YYYY-MM-DD`.
    pub end_date: String,
    /// Daily range, `HH:MM-HH:MM`. Falls back to the configured range.
    #[serde(default)]
    pub time_range: Option<String>,
    pub participants: Vec<String>,
    /// Meeting length. Falls back to the configured default.
    #[serde(default, rename = "duration")]
    pub duration_minutes: Option<u32>,
}

/// A ranked slot together with its display string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    #[serde(flatten)]
    pub slot: CandidateSlot,
    pub formatted: String,
}

/// A window that contributed no candidates because it failed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedWindow {
    pub window: ScanWindow,
    pub reason: String,
}

/// Result of [`Planner::find_meeting_times`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeetingPlan {
    pub suggestions: Vec<Suggestion>,
    /// Candidates produced across all successful windows, before filtering.
    pub total_slots_analyzed: usize,
    pub skipped_windows: Vec<SkippedWindow>,
}

pub struct Planner {
    config: PlannerConfig,
}

impl Planner {
    /// # Errors
    /// Returns a configuration error if `config` does not validate.
    pub fn new(config: PlannerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Business-day windows covered by `request`.
    pub fn windows(&self, request: &MeetingRequest) -> Result<Vec<ScanWindow>> {
        let time_range: DailyTimeRange = request
            .time_range
            .as_deref()
            .unwrap_or(&self.config.time_range)
            .parse()?;
        window::expand(
            window::parse_date(&request.start_date)?,
            window::parse_date(&request.end_date)?,
            &time_range,
            window::parse_timezone(&self.config.timezone)?,
            self.config.interval_minutes,
            self.config.dst_policy,
        )
    }

    /// Find the best meeting times for `request`.
    ///
    /// An empty participant list or a range without business days yields an
    /// empty plan, not an error.
    ///
    /// # Errors
    /// Fails before any fetching if the request's dates, time range, or
    /// duration are invalid.
    pub fn find_meeting_times(
        &self,
        source: &dyn ScheduleSource,
        request: &MeetingRequest,
    ) -> Result<MeetingPlan> {
        let duration = request
            .duration_minutes
            .unwrap_or(self.config.default_duration_minutes);
        scanner::intervals_needed(duration, self.config.interval_minutes, self.config.rounding)?;
        let windows = self.windows(request)?;

        let mut candidates: Vec<CandidateSlot> = Vec::new();
        let mut skipped_windows = Vec::new();

        if !request.participants.is_empty() {
            for window in windows {
                match self.scan_one(source, &request.participants, &window, duration) {
                    Ok(slots) => candidates.extend(slots),
                    Err(e) => {
                        warn!(
                            source = source.name(),
                            window_start = %window.start_time,
                            error = %e,
                            "skipping window"
                        );
                        skipped_windows.push(SkippedWindow {
                            window,
                            reason: e.to_string(),
                        });
                    }
                }
            }
        }

        let total_slots_analyzed = candidates.len();
        let ranked = ranker::rank(candidates);
        let suggestions: Vec<Suggestion> =
            ranker::top(&ranked, self.config.top_n, self.config.min_percentage)
                .into_iter()
                .map(|slot| Suggestion {
                    formatted: format_slot(&slot, &self.config.locale),
                    slot,
                })
                .collect();

        info!(
            source = source.name(),
            analyzed = total_slots_analyzed,
            suggestions = suggestions.len(),
            skipped = skipped_windows.len(),
            "meeting search finished"
        );

        Ok(MeetingPlan {
            suggestions,
            total_slots_analyzed,
            skipped_windows,
        })
    }

    /// Availability of every participant for one explicit slot.
    ///
    /// The slot itself is used as the scan window, so the result is the single
    /// candidate at offset 0, or `None` when no schedule covers the slot.
    ///
    /// # Errors
    /// Returns [`SlotError::InvalidTimeRange`] if `end` is not after `start`,
    /// a configuration error if the slot is shorter than one interval, and any
    /// source or decoding error unchanged.
    pub fn check_availability(
        &self,
        source: &dyn ScheduleSource,
        participants: &[String],
        start: DateTime<FixedOffset>,
        end: DateTime<FixedOffset>,
    ) -> Result<Option<CandidateSlot>> {
        if end <= start {
            return Err(SlotError::InvalidTimeRange(format!(
                "slot end {} must be after start {}",
                end.to_rfc3339(),
                start.to_rfc3339()
            )));
        }
        let duration = u32::try_from((end - start).num_minutes()).map_err(|_| {
            SlotError::InvalidTimeRange("slot is too long".to_string())
        })?;
        let window = ScanWindow {
            start_time: start,
            end_time: end,
            interval_minutes: self.config.interval_minutes,
        };

        let slots = self.scan_one(source, participants, &window, duration)?;
        Ok(slots.into_iter().next())
    }

    fn scan_one(
        &self,
        source: &dyn ScheduleSource,
        participants: &[String],
        window: &ScanWindow,
        duration_minutes: u32,
    ) -> Result<Vec<CandidateSlot>> {
        let response = source.get_schedule(participants, window)?;
        let schedules = decode_response(&response)?;
        scan_window(&schedules, window, duration_minutes, self.config.rounding)
    }
}

//! Candidate meeting slots.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// One possible meeting start/end pair with per-participant availability.
///
/// Produced by the scanner for every offset of every scanned window. Never
/// modified afterwards; the ranker only reorders and drops slots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateSlot {
    pub start_time: DateTime<FixedOffset>,
    pub end_time: DateTime<FixedOffset>,
    pub available_count: usize,
    /// Size of the analyzed participant list, including participants whose
    /// data does not cover this slot.
    pub total_participants: usize,
    /// `available_count / total_participants * 100`.
    pub availability_percentage: f64,
    pub available_participants: Vec<String>,
    /// Participants with at least one busy interval inside the slot.
    pub busy_participants: Vec<String>,
}

impl CandidateSlot {
    pub fn new(
        start_time: DateTime<FixedOffset>,
        end_time: DateTime<FixedOffset>,
        available_participants: Vec<String>,
        busy_participants: Vec<String>,
        total_participants: usize,
    ) -> Self {
        let available_count = available_participants.len();
        let availability_percentage = if total_participants == 0 {
            0.0
        } else {
            available_count as f64 / total_participants as f64 * 100.0
        };
        Self {
            start_time,
            end_time,
            available_count,
            total_participants,
            availability_percentage,
            available_participants,
            busy_participants,
        }
    }

    pub fn busy_count(&self) -> usize {
        self.busy_participants.len()
    }

    /// Participants counted in the total but neither available nor busy,
    /// because their data ends before the slot does.
    pub fn uncovered_count(&self) -> usize {
        self.total_participants
            .saturating_sub(self.available_count + self.busy_count())
    }

    pub fn duration_minutes(&self) -> i64 {
        (self.end_time - self.start_time).num_minutes()
    }
}

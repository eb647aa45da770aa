//! Error types for slot-engine operations.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SlotError {
    /// A character in an availability view is not a code in `0..=4`.
    #[error("Invalid availability code '{found}' at position {position}")]
    InvalidAvailabilityCode { position: usize, found: char },

    /// A participant's availability view could not be decoded.
    #[error("Malformed schedule for {participant}: invalid code '{found}' at position {position}")]
    MalformedSchedule {
        participant: String,
        position: usize,
        found: char,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid time range: {0}")]
    InvalidTimeRange(String),

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    /// The schedule source could not produce data for a window.
    #[error("Schedule source error: {0}")]
    Source(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SlotError {
    /// True for malformed availability data (as opposed to bad configuration
    /// or a failing source).
    pub fn is_data_error(&self) -> bool {
        matches!(
            self,
            SlotError::InvalidAvailabilityCode { .. } | SlotError::MalformedSchedule { .. }
        )
    }

    /// True for errors caused by invalid parameters or settings.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            SlotError::InvalidConfig(_)
                | SlotError::InvalidDate(_)
                | SlotError::InvalidTimeRange(_)
                | SlotError::InvalidTimezone(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, SlotError>;

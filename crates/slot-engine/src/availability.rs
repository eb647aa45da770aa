//! Availability codes and per-participant schedules.
//!
//! A calendar backend reports a participant's free/busy state as an
//! "availability view": one digit per fixed interval of the requested window
//! (e.g. `"0022001"` at 30-minute granularity). This module decodes those
//! views into typed [`AvailabilityCode`] sequences.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SlotError};

/// Status of one participant for one interval.
///
/// The ordinal matters: codes up to [`AvailabilityCode::Tentative`] count as
/// available, everything above counts as busy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
#[repr(u8)]
pub enum AvailabilityCode {
    Free = 0,
    Tentative = 1,
    Busy = 2,
    OutOfOffice = 3,
    WorkingElsewhere = 4,
}

impl AvailabilityCode {
    /// Whether a participant with this status can attend a meeting.
    pub fn is_available(self) -> bool {
        self <= AvailabilityCode::Tentative
    }

    /// The single-digit wire representation.
    pub fn as_digit(self) -> char {
        char::from(b'0' + self as u8)
    }
}

impl From<AvailabilityCode> for u8 {
    fn from(code: AvailabilityCode) -> Self {
        code as u8
    }
}

impl TryFrom<u8> for AvailabilityCode {
    type Error = String;

    fn try_from(value: u8) -> std::result::Result<Self, Self::Error> {
        match value {
            0 => Ok(AvailabilityCode::Free),
            1 => Ok(AvailabilityCode::Tentative),
            2 => Ok(AvailabilityCode::Busy),
            3 => Ok(AvailabilityCode::OutOfOffice),
            4 => Ok(AvailabilityCode::WorkingElsewhere),
            other => Err(format!("availability code out of range: {}", other)),
        }
    }
}

impl TryFrom<char> for AvailabilityCode {
    type Error = char;

    fn try_from(c: char) -> std::result::Result<Self, Self::Error> {
        c.to_digit(10)
            .and_then(|d| AvailabilityCode::try_from(d as u8).ok())
            .ok_or(c)
    }
}

/// Decode an availability view string into typed codes.
///
/// # Errors
/// Returns [`SlotError::InvalidAvailabilityCode`] on the first character that
/// is not a digit in `0..=4`. Nothing is coerced to a default.
pub fn parse_availability_view(view: &str) -> Result<Vec<AvailabilityCode>> {
    view.chars()
        .enumerate()
        .map(|(position, c)| {
            AvailabilityCode::try_from(c)
                .map_err(|found| SlotError::InvalidAvailabilityCode { position, found })
        })
        .collect()
}

/// Encode typed codes back into an availability view string.
pub fn to_availability_view(codes: &[AvailabilityCode]) -> String {
    codes.iter().map(|c| c.as_digit()).collect()
}

/// One participant's schedule as returned by a schedule source, before decoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSchedule {
    /// Participant identity (usually an email address).
    pub schedule_id: String,
    #[serde(default)]
    pub availability_view: String,
}

/// A schedule lookup result for a group of participants over one window.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleResponse {
    #[serde(default)]
    pub value: Vec<RawSchedule>,
}

/// A decoded per-participant availability sequence for one scan window.
///
/// All schedules analyzed together must share the same interval length and
/// window start. Their lengths may differ.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantSchedule {
    pub identity: String,
    pub codes: Vec<AvailabilityCode>,
}

impl ParticipantSchedule {
    pub fn new(identity: impl Into<String>, codes: Vec<AvailabilityCode>) -> Self {
        Self {
            identity: identity.into(),
            codes,
        }
    }

    /// Decode a participant's availability view.
    ///
    /// # Errors
    /// Returns [`SlotError::MalformedSchedule`] naming the participant if the
    /// view contains an invalid code.
    pub fn parse(identity: impl Into<String>, view: &str) -> Result<Self> {
        let identity = identity.into();
        match parse_availability_view(view) {
            Ok(codes) => Ok(Self { identity, codes }),
            Err(SlotError::InvalidAvailabilityCode { position, found }) => {
                Err(SlotError::MalformedSchedule {
                    participant: identity,
                    position,
                    found,
                })
            }
            Err(other) => Err(other),
        }
    }

    pub fn from_raw(raw: &RawSchedule) -> Result<Self> {
        Self::parse(raw.schedule_id.clone(), &raw.availability_view)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Availability over `[offset, offset + intervals)`.
    ///
    /// Returns `None` when the sequence does not cover the whole range.
    pub fn available_for(&self, offset: usize, intervals: usize) -> Option<bool> {
        let end = offset.checked_add(intervals)?;
        self.codes
            .get(offset..end)
            .map(|range| range.iter().all(|c| c.is_available()))
    }
}

/// Decode every schedule in a response.
///
/// The first malformed schedule aborts the whole batch so that a bad entry
/// can never silently change participant counts.
pub fn decode_response(response: &ScheduleResponse) -> Result<Vec<ParticipantSchedule>> {
    response.value.iter().map(ParticipantSchedule::from_raw).collect()
}

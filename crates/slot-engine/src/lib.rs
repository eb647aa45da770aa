//! # slot-engine
//!
//! Find common free time across a group of calendar participants and rank
//! candidate meeting slots by how many participants can attend.
//!
//! Schedules arrive as availability views: one digit per fixed interval
//! (`0` free, `1` tentative, `2` busy, `3` out of office, `4` working
//! elsewhere). The engine slides a meeting-sized window over those grids,
//! counts who is free for the whole meeting at each offset, and ranks the
//! results.
//!
//! ```rust
//! use chrono::DateTime;
//! use slot_engine::{rank, scan, top, IntervalRounding, ParticipantSchedule};
//!
//! let schedules = vec![
//!     ParticipantSchedule::parse("ada@example.com", "0022").unwrap(),
//!     ParticipantSchedule::parse("bob@example.com", "0002").unwrap(),
//! ];
//! let start = DateTime::parse_from_rfc3339("2025-11-17T09:00:00+03:00").unwrap();
//!
//! let slots = scan(&schedules, start, 30, 60, IntervalRounding::Floor).unwrap();
//! let best = top(&rank(slots), 1, 50.0);
//! assert_eq!(best[0].available_count, 2);
//! assert_eq!(best[0].start_time, start);
//! ```
//!
//! ## Modules
//!
//! - [`availability`]: availability codes, view decoding, participant schedules
//! - [`scanner`]: candidate slots for every start offset of a window
//! - [`ranker`]: ordering and top-N/threshold filtering
//! - [`presenter`]: localized display strings
//! - [`window`]: date range → one scan window per business day
//! - [`dst`]: DST policy for window boundaries
//! - [`source`]: simulated and recorded schedule sources
//! - [`planner`]: end-to-end search across a date range
//! - [`config`]: planner settings
//! - [`error`]: error types

pub mod availability;
pub mod config;
pub mod dst;
pub mod error;
pub mod planner;
pub mod presenter;
pub mod ranker;
pub mod scanner;
pub mod slot;
pub mod source;
pub mod window;

pub use availability::{parse_availability_view, AvailabilityCode, ParticipantSchedule};
pub use config::PlannerConfig;
pub use error::SlotError;
pub use planner::{MeetingPlan, MeetingRequest, Planner};
pub use presenter::{format_slot, Locale};
pub use ranker::{rank, top};
pub use scanner::{scan, IntervalRounding};
pub use slot::CandidateSlot;
pub use source::ScheduleSource;
pub use window::{expand, ScanWindow};

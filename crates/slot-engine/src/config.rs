//! Planner configuration.
//!
//! Every field has a default, so an empty JSON object is a valid config:
//!
//! ```rust
//! use slot_engine::config::PlannerConfig;
//!
//! let config = PlannerConfig::from_json_str("{}").unwrap();
//! assert_eq!(config.interval_minutes, 30);
//! assert_eq!(config.top_n, 5);
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::dst::DstPolicy;
use crate::error::{Result, SlotError};
use crate::presenter::Locale;
use crate::ranker::{DEFAULT_MIN_PERCENTAGE, DEFAULT_TOP_N};
use crate::scanner::{self, IntervalRounding};
use crate::source::{RecordedSource, ScheduleSource, SimulatedSource};
use crate::window::{self, DailyTimeRange};

fn default_timezone() -> String {
    "Europe/Istanbul".to_string()
}

fn default_interval_minutes() -> u32 {
    30
}

fn default_duration_minutes() -> u32 {
    60
}

fn default_time_range() -> String {
    "09:00-17:00".to_string()
}

fn default_top_n() -> usize {
    DEFAULT_TOP_N
}

fn default_min_percentage() -> f64 {
    DEFAULT_MIN_PERCENTAGE
}

/// Which [`ScheduleSource`] the planner reads from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SourceConfig {
    /// Random schedules. A fixed `seed` makes runs reproducible.
    Simulated {
        #[serde(default)]
        seed: Option<u64>,
    },
    /// Schedules recorded to a JSON file.
    Recorded { path: PathBuf },
}

impl Default for SourceConfig {
    fn default() -> Self {
        SourceConfig::Simulated { seed: None }
    }
}

impl SourceConfig {
    /// Instantiate the configured source.
    pub fn build(&self) -> Result<Box<dyn ScheduleSource>> {
        Ok(match self {
            SourceConfig::Simulated { seed: Some(seed) } => Box::new(SimulatedSource::with_seed(*seed)),
            SourceConfig::Simulated { seed: None } => Box::new(SimulatedSource::from_entropy()),
            SourceConfig::Recorded { path } => Box::new(RecordedSource::from_file(path)?),
        })
    }
}

/// Settings shared by every planning request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// IANA timezone the daily time range is interpreted in.
    #[serde(default = "default_timezone")]
    pub timezone: String,
    /// Availability sampling interval.
    #[serde(default = "default_interval_minutes")]
    pub interval_minutes: u32,
    /// Meeting length used when a request does not give one.
    #[serde(default = "default_duration_minutes")]
    pub default_duration_minutes: u32,
    /// Daily search range used when a request does not give one.
    #[serde(default = "default_time_range")]
    pub time_range: String,
    #[serde(default = "default_top_n")]
    pub top_n: usize,
    #[serde(default = "default_min_percentage")]
    pub min_percentage: f64,
    pub rounding: IntervalRounding,
    pub dst_policy: DstPolicy,
    pub locale: Locale,
    pub source: SourceConfig,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            timezone: default_timezone(),
            interval_minutes: default_interval_minutes(),
            default_duration_minutes: default_duration_minutes(),
            time_range: default_time_range(),
            top_n: default_top_n(),
            min_percentage: default_min_percentage(),
            rounding: IntervalRounding::default(),
            dst_policy: DstPolicy::default(),
            locale: Locale::default(),
            source: SourceConfig::default(),
        }
    }
}

impl PlannerConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Check every setting up front so that no request starts scanning with
    /// an unusable configuration.
    pub fn validate(&self) -> Result<()> {
        window::parse_timezone(&self.timezone)?;
        self.time_range.parse::<DailyTimeRange>()?;
        scanner::intervals_needed(
            self.default_duration_minutes,
            self.interval_minutes,
            self.rounding,
        )?;
        if !(0.0..=100.0).contains(&self.min_percentage) {
            return Err(SlotError::InvalidConfig(format!(
                "min_percentage must be within 0-100, got {}",
                self.min_percentage
            )));
        }
        self.locale.validate()
    }
}

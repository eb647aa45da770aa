//! `slots` CLI: find, check, and rank group meeting times from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Best meeting times for a week, from simulated schedules
//! slots suggest --start-date 2025-11-17 --end-date 2025-11-21 \
//!   -p ada@example.com -p bob@example.com --seed 7
//!
//! # Same search against recorded schedules, printed as text
//! slots suggest --source recorded --recording week.json \
//!   --start-date 2025-11-17 --end-date 2025-11-21 -p ada@example.com --text
//!
//! # Availability for one explicit slot
//! slots check --start 2025-11-17T10:00:00+03:00 --end 2025-11-17T11:00:00+03:00 -p ada@example.com
//!
//! # Rank the slots of one schedule response (stdin → stdout)
//! cat schedule.json | slots analyze --window-start 2025-11-17T09:00:00+03:00
//!
//! # Business-day windows of a date range
//! slots windows --start-date 2025-11-17 --end-date 2025-11-23
//! ```

use anyhow::{Context, Result};
use chrono::DateTime;
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::json;
use std::io::{self, Read};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use slot_engine::availability::{decode_response, ScheduleResponse};
use slot_engine::config::{PlannerConfig, SourceConfig};
use slot_engine::planner::{MeetingRequest, Planner};
use slot_engine::{IntervalRounding, Locale};

#[derive(Parser)]
#[command(name = "slots", version, about = "Find and rank group meeting times")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON planner configuration file
    #[arg(long, global = true, env = "SLOTS_CONFIG")]
    config: Option<PathBuf>,

    /// Display language for formatted suggestions (tr, en)
    #[arg(long, global = true)]
    locale: Option<String>,

    /// Increase log verbosity (-v debug, -vv trace). RUST_LOG takes precedence.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, ValueEnum)]
enum SourceKind {
    Simulated,
    Recorded,
}

#[derive(Clone, Copy, ValueEnum)]
enum Rounding {
    Floor,
    Ceil,
}

impl From<Rounding> for IntervalRounding {
    fn from(r: Rounding) -> Self {
        match r {
            Rounding::Floor => IntervalRounding::Floor,
            Rounding::Ceil => IntervalRounding::Ceil,
        }
    }
}

/// Where schedules come from; overrides the config file.
#[derive(clap::Args)]
struct SourceArgs {
    /// Schedule source
    #[arg(long, env = "SLOTS_SOURCE", value_enum)]
    source: Option<SourceKind>,
    /// Recorded schedules file (implies --source recorded)
    #[arg(long)]
    recording: Option<PathBuf>,
    /// Seed for simulated schedules
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Suggest the best meeting times across a date range
    Suggest {
        /// Request JSON file ("-" for stdin) with startDate, endDate, timeRange, participants, duration
        #[arg(long, conflicts_with_all = ["start_date", "end_date", "participants"])]
        request: Option<String>,
        /// First day to search (YYYY-MM-DD)
        #[arg(long, required_unless_present = "request")]
        start_date: Option<String>,
        /// Last day to search, inclusive (YYYY-MM-DD)
        #[arg(long, required_unless_present = "request")]
        end_date: Option<String>,
        /// Daily time range (HH:MM-HH:MM)
        #[arg(long)]
        time_range: Option<String>,
        /// Participant email; repeat or comma-separate
        #[arg(short, long = "participant", value_delimiter = ',')]
        participants: Vec<String>,
        /// Meeting length in minutes
        #[arg(short, long)]
        duration: Option<u32>,
        /// Maximum number of suggestions
        #[arg(long)]
        top: Option<usize>,
        /// Minimum availability percentage
        #[arg(long)]
        min_percentage: Option<f64>,
        #[command(flatten)]
        source_args: SourceArgs,
        /// Print one formatted line per suggestion instead of JSON
        #[arg(long)]
        text: bool,
    },
    /// Check participant availability for one explicit slot
    Check {
        /// Slot start (RFC 3339)
        #[arg(long)]
        start: String,
        /// Slot end (RFC 3339)
        #[arg(long)]
        end: String,
        /// Participant email; repeat or comma-separate
        #[arg(short, long = "participant", value_delimiter = ',', required = true)]
        participants: Vec<String>,
        #[command(flatten)]
        source_args: SourceArgs,
    },
    /// Scan and rank one schedule response ({"value": [{scheduleId, availabilityView}]})
    Analyze {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Instant of the first interval (RFC 3339)
        #[arg(long)]
        window_start: String,
        /// Interval length in minutes
        #[arg(long)]
        interval: Option<u32>,
        /// Meeting length in minutes
        #[arg(short, long)]
        duration: Option<u32>,
        /// How partial intervals are counted
        #[arg(long, value_enum)]
        rounding: Option<Rounding>,
        /// Output every ranked slot instead of the top suggestions
        #[arg(long)]
        all: bool,
    },
    /// List the business-day scan windows of a date range
    Windows {
        /// First day (YYYY-MM-DD)
        #[arg(long)]
        start_date: String,
        /// Last day, inclusive (YYYY-MM-DD)
        #[arg(long)]
        end_date: String,
        /// Daily time range (HH:MM-HH:MM)
        #[arg(long)]
        time_range: Option<String>,
        /// IANA timezone
        #[arg(long)]
        timezone: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = match &cli.config {
        Some(path) => PlannerConfig::from_file(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => PlannerConfig::default(),
    };
    if let Some(code) = &cli.locale {
        config.locale = Locale::by_code(code)?;
    }

    match cli.command {
        Commands::Suggest {
            request,
            start_date,
            end_date,
            time_range,
            participants,
            duration,
            top,
            min_percentage,
            source_args,
            text,
        } => {
            let request = match request {
                Some(path) => {
                    let json = read_input(Some(path.as_str()).filter(|p| *p != "-"))?;
                    serde_json::from_str::<MeetingRequest>(&json)
                        .context("Failed to parse meeting request")?
                }
                None => MeetingRequest {
                    start_date: start_date.unwrap_or_default(),
                    end_date: end_date.unwrap_or_default(),
                    time_range,
                    participants,
                    duration_minutes: duration,
                },
            };
            if let Some(n) = top {
                config.top_n = n;
            }
            if let Some(p) = min_percentage {
                config.min_percentage = p;
            }
            apply_source(&mut config, &source_args)?;

            let source = config.source.build().context("Failed to open schedule source")?;
            let planner = Planner::new(config)?;
            let plan = planner
                .find_meeting_times(source.as_ref(), &request)
                .context("Failed to find meeting times")?;

            if text {
                for suggestion in &plan.suggestions {
                    println!("{}", suggestion.formatted);
                }
            } else {
                println!("{}", serde_json::to_string_pretty(&plan)?);
            }
        }
        Commands::Check {
            start,
            end,
            participants,
            source_args,
        } => {
            let start = DateTime::parse_from_rfc3339(&start)
                .with_context(|| format!("Invalid --start: {}", start))?;
            let end = DateTime::parse_from_rfc3339(&end)
                .with_context(|| format!("Invalid --end: {}", end))?;
            apply_source(&mut config, &source_args)?;

            let source = config.source.build().context("Failed to open schedule source")?;
            let planner = Planner::new(config)?;
            let slot = planner
                .check_availability(source.as_ref(), &participants, start, end)
                .context("Failed to check availability")?;
            println!("{}", serde_json::to_string_pretty(&json!({ "availability": slot }))?);
        }
        Commands::Analyze {
            input,
            window_start,
            interval,
            duration,
            rounding,
            all,
        } => {
            let json = read_input(input.as_deref())?;
            let response: ScheduleResponse =
                serde_json::from_str(&json).context("Failed to parse schedule response")?;
            let schedules = decode_response(&response).context("Malformed availability data")?;
            let start = DateTime::parse_from_rfc3339(&window_start)
                .with_context(|| format!("Invalid --window-start: {}", window_start))?;

            let slots = slot_engine::scan(
                &schedules,
                start,
                interval.unwrap_or(config.interval_minutes),
                duration.unwrap_or(config.default_duration_minutes),
                rounding.map(IntervalRounding::from).unwrap_or(config.rounding),
            )?;
            let ranked = slot_engine::rank(slots);
            let output = if all {
                ranked
            } else {
                slot_engine::top(&ranked, config.top_n, config.min_percentage)
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        Commands::Windows {
            start_date,
            end_date,
            time_range,
            timezone,
        } => {
            let windows = slot_engine::window::expand_str(
                &start_date,
                &end_date,
                time_range.as_deref().unwrap_or(&config.time_range),
                timezone.as_deref().unwrap_or(&config.timezone),
                config.interval_minutes,
            )?;
            println!("{}", serde_json::to_string_pretty(&windows)?);
        }
    }

    Ok(())
}

/// Install a stderr `fmt` subscriber. `RUST_LOG` wins over `-v`.
fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

/// Overlay command-line source selection on the configured source.
fn apply_source(config: &mut PlannerConfig, args: &SourceArgs) -> Result<()> {
    let kind = match (args.source, &args.recording) {
        (Some(kind), _) => Some(kind),
        (None, Some(_)) => Some(SourceKind::Recorded),
        (None, None) => None,
    };

    match kind {
        Some(SourceKind::Recorded) => match (&args.recording, &config.source) {
            (Some(path), _) => config.source = SourceConfig::Recorded { path: path.clone() },
            (None, SourceConfig::Recorded { .. }) => {}
            (None, SourceConfig::Simulated { .. }) => {
                anyhow::bail!("--source recorded needs --recording or a recorded source in --config")
            }
        },
        Some(SourceKind::Simulated) => {
            config.source = SourceConfig::Simulated { seed: args.seed };
        }
        None => {
            if let (Some(seed), SourceConfig::Simulated { .. }) = (args.seed, &config.source) {
                config.source = SourceConfig::Simulated { seed: Some(seed) };
            }
        }
    }
    debug!(source = ?config.source, "schedule source selected");
    Ok(())
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

//! WASM bindings for slot-engine.
//!
//! Exposes availability scanning, ranking, business-day expansion and slot
//! formatting to JavaScript via `wasm-bindgen`. All complex types are passed
//! as JSON strings.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p slot-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target nodejs --out-dir packages/slot-engine-js/wasm/ \
//!   target/wasm32-unknown-unknown/release/slot_engine_wasm.wasm
//! ```

use chrono::{DateTime, FixedOffset, NaiveDateTime};
use serde::Deserialize;
use slot_engine::availability::{AvailabilityCode, ParticipantSchedule};
use slot_engine::{CandidateSlot, IntervalRounding, Locale};
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Serde-friendly DTOs for crossing the WASM boundary as JSON
// ---------------------------------------------------------------------------

/// Codes may arrive as a view string (`"0022"`) or as an array of digits.
#[derive(Deserialize)]
#[serde(untagged)]
enum CodesInput {
    View(String),
    Digits(Vec<AvailabilityCode>),
}

/// Input format for one participant's schedule passed from JavaScript.
#[derive(Deserialize)]
struct ScheduleInput {
    identity: String,
    availability_codes: CodesInput,
}

impl ScheduleInput {
    fn into_schedule(self) -> Result<ParticipantSchedule, String> {
        match self.availability_codes {
            CodesInput::View(view) => {
                ParticipantSchedule::parse(self.identity, &view).map_err(|e| e.to_string())
            }
            CodesInput::Digits(codes) => Ok(ParticipantSchedule::new(self.identity, codes)),
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Parse an ISO 8601 datetime string.
///
/// Accepts RFC 3339 with an offset (e.g., "2025-11-17T09:00:00+03:00") and
/// naive local time (e.g., "2025-11-17T09:00:00"), which is interpreted as UTC.
fn parse_datetime(s: &str) -> Result<DateTime<FixedOffset>, String> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt);
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
        .map(|ndt| ndt.and_utc().fixed_offset())
        .map_err(|e| format!("Invalid datetime '{}': {}", s, e))
}

fn parse_rounding(s: Option<&str>) -> Result<IntervalRounding, String> {
    match s.unwrap_or("floor") {
        "floor" => Ok(IntervalRounding::Floor),
        "ceil" => Ok(IntervalRounding::Ceil),
        other => Err(format!("Unknown rounding '{}'. Expected floor or ceil", other)),
    }
}

fn parse_slots_json(json: &str) -> Result<Vec<CandidateSlot>, String> {
    serde_json::from_str(json).map_err(|e| format!("Invalid slots JSON: {}", e))
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| format!("Serialization error: {}", e))
}

fn scan_json(
    schedules_json: &str,
    window_start: &str,
    interval_minutes: u32,
    duration_minutes: u32,
    rounding: Option<&str>,
) -> Result<String, String> {
    let inputs: Vec<ScheduleInput> = serde_json::from_str(schedules_json)
        .map_err(|e| format!("Invalid schedules JSON: {}", e))?;
    let schedules = inputs
        .into_iter()
        .map(ScheduleInput::into_schedule)
        .collect::<Result<Vec<_>, _>>()?;
    let start = parse_datetime(window_start)?;

    let slots = slot_engine::scan(
        &schedules,
        start,
        interval_minutes,
        duration_minutes,
        parse_rounding(rounding)?,
    )
    .map_err(|e| e.to_string())?;
    to_json(&slots)
}

fn rank_json(slots_json: &str) -> Result<String, String> {
    to_json(&slot_engine::rank(parse_slots_json(slots_json)?))
}

fn top_json(slots_json: &str, n: usize, min_percentage: f64) -> Result<String, String> {
    to_json(&slot_engine::top(&parse_slots_json(slots_json)?, n, min_percentage))
}

fn expand_json(
    start_date: &str,
    end_date: &str,
    time_range: &str,
    timezone: &str,
    interval_minutes: u32,
) -> Result<String, String> {
    let windows =
        slot_engine::window::expand_str(start_date, end_date, time_range, timezone, interval_minutes)
            .map_err(|e| e.to_string())?;
    to_json(&windows)
}

fn format_json(slot_json: &str, locale: &str) -> Result<String, String> {
    let slot: CandidateSlot =
        serde_json::from_str(slot_json).map_err(|e| format!("Invalid slot JSON: {}", e))?;
    let locale = Locale::by_code(locale).map_err(|e| e.to_string())?;
    Ok(slot_engine::format_slot(&slot, &locale))
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Compute a candidate slot for every start offset of one scan window.
///
/// `schedules_json` is a JSON array of `{identity, availability_codes}` where
/// `availability_codes` is either a view string (`"0022"`) or an array of
/// digits. Returns a JSON array of candidate slots in offset order.
///
/// # Arguments
/// - `window_start` -- ISO 8601 instant of the first interval
/// - `interval_minutes` -- Availability sampling interval
/// - `duration_minutes` -- Meeting length
/// - `rounding` -- `"floor"` (default) or `"ceil"`
#[wasm_bindgen(js_name = "scanAvailability")]
pub fn scan_availability(
    schedules_json: &str,
    window_start: &str,
    interval_minutes: u32,
    duration_minutes: u32,
    rounding: Option<String>,
) -> Result<String, JsValue> {
    scan_json(
        schedules_json,
        window_start,
        interval_minutes,
        duration_minutes,
        rounding.as_deref(),
    )
    .map_err(|e| JsValue::from_str(&e))
}

/// Sort candidate slots by available count (descending), then start time.
#[wasm_bindgen(js_name = "rankSlots")]
pub fn rank_slots(slots_json: &str) -> Result<String, JsValue> {
    rank_json(slots_json).map_err(|e| JsValue::from_str(&e))
}

/// Keep the first `n` ranked slots at or above `min_percentage`.
#[wasm_bindgen(js_name = "topSlots")]
pub fn top_slots(slots_json: &str, n: usize, min_percentage: f64) -> Result<String, JsValue> {
    top_json(slots_json, n, min_percentage).map_err(|e| JsValue::from_str(&e))
}

/// One `{start_time, end_time, interval_minutes}` window per weekday.
#[wasm_bindgen(js_name = "expandBusinessDays")]
pub fn expand_business_days(
    start_date: &str,
    end_date: &str,
    time_range: &str,
    timezone: &str,
    interval_minutes: u32,
) -> Result<String, JsValue> {
    expand_json(start_date, end_date, time_range, timezone, interval_minutes)
        .map_err(|e| JsValue::from_str(&e))
}

/// Render one slot for display. `locale` is `"tr"` or `"en"`.
#[wasm_bindgen(js_name = "formatSlot")]
pub fn format_slot(slot_json: &str, locale: &str) -> Result<String, JsValue> {
    format_json(slot_json, locale).map_err(|e| JsValue::from_str(&e))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCHEDULES: &str = r#"[
        {"identity": "p1", "availability_codes": "0022"},
        {"identity": "p2", "availability_codes": [0, 0, 0, 2]},
        {"identity": "p3", "availability_codes": "2222"}
    ]"#;

    fn scanned() -> Vec<serde_json::Value> {
        let json = scan_json(SCHEDULES, "2025-11-17T09:00:00+03:00", 30, 60, None).unwrap();
        serde_json::from_str(&json).unwrap()
    }

    #[test]
    fn scan_accepts_views_and_digit_arrays() {
        let slots = scanned();
        assert_eq!(slots.len(), 3);
        assert_eq!(slots[0]["available_count"], 2);
        assert_eq!(slots[1]["available_count"], 1);
        assert_eq!(slots[2]["available_count"], 0);
        assert_eq!(slots[0]["start_time"], "2025-11-17T09:00:00+03:00");
    }

    #[test]
    fn scan_rejects_malformed_codes() {
        let err = scan_json(
            r#"[{"identity": "p1", "availability_codes": "0052"}]"#,
            "2025-11-17T09:00:00+03:00",
            30,
            60,
            None,
        )
        .unwrap_err();
        assert!(err.contains("p1"));
    }

    #[test]
    fn naive_start_is_utc() {
        let json = scan_json(SCHEDULES, "2025-11-17T09:00:00", 30, 60, Some("ceil")).unwrap();
        let slots: Vec<CandidateSlot> = serde_json::from_str(&json).unwrap();
        assert_eq!(slots[0].start_time.offset().local_minus_utc(), 0);
        assert_eq!(slots[0].start_time.to_rfc3339(), "2025-11-17T09:00:00+00:00");
    }

    #[test]
    fn unknown_rounding_is_rejected() {
        assert!(scan_json(SCHEDULES, "2025-11-17T09:00:00Z", 30, 60, Some("up")).is_err());
    }

    #[test]
    fn rank_then_top_then_format() {
        let scanned = scan_json(SCHEDULES, "2025-11-17T09:00:00+03:00", 30, 60, None).unwrap();
        let ranked = rank_json(&scanned).unwrap();
        let top: Vec<serde_json::Value> =
            serde_json::from_str(&top_json(&ranked, 5, 50.0).unwrap()).unwrap();
        assert_eq!(top.len(), 1);

        let formatted = format_json(&top[0].to_string(), "en").unwrap();
        assert_eq!(
            formatted,
            "17 November 2025, 09:00 - 10:00 (2/3 participants available, 67%)"
        );
    }

    #[test]
    fn expand_skips_weekends() {
        let json = expand_json("2025-11-15", "2025-11-17", "09:00-17:00", "Europe/Istanbul", 30)
            .unwrap();
        let windows: Vec<serde_json::Value> = serde_json::from_str(&json).unwrap();
        assert_eq!(windows.len(), 1);
        assert_eq!(windows[0]["start_time"], "2025-11-17T09:00:00+03:00");
        assert_eq!(windows[0]["interval_minutes"], 30);
    }
}

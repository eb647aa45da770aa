//! Tests for the slot scanner.

use chrono::{DateTime, FixedOffset};
use slot_engine::availability::ParticipantSchedule;
use slot_engine::scanner::{intervals_needed, scan, scan_window, IntervalRounding};
use slot_engine::window::ScanWindow;
use slot_engine::{rank, SlotError};

// ── Helpers ─────────────────────────────────────────────────────────────────

fn at(s: &str) -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339(s).unwrap()
}

fn schedules(views: &[(&str, &str)]) -> Vec<ParticipantSchedule> {
    views
        .iter()
        .map(|(id, view)| ParticipantSchedule::parse(*id, view).unwrap())
        .collect()
}

fn nine_am() -> DateTime<FixedOffset> {
    at("2025-11-17T09:00:00+03:00")
}

// ── Three participants, 60 minutes on a 30-minute grid ──────────────────────

#[test]
fn three_participant_scenario() {
    let input = schedules(&[("p1", "0022"), ("p2", "0002"), ("p3", "2222")]);

    let slots = scan(&input, nine_am(), 30, 60, IntervalRounding::Floor).unwrap();
    assert_eq!(slots.len(), 3);

    // Offset 0: p1 "00", p2 "00", p3 "22".
    assert_eq!(slots[0].start_time, at("2025-11-17T09:00:00+03:00"));
    assert_eq!(slots[0].end_time, at("2025-11-17T10:00:00+03:00"));
    assert_eq!(slots[0].available_participants, vec!["p1", "p2"]);
    assert_eq!(slots[0].busy_participants, vec!["p3"]);
    assert_eq!(slots[0].available_count, 2);
    assert_eq!(slots[0].total_participants, 3);
    assert!((slots[0].availability_percentage - 200.0 / 3.0).abs() < 1e-9);

    // Offset 1: p1 "02", p2 "00", p3 "22".
    assert_eq!(slots[1].start_time, at("2025-11-17T09:30:00+03:00"));
    assert_eq!(slots[1].available_participants, vec!["p2"]);
    assert_eq!(slots[1].busy_participants, vec!["p1", "p3"]);

    // Offset 2: everyone busy.
    assert_eq!(slots[2].start_time, at("2025-11-17T10:00:00+03:00"));
    assert_eq!(slots[2].available_count, 0);
    assert_eq!(slots[2].busy_count(), 3);
    assert_eq!(slots[2].availability_percentage, 0.0);

    assert!(slots.iter().all(|s| s.duration_minutes() == 60));

    let ranked = rank(slots.clone());
    assert_eq!(ranked, slots);
}

#[test]
fn low_availability_offsets_are_not_dropped() {
    let input = schedules(&[("a", "2222"), ("b", "3333")]);
    let slots = scan(&input, nine_am(), 30, 30, IntervalRounding::Floor).unwrap();
    assert_eq!(slots.len(), 4);
    assert!(slots.iter().all(|s| s.available_count == 0));
}

#[test]
fn tentative_counts_as_available() {
    let input = schedules(&[("a", "11"), ("b", "14")]);
    let slots = scan(&input, nine_am(), 30, 60, IntervalRounding::Floor).unwrap();
    assert_eq!(slots.len(), 1);
    assert_eq!(slots[0].available_participants, vec!["a"]);
    assert_eq!(slots[0].busy_participants, vec!["b"]);
}

// ── Short sequences ─────────────────────────────────────────────────────────

#[test]
fn short_sequences_are_excluded_but_still_counted_in_total() {
    let input = schedules(&[("long", "0000"), ("short", "00")]);

    let slots = scan(&input, nine_am(), 30, 60, IntervalRounding::Floor).unwrap();
    assert_eq!(slots.len(), 3, "offsets come from the longest sequence");

    assert_eq!(slots[0].available_count, 2);
    assert_eq!(slots[0].availability_percentage, 100.0);

    for slot in &slots[1..] {
        assert_eq!(slot.available_participants, vec!["long"]);
        assert!(slot.busy_participants.is_empty());
        assert_eq!(slot.total_participants, 2);
        assert_eq!(slot.availability_percentage, 50.0);
        assert_eq!(slot.uncovered_count(), 1);
        assert!(slot.available_count + slot.busy_count() < slot.total_participants);
    }
}

#[test]
fn participant_without_data_never_appears() {
    let input = schedules(&[("a", "000"), ("ghost", "")]);
    let slots = scan(&input, nine_am(), 30, 30, IntervalRounding::Floor).unwrap();
    assert_eq!(slots.len(), 3);
    for slot in &slots {
        assert_eq!(slot.total_participants, 2);
        assert!(!slot.available_participants.contains(&"ghost".to_string()));
        assert!(!slot.busy_participants.contains(&"ghost".to_string()));
    }
}

// ── Empty input ─────────────────────────────────────────────────────────────

#[test]
fn empty_schedule_list_yields_nothing() {
    let slots = scan(&[], nine_am(), 30, 60, IntervalRounding::Floor).unwrap();
    assert!(slots.is_empty());
}

#[test]
fn all_empty_sequences_yield_nothing() {
    let input = schedules(&[("a", ""), ("b", "")]);
    let slots = scan(&input, nine_am(), 30, 60, IntervalRounding::Floor).unwrap();
    assert!(slots.is_empty());
}

#[test]
fn meeting_longer_than_every_sequence_yields_nothing() {
    let input = schedules(&[("a", "00"), ("b", "0")]);
    let slots = scan(&input, nine_am(), 30, 90, IntervalRounding::Floor).unwrap();
    assert!(slots.is_empty());
}

// ── Rounding and configuration ──────────────────────────────────────────────

#[test]
fn intervals_needed_floor_and_ceil() {
    assert_eq!(intervals_needed(60, 30, IntervalRounding::Floor).unwrap(), 2);
    assert_eq!(intervals_needed(60, 30, IntervalRounding::Ceil).unwrap(), 2);
    assert_eq!(intervals_needed(45, 30, IntervalRounding::Floor).unwrap(), 1);
    assert_eq!(intervals_needed(45, 30, IntervalRounding::Ceil).unwrap(), 2);
    assert_eq!(intervals_needed(15, 30, IntervalRounding::Ceil).unwrap(), 1);
}

#[test]
fn floor_checks_only_whole_intervals() {
    let input = schedules(&[("a", "02")]);

    let floor = scan(&input, nine_am(), 30, 45, IntervalRounding::Floor).unwrap();
    assert_eq!(floor.len(), 2);
    assert_eq!(floor[0].available_count, 1, "floor ignores the busy second half");
    assert_eq!(floor[0].end_time, at("2025-11-17T09:45:00+03:00"));

    let ceil = scan(&input, nine_am(), 30, 45, IntervalRounding::Ceil).unwrap();
    assert_eq!(ceil.len(), 1);
    assert_eq!(ceil[0].available_count, 0);
    assert_eq!(ceil[0].end_time, at("2025-11-17T09:45:00+03:00"));
}

#[test]
fn zero_interval_is_a_config_error() {
    let input = schedules(&[("a", "00")]);
    let err = scan(&input, nine_am(), 0, 60, IntervalRounding::Floor).unwrap_err();
    assert!(err.is_config_error());
}

#[test]
fn zero_duration_is_a_config_error() {
    let err = scan(&[], nine_am(), 30, 0, IntervalRounding::Floor).unwrap_err();
    assert!(matches!(err, SlotError::InvalidConfig(_)));
}

#[test]
fn sub_interval_duration_fails_under_floor() {
    let err = intervals_needed(15, 30, IntervalRounding::Floor).unwrap_err();
    assert!(err.is_config_error());
}

// ── Scan windows ────────────────────────────────────────────────────────────

#[test]
fn scan_window_uses_window_start_and_interval() {
    let window = ScanWindow {
        start_time: at("2025-11-18T13:00:00+03:00"),
        end_time: at("2025-11-18T15:00:00+03:00"),
        interval_minutes: 60,
    };
    let input = schedules(&[("a", "00")]);
    let slots = scan_window(&input, &window, 60, IntervalRounding::Floor).unwrap();
    assert_eq!(slots.len(), 2);
    assert_eq!(slots[1].start_time, at("2025-11-18T14:00:00+03:00"));
    assert_eq!(slots[1].end_time, at("2025-11-18T15:00:00+03:00"));
}

#[test]
fn slots_serialize_with_offset_timestamps() {
    let input = schedules(&[("a", "00")]);
    let slots = scan(&input, nine_am(), 30, 60, IntervalRounding::Floor).unwrap();
    let json = serde_json::to_value(&slots[0]).unwrap();
    assert_eq!(json["start_time"], "2025-11-17T09:00:00+03:00");
    assert_eq!(json["end_time"], "2025-11-17T10:00:00+03:00");
    assert_eq!(json["available_count"], 1);
    assert_eq!(json["total_participants"], 1);
    assert_eq!(json["availability_percentage"], 100.0);
    assert_eq!(json["available_participants"][0], "a");
    assert!(json["busy_participants"].as_array().unwrap().is_empty());
}

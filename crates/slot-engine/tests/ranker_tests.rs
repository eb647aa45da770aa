//! Tests for ranking and top-N filtering.

use chrono::{DateTime, FixedOffset};
use slot_engine::ranker::{rank, top, DEFAULT_MIN_PERCENTAGE, DEFAULT_TOP_N};
use slot_engine::CandidateSlot;

/// A slot with `available` of `total` participants free.
fn slot(start: &str, available: usize, total: usize) -> CandidateSlot {
    let start: DateTime<FixedOffset> = DateTime::parse_from_rfc3339(start).unwrap();
    let available_participants = (0..available).map(|i| format!("p{}", i)).collect();
    let busy_participants = (available..total).map(|i| format!("p{}", i)).collect();
    CandidateSlot::new(
        start,
        start + chrono::Duration::minutes(60),
        available_participants,
        busy_participants,
        total,
    )
}

fn starts(slots: &[CandidateSlot]) -> Vec<String> {
    slots.iter().map(|s| s.start_time.to_rfc3339()).collect()
}

#[test]
fn more_available_participants_rank_first() {
    let ranked = rank(vec![
        slot("2025-11-17T09:00:00+03:00", 1, 3),
        slot("2025-11-17T09:30:00+03:00", 3, 3),
        slot("2025-11-17T10:00:00+03:00", 2, 3),
    ]);
    let counts: Vec<usize> = ranked.iter().map(|s| s.available_count).collect();
    assert_eq!(counts, vec![3, 2, 1]);
}

#[test]
fn ties_break_on_earliest_start() {
    let ranked = rank(vec![
        slot("2025-11-18T09:00:00+03:00", 2, 3),
        slot("2025-11-17T14:00:00+03:00", 2, 3),
        slot("2025-11-17T09:30:00+03:00", 2, 3),
    ]);
    assert_eq!(
        starts(&ranked),
        vec![
            "2025-11-17T09:30:00+03:00",
            "2025-11-17T14:00:00+03:00",
            "2025-11-18T09:00:00+03:00",
        ]
    );
}

#[test]
fn ties_compare_instants_not_wall_clock_text() {
    // 10:00+03:00 is 07:00Z, earlier than 08:00+00:00 despite the larger hour.
    let ranked = rank(vec![
        slot("2025-11-17T08:00:00+00:00", 1, 2),
        slot("2025-11-17T10:00:00+03:00", 1, 2),
    ]);
    assert_eq!(
        starts(&ranked),
        vec!["2025-11-17T10:00:00+03:00", "2025-11-17T08:00:00+00:00"]
    );
}

#[test]
fn rank_of_empty_list_is_empty() {
    assert!(rank(Vec::new()).is_empty());
}

#[test]
fn top_filters_by_percentage_then_truncates() {
    let ranked = rank(vec![
        slot("2025-11-17T09:00:00+03:00", 4, 4),
        slot("2025-11-17T09:30:00+03:00", 3, 4),
        slot("2025-11-17T10:00:00+03:00", 2, 4),
        slot("2025-11-17T10:30:00+03:00", 1, 4),
    ]);

    let picked = top(&ranked, 10, 50.0);
    assert_eq!(picked.len(), 3, "50% is inclusive");
    assert!(picked.iter().all(|s| s.availability_percentage >= 50.0));

    let picked = top(&ranked, 2, 50.0);
    assert_eq!(starts(&picked), starts(&ranked[..2]));
}

#[test]
fn top_does_not_resort() {
    let unsorted = vec![
        slot("2025-11-17T10:00:00+03:00", 2, 4),
        slot("2025-11-17T09:00:00+03:00", 4, 4),
    ];
    let picked = top(&unsorted, 5, 0.0);
    assert_eq!(starts(&picked), starts(&unsorted));
}

#[test]
fn top_with_nothing_above_threshold_is_empty() {
    let ranked = rank(vec![slot("2025-11-17T09:00:00+03:00", 1, 5)]);
    assert!(top(&ranked, DEFAULT_TOP_N, DEFAULT_MIN_PERCENTAGE).is_empty());
}

#[test]
fn top_zero_returns_nothing() {
    let ranked = rank(vec![slot("2025-11-17T09:00:00+03:00", 5, 5)]);
    assert!(top(&ranked, 0, 0.0).is_empty());
}

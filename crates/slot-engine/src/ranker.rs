//! Rank candidate slots and pick the best suggestions.

use std::cmp::Reverse;

use crate::slot::CandidateSlot;

/// Number of suggestions returned when the caller does not choose.
pub const DEFAULT_TOP_N: usize = 5;

/// Minimum availability percentage for a suggestion when the caller does not choose.
pub const DEFAULT_MIN_PERCENTAGE: f64 = 50.0;

/// Sort candidates by available participant count (descending), then by
/// start instant (ascending).
///
/// Start times are compared as instants, so slots from windows with
/// different UTC offsets still order chronologically. The sort is stable.
pub fn rank(mut candidates: Vec<CandidateSlot>) -> Vec<CandidateSlot> {
    rank_in_place(&mut candidates);
    candidates
}

/// In-place variant of [`rank`].
pub fn rank_in_place(candidates: &mut [CandidateSlot]) {
    candidates.sort_by_key(|slot| (Reverse(slot.available_count), slot.start_time));
}

/// Keep the first `n` candidates whose availability percentage is at least
/// `min_percentage`.
///
/// `candidates` is expected to be ranked already; the order is preserved and
/// nothing is re-sorted.
pub fn top(candidates: &[CandidateSlot], n: usize, min_percentage: f64) -> Vec<CandidateSlot> {
    candidates
        .iter()
        .filter(|slot| slot.availability_percentage >= min_percentage)
        .take(n)
        .cloned()
        .collect()
}

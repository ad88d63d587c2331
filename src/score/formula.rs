//! Round score.
//!
//! ```text
//! score = ceil(time_remaining) * time_points
//!       + match_count * match_points
//!       + min(max_rank_try_count - try_count, 0) * -try_penalty
//! ```
//!
//! `max_rank_try_count` is `try_count * 3`, taken from the live try count
//! when the score is read. With non-negative try counts the last term is
//! therefore always zero. The term is kept as written because changing it
//! changes game balance.

use crate::core::RoundRules;

/// Try budget for the top rank, derived from the current try count.
#[must_use]
pub fn max_rank_try_count(try_count: u32) -> i64 {
    i64::from(try_count) * 3
}

/// Score of a round in its current state.
#[must_use]
pub fn compute_score(time_remaining: f32, match_count: usize, try_count: u32, rules: &RoundRules) -> i64 {
    let time_term = time_remaining.ceil() as i64 * rules.time_points;
    let match_term = match_count as i64 * rules.match_points;
    let try_term = (max_rank_try_count(try_count) - i64::from(try_count)).min(0) * -rules.try_penalty;
    time_term + match_term + try_term
}

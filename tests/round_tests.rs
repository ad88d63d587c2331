//! Turn resolution and countdown tests.
//!
//! These drive a `Round` over fixed layouts so every pick is predictable.

use pairs_engine::cards::{CardIndex, CardState};
use pairs_engine::core::{RoundRules, StageEntry, SymbolCatalog};
use pairs_engine::round::{Round, RoundOutcome, Signal};

fn card(i: usize) -> CardIndex {
    CardIndex::new(i)
}

/// 8 cards, 4 symbols: positions 0..4 hold symbols 0..4, positions 4..8
/// hold them again, so card `i` pairs with card `i + 4`.
fn eight_card_round(time_budget: f32) -> Round {
    Round::from_deck(
        0,
        StageEntry::new(8, time_budget),
        RoundRules::default(),
        &SymbolCatalog::numbered(4),
        vec![0, 1, 2, 3, 0, 1, 2, 3],
    )
    .unwrap()
}

fn make_ready(round: &mut Round) {
    for _ in 0..round.card_count() {
        round.on_card_ready();
    }
}

fn reveal_all(round: &mut Round) {
    for i in 0..round.card_count() {
        round.on_reveal_complete(card(i));
    }
}

fn ready_round(time_budget: f32) -> Round {
    let mut round = eight_card_round(time_budget);
    make_ready(&mut round);
    reveal_all(&mut round);
    round.drain_signals();
    round
}

// =============================================================================
// Ready gate
// =============================================================================

/// Eight ready signals start the countdown; half the budget triggers hurry-up.
#[test]
fn test_stage_ready_then_hurry_up() {
    let mut round = eight_card_round(60.0);

    for _ in 0..7 {
        round.on_card_ready();
        assert!(!round.is_stage_ready());
    }
    round.on_card_ready();
    assert!(round.is_stage_ready());
    assert!(round.drain_signals().contains(&Signal::StageReady));

    assert_eq!(round.tick(29.0), None);
    assert!(!round.is_hurry_up());
    assert!(!round.drain_signals().contains(&Signal::HurryUp(true)));

    assert_eq!(round.tick(1.0), None);
    assert_eq!(round.current_time(), 30.0);
    assert!(round.is_hurry_up());
    assert!(round.drain_signals().contains(&Signal::HurryUp(true)));

    // Keeps firing once past the threshold
    round.tick(1.0);
    assert!(round.drain_signals().contains(&Signal::HurryUp(true)));
}

/// Cards start their reveal together, only once everyone is ready.
#[test]
fn test_bulk_reveal() {
    let mut round = eight_card_round(60.0);
    make_ready(&mut round);

    assert!(round.cards().all(|c| c.state == CardState::Opening));

    round.on_reveal_complete(card(3));
    assert_eq!(round.card_at(card(3)).unwrap().state, CardState::Open);
    assert_eq!(round.card_at(card(2)).unwrap().state, CardState::Opening);
}

// =============================================================================
// Selection protocol
// =============================================================================

/// Picking the held card again does nothing.
#[test]
fn test_reselect_held_card_is_noop() {
    let mut round = ready_round(60.0);

    round.select_card(card(0));
    round.select_card(card(0));
    round.select_card(card(0));

    assert_eq!(round.pending_selection(), Some(card(0)));
    assert_eq!(round.current_try_count(), 0);
    assert_eq!(round.match_count(), 0);
    assert_eq!(round.current_time(), 60.0);
}

/// A match retires both cards, counts a try, and costs no time.
#[test]
fn test_match_resolution() {
    let mut round = ready_round(60.0);

    round.select_card(card(1));
    assert_eq!(round.select_card(card(5)), None);

    assert_eq!(round.match_count(), 1);
    assert_eq!(round.current_try_count(), 1);
    assert_eq!(round.current_time(), 60.0);
    assert_eq!(round.card_at(card(1)).unwrap().state, CardState::Matched);
    assert_eq!(round.card_at(card(5)).unwrap().state, CardState::Matched);
    assert_eq!(round.pending_selection(), None);

    let signals = round.drain_signals();
    assert!(signals.contains(&Signal::MatchFeedback { slot: 1 }));
    assert!(signals.contains(&Signal::TryCount(1)));
}

/// Match messages rotate by symbol modulo the slot count.
#[test]
fn test_match_feedback_slot_wraps() {
    let mut round = ready_round(60.0);

    round.select_card(card(3));
    round.select_card(card(7));

    assert!(round.drain_signals().contains(&Signal::MatchFeedback { slot: 0 }));
}

/// A mismatch flips both cards back and costs exactly the penalty.
#[test]
fn test_mismatch_resolution() {
    let mut round = ready_round(60.0);
    round.tick(10.0);
    let before = round.current_time();

    round.select_card(card(0));
    round.select_card(card(1));

    assert_eq!(round.current_time(), before - 3.0);
    assert_eq!(round.match_count(), 0);
    assert_eq!(round.current_try_count(), 1);
    assert_eq!(round.card_at(card(0)).unwrap().state, CardState::Closed);
    assert_eq!(round.card_at(card(1)).unwrap().state, CardState::Closed);
    assert!(round.drain_signals().contains(&Signal::MismatchFeedback));
}

/// A held card that is still revealing is dropped for the new pick.
#[test]
fn test_stale_first_pick_is_replaced() {
    let mut round = eight_card_round(60.0);
    make_ready(&mut round);

    // Card 0 is still Opening
    round.on_reveal_complete(card(4));
    round.select_card(card(0));
    round.select_card(card(4));

    assert_eq!(round.pending_selection(), Some(card(4)));
    assert_eq!(round.current_try_count(), 0);
    assert_eq!(round.match_count(), 0);

    // Finish card 0's reveal; pairing with the fresh hold now resolves
    round.on_reveal_complete(card(0));
    round.select_card(card(0));
    assert_eq!(round.match_count(), 1);
    assert_eq!(round.current_try_count(), 1);
}

/// Flipped-back cards can be picked again: they re-open first.
#[test]
fn test_closed_card_reopens_when_picked() {
    let mut round = ready_round(60.0);

    round.select_card(card(0));
    round.select_card(card(1));
    assert_eq!(round.card_at(card(0)).unwrap().state, CardState::Closed);

    round.select_card(card(0));
    assert_eq!(round.card_at(card(0)).unwrap().state, CardState::Opening);
    assert_eq!(round.pending_selection(), Some(card(0)));

    round.on_reveal_complete(card(0));
    round.select_card(card(4));
    assert_eq!(round.match_count(), 1);
    assert_eq!(round.current_try_count(), 2);
}

/// Matched cards cannot be picked.
#[test]
fn test_matched_card_ignored() {
    let mut round = ready_round(60.0);
    round.select_card(card(0));
    round.select_card(card(4));

    round.select_card(card(0));
    assert_eq!(round.pending_selection(), None);
}

/// Out-of-range indices are ignored.
#[test]
fn test_unknown_card_ignored() {
    let mut round = ready_round(60.0);
    round.select_card(card(99));
    round.on_reveal_complete(card(99));

    assert_eq!(round.pending_selection(), None);
    assert!(round.card_at(card(99)).is_none());
}

// =============================================================================
// Terminal states
// =============================================================================

/// Clearing every pair wins; the clock stops.
#[test]
fn test_win_freezes_clock() {
    let mut round = ready_round(60.0);
    round.tick(5.0);

    for i in 0..3 {
        round.select_card(card(i));
        assert_eq!(round.select_card(card(i + 4)), None);
    }
    round.select_card(card(3));
    assert_eq!(round.select_card(card(7)), Some(RoundOutcome::Win));

    let signals = round.drain_signals();
    assert!(signals.contains(&Signal::StageClear));
    assert!(signals.contains(&Signal::Score(55 * 100 + 4 * 200)));

    round.tick(10.0);
    round.tick(100.0);
    assert_eq!(round.current_time(), 55.0);
    assert_eq!(round.current_score(), 55 * 100 + 4 * 200);

    round.select_card(card(0));
    assert_eq!(round.current_try_count(), 4);
}

/// The countdown reaching zero loses the round once, clamped to zero.
#[test]
fn test_timeout_loss() {
    let mut round = ready_round(10.0);
    round.select_card(card(0));
    round.select_card(card(4));

    assert_eq!(round.tick(9.5), None);
    assert_eq!(round.tick(1.0), Some(RoundOutcome::Loss));
    assert_eq!(round.current_time(), 0.0);
    assert!(round.is_over());

    let signals = round.drain_signals();
    assert_eq!(signals.iter().filter(|s| **s == Signal::StageFail).count(), 1);

    assert_eq!(round.tick(1.0), None);
    assert!(round.drain_signals().is_empty());

    let summary = round.summary().unwrap();
    assert_eq!(summary.outcome, RoundOutcome::Loss);
    assert_eq!(summary.match_count, 1);
    assert_eq!(summary.score, 200);
}

/// Picks after the round ended change nothing.
#[test]
fn test_no_picks_after_loss() {
    let mut round = ready_round(1.0);
    round.tick(2.0);

    round.select_card(card(0));
    round.select_card(card(4));

    assert_eq!(round.match_count(), 0);
    assert_eq!(round.pending_selection(), None);
}

/// Penalties can push the clock below zero internally, never visibly.
#[test]
fn test_penalty_never_visible_below_zero() {
    let mut round = ready_round(4.0);
    round.tick(2.0);

    round.select_card(card(0));
    round.select_card(card(1));
    assert_eq!(round.current_time(), 0.0);
    assert!(round.current_score() >= 0);

    assert_eq!(round.tick(0.016), Some(RoundOutcome::Loss));
    assert_eq!(round.current_time(), 0.0);
}

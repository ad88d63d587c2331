//! A single cell of the grid and its reveal state machine.
//!
//! ```text
//! Closed --begin_reveal--> Opening --on_reveal_complete--> Open
//!   ^                                                       |
//!   +------------------ on_mismatch_flip -------------------+
//!                                                           |
//!                          Matched <----- on_matched -------+
//! ```
//!
//! `Matched` is terminal for the rest of the round. A card whose reveal is
//! still running (`Opening`) reports `is_transitioning()`, which the round
//! uses to reject a stale first pick.

use serde::{Deserialize, Serialize};

/// Position of a card in the stage's deck. Inbound events refer to cards by
/// this index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardIndex(pub usize);

impl CardIndex {
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    #[must_use]
    pub const fn raw(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for CardIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Visible state of a card.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardState {
    /// Face down.
    #[default]
    Closed,
    /// Reveal animation running.
    Opening,
    /// Face up and selectable.
    Open,
    /// Paired and retired.
    Matched,
}

/// A card: its symbol and reveal state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    symbol: usize,
    state: CardState,
}

impl Card {
    /// A face-down card bearing `symbol`.
    #[must_use]
    pub fn new(symbol: usize) -> Self {
        Self {
            symbol,
            state: CardState::Closed,
        }
    }

    #[must_use]
    pub fn symbol(&self) -> usize {
        self.symbol
    }

    #[must_use]
    pub fn state(&self) -> CardState {
        self.state
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.state == CardState::Open
    }

    #[must_use]
    pub fn is_matched(&self) -> bool {
        self.state == CardState::Matched
    }

    /// Is the reveal animation still running?
    #[must_use]
    pub fn is_transitioning(&self) -> bool {
        self.state == CardState::Opening
    }

    /// Closed -> Opening. Returns whether the card moved.
    pub fn begin_reveal(&mut self) -> bool {
        self.transition(CardState::Closed, CardState::Opening)
    }

    /// Opening -> Open, fired when the presentation layer finishes the reveal.
    pub fn on_reveal_complete(&mut self) -> bool {
        self.transition(CardState::Opening, CardState::Open)
    }

    /// The card's symbol if it can be picked right now (only when `Open`).
    #[must_use]
    pub fn select(&self) -> Option<usize> {
        self.is_open().then_some(self.symbol)
    }

    /// Retire the card as part of a matched pair.
    ///
    /// Accepted from `Opening` too: the second pick of a turn is resolved
    /// even if its own reveal has not finished.
    pub fn on_matched(&mut self) -> bool {
        match self.state {
            CardState::Open | CardState::Opening => {
                self.state = CardState::Matched;
                true
            }
            _ => false,
        }
    }

    /// Flip the card face down after a mismatch.
    pub fn on_mismatch_flip(&mut self) -> bool {
        match self.state {
            CardState::Open | CardState::Opening => {
                self.state = CardState::Closed;
                true
            }
            _ => false,
        }
    }

    fn transition(&mut self, from: CardState, to: CardState) -> bool {
        if self.state == from {
            self.state = to;
            true
        } else {
            false
        }
    }
}

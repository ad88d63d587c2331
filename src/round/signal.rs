//! Outbound signals for the presentation layer.
//!
//! The round never calls into audio, text or animation code. It queues
//! `Signal`s and the presentation layer drains them once per frame.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// Something the presentation layer may want to react to.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Signal {
    /// A stage was (re)loaded and its deck dealt.
    StageLoaded { stage: usize },
    /// Every card reported ready; the countdown is running.
    StageReady,
    /// A pair was matched. `slot` picks one of the rotating success messages.
    MatchFeedback { slot: usize },
    /// A pair did not match.
    MismatchFeedback,
    /// All pairs matched.
    StageClear,
    /// The countdown ran out.
    StageFail,
    /// Hurry-up state. `false` is only sent on stage load.
    HurryUp(bool),
    Score(i64),
    TimeRemaining(f32),
    TryCount(u32),
    /// Best score for display; sent on load and when beaten.
    BestScore(i64),
}

/// FIFO outbox of signals.
#[derive(Clone, Debug, Default)]
pub struct SignalQueue {
    pending: VecDeque<Signal>,
}

impl SignalQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, signal: Signal) {
        self.pending.push_back(signal);
    }

    /// Take every queued signal, oldest first.
    pub fn drain(&mut self) -> Vec<Signal> {
        self.pending.drain(..).collect()
    }

    /// Queued signals without consuming them.
    pub fn iter(&self) -> impl Iterator<Item = &Signal> {
        self.pending.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

//! The round: deck, selection protocol, countdown and win/loss detection.
//!
//! ## Turn protocol
//!
//! Selection alternates between "nothing held" and "first pick held":
//!
//! 1. Picking the held card again is a no-op.
//! 2. With nothing held, the pick is held and the round waits.
//! 3. With a card held, the held card must be `Open` and not mid-reveal.
//!    If it is not, it is dropped and the new pick is held instead. No try
//!    is counted.
//! 4. Otherwise both cards resolve: equal symbols match (+1 match, win when
//!    every pair is matched), different symbols flip back and cost
//!    `mismatch_penalty` seconds.
//! 5. The try counter advances and the hold is cleared.
//!
//! ## Countdown
//!
//! The clock only runs once every card has reported ready (`on_card_ready`)
//! and stops for good when the round is over. Time can dip below zero after
//! a mismatch penalty; the next tick clamps it and fails the stage.

use serde::{Deserialize, Serialize};

use super::signal::{Signal, SignalQueue};
use crate::cards::{check_deck, generate_deck, Card, CardIndex, CardState, DeckError};
use crate::core::{GameRng, RoundRules, StageEntry, SymbolCatalog};
use crate::score::compute_score;

/// How a round ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoundOutcome {
    /// Every pair matched.
    Win,
    /// The countdown reached zero.
    Loss,
}

/// Read-only view of a card for the presentation layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardView {
    pub index: CardIndex,
    pub symbol: usize,
    pub state: CardState,
}

/// Result panel data of a finished round.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoundSummary {
    pub stage: usize,
    pub outcome: RoundOutcome,
    pub time_remaining: f32,
    pub try_count: u32,
    pub match_count: usize,
    pub score: i64,
}

impl std::fmt::Display for RoundSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Time left: {:.2} / Tries: {} / Score: {}",
            self.time_remaining, self.try_count, self.score
        )
    }
}

/// One attempt at one stage.
#[derive(Clone, Debug)]
pub struct Round {
    stage: usize,
    entry: StageEntry,
    rules: RoundRules,
    cards: Vec<Card>,
    time_remaining: f32,
    try_count: u32,
    match_count: usize,
    ready_count: usize,
    pending: Option<CardIndex>,
    outcome: Option<RoundOutcome>,
    hurry_up: bool,
    signals: SignalQueue,
}

impl Round {
    /// Deal a freshly shuffled deck for `stage`.
    pub fn new(
        stage: usize,
        entry: StageEntry,
        rules: RoundRules,
        symbols: &SymbolCatalog,
        rng: &mut GameRng,
    ) -> Result<Self, DeckError> {
        let deck = generate_deck(entry.symbol_count(), symbols.len(), rng)?;
        Self::from_deck(stage, entry, rules, symbols, deck)
    }

    /// Build a round over a fixed layout of symbol indices.
    ///
    /// The layout's length becomes the card count. Every symbol must come
    /// from `symbols` and appear exactly twice.
    pub fn from_deck(
        stage: usize,
        entry: StageEntry,
        rules: RoundRules,
        symbols: &SymbolCatalog,
        deck: Vec<usize>,
    ) -> Result<Self, DeckError> {
        check_deck(&deck, symbols)?;

        let entry = StageEntry::new(deck.len(), entry.time_budget);
        let cards = deck.into_iter().map(Card::new).collect();

        let mut round = Self {
            stage,
            entry,
            rules,
            cards,
            time_remaining: entry.time_budget,
            try_count: 0,
            match_count: 0,
            ready_count: 0,
            pending: None,
            outcome: None,
            hurry_up: false,
            signals: SignalQueue::new(),
        };

        round.signals.push(Signal::StageLoaded { stage });
        round.signals.push(Signal::HurryUp(false));
        round.signals.push(Signal::TimeRemaining(round.current_time()));
        round.signals.push(Signal::TryCount(0));
        Ok(round)
    }

    // === Inbound events ===

    /// A card finished instantiating. When the last one reports in, every
    /// card starts its reveal and the countdown begins.
    pub fn on_card_ready(&mut self) {
        if self.is_ready() {
            log::debug!("Stage {}: extra ready signal ignored", self.stage);
            return;
        }

        self.ready_count += 1;
        if self.is_ready() {
            for card in &mut self.cards {
                card.begin_reveal();
            }
            log::debug!("Stage {}: all {} cards ready", self.stage, self.cards.len());
            self.signals.push(Signal::StageReady);
        }
    }

    /// The presentation layer finished the reveal animation of a card.
    pub fn on_reveal_complete(&mut self, index: CardIndex) {
        match self.cards.get_mut(index.raw()) {
            Some(card) => {
                card.on_reveal_complete();
            }
            None => log::debug!("Reveal complete for unknown {}", index),
        }
    }

    /// The player picked a card. Returns the outcome if this pick ended the
    /// round.
    pub fn select_card(&mut self, index: CardIndex) -> Option<RoundOutcome> {
        if self.is_over() || !self.is_ready() {
            log::debug!("Selection of {} ignored: round not accepting picks", index);
            return None;
        }
        let Some(card) = self.cards.get_mut(index.raw()) else {
            log::debug!("Selection of unknown {} ignored", index);
            return None;
        };
        if card.is_matched() {
            log::debug!("Selection of matched {} ignored", index);
            return None;
        }
        if self.pending == Some(index) {
            return None;
        }

        // A face-down pick starts revealing; it resolves once it is the
        // held card and open, or immediately as the second pick.
        card.begin_reveal();

        let Some(first) = self.pending else {
            self.pending = Some(index);
            return None;
        };

        let first_card = &self.cards[first.raw()];
        let Some(first_symbol) = first_card.select().filter(|_| !first_card.is_transitioning()) else {
            log::debug!("Held {} not open yet, holding {} instead", first, index);
            self.pending = Some(index);
            return None;
        };

        let outcome = if first_symbol == self.cards[index.raw()].symbol() {
            self.resolve_match(first, index, first_symbol)
        } else {
            self.resolve_mismatch(first, index);
            None
        };

        self.try_count += 1;
        self.pending = None;
        self.signals.push(Signal::TryCount(self.try_count));

        // `finish` reports the final score
        match outcome {
            Some(outcome) => self.finish(outcome),
            None => self.signals.push(Signal::Score(self.score())),
        }
        outcome
    }

    /// Advance the countdown by `delta` seconds. Returns the outcome if the
    /// clock ran out on this tick.
    pub fn tick(&mut self, delta: f32) -> Option<RoundOutcome> {
        if !self.is_ready() || self.is_over() {
            return None;
        }
        if !delta.is_finite() || delta < 0.0 {
            log::debug!("Stage {}: ignoring tick of {}", self.stage, delta);
            return None;
        }

        self.time_remaining -= delta;

        let mut ended = None;
        if self.time_remaining <= 0.0 {
            self.time_remaining = 0.0;
            self.finish(RoundOutcome::Loss);
            ended = Some(RoundOutcome::Loss);
        }
        self.signals.push(Signal::TimeRemaining(self.current_time()));

        if self.time_remaining <= self.hurry_up_time() {
            self.hurry_up = true;
            self.signals.push(Signal::HurryUp(true));
        }
        ended
    }

    fn resolve_match(&mut self, first: CardIndex, second: CardIndex, symbol: usize) -> Option<RoundOutcome> {
        self.cards[first.raw()].on_matched();
        self.cards[second.raw()].on_matched();
        self.match_count += 1;
        log::debug!("Stage {}: matched symbol {} ({}/{})", self.stage, symbol, self.match_count, self.symbol_count());

        self.signals.push(Signal::MatchFeedback {
            slot: symbol % self.rules.success_message_slots.max(1),
        });

        (self.match_count == self.symbol_count()).then_some(RoundOutcome::Win)
    }

    fn resolve_mismatch(&mut self, first: CardIndex, second: CardIndex) {
        self.cards[first.raw()].on_mismatch_flip();
        self.cards[second.raw()].on_mismatch_flip();
        self.time_remaining -= self.rules.mismatch_penalty;
        log::debug!("Stage {}: mismatch {} / {}", self.stage, first, second);

        self.signals.push(Signal::MismatchFeedback);
    }

    fn finish(&mut self, outcome: RoundOutcome) {
        if self.outcome.is_some() {
            return;
        }
        self.outcome = Some(outcome);
        self.pending = None;

        match outcome {
            RoundOutcome::Win => {
                log::info!("Stage {} cleared with {:.2}s left", self.stage, self.current_time());
                self.signals.push(Signal::StageClear);
            }
            RoundOutcome::Loss => {
                log::info!("Stage {} failed after {} tries", self.stage, self.try_count);
                self.signals.push(Signal::StageFail);
            }
        }
        self.signals.push(Signal::Score(self.score()));
    }

    // === Queries ===

    #[must_use]
    pub fn stage(&self) -> usize {
        self.stage
    }

    #[must_use]
    pub fn entry(&self) -> &StageEntry {
        &self.entry
    }

    #[must_use]
    pub fn rules(&self) -> &RoundRules {
        &self.rules
    }

    #[must_use]
    pub fn card_count(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn symbol_count(&self) -> usize {
        self.cards.len() / 2
    }

    /// Remaining time as shown to the player; never negative.
    #[must_use]
    pub fn current_time(&self) -> f32 {
        self.time_remaining.max(0.0)
    }

    #[must_use]
    pub fn current_try_count(&self) -> u32 {
        self.try_count
    }

    #[must_use]
    pub fn match_count(&self) -> usize {
        self.match_count
    }

    #[must_use]
    pub fn ready_count(&self) -> usize {
        self.ready_count
    }

    #[must_use]
    pub fn current_score(&self) -> i64 {
        self.score()
    }

    fn score(&self) -> i64 {
        compute_score(self.current_time(), self.match_count, self.try_count, &self.rules)
    }

    /// True once every card reported ready; the countdown runs from here.
    #[must_use]
    pub fn is_stage_ready(&self) -> bool {
        self.is_ready()
    }

    fn is_ready(&self) -> bool {
        self.ready_count == self.cards.len()
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    #[must_use]
    pub fn outcome(&self) -> Option<RoundOutcome> {
        self.outcome
    }

    #[must_use]
    pub fn is_hurry_up(&self) -> bool {
        self.hurry_up
    }

    fn hurry_up_time(&self) -> f32 {
        self.entry.hurry_up_time(self.rules.hurry_up_ratio)
    }

    /// The currently held first pick.
    #[must_use]
    pub fn pending_selection(&self) -> Option<CardIndex> {
        self.pending
    }

    #[must_use]
    pub fn card_at(&self, index: CardIndex) -> Option<CardView> {
        self.cards.get(index.raw()).map(|card| CardView {
            index,
            symbol: card.symbol(),
            state: card.state(),
        })
    }

    pub fn cards(&self) -> impl Iterator<Item = CardView> + '_ {
        (0..self.cards.len()).filter_map(|i| self.card_at(CardIndex::new(i)))
    }

    /// Result panel data, once the round is over.
    #[must_use]
    pub fn summary(&self) -> Option<RoundSummary> {
        self.outcome.map(|outcome| RoundSummary {
            stage: self.stage,
            outcome,
            time_remaining: self.current_time(),
            try_count: self.try_count,
            match_count: self.match_count,
            score: self.score(),
        })
    }

    /// Take every queued signal, oldest first.
    pub fn drain_signals(&mut self) -> Vec<Signal> {
        self.signals.drain()
    }

    pub(crate) fn push_signal(&mut self, signal: Signal) {
        self.signals.push(signal);
    }
}

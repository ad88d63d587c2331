//! Session orchestration.

use crate::cards::CardIndex;
use crate::core::{ConfigError, GameConfig, GameRng, GameRngState, RoundRules, StageCatalog, SymbolCatalog};
use crate::round::{Round, RoundOutcome, Signal};
use crate::score::{BestScoreLedger, BestScoreStore};

/// A play session: configuration, best-score ledger, RNG and the active
/// round.
///
/// The presentation layer owns a `Game` and feeds it events; there is no
/// global instance.
pub struct Game<S: BestScoreStore> {
    config: GameConfig,
    ledger: BestScoreLedger<S>,
    rng: GameRng,
    round: Round,
}

/// Builder for creating a `Game`.
pub struct GameBuilder {
    stages: StageCatalog,
    symbols: SymbolCatalog,
    rules: RoundRules,
    start_stage: usize,
}

impl Default for GameBuilder {
    fn default() -> Self {
        let config = GameConfig::default();
        Self {
            stages: config.stages,
            symbols: config.symbols,
            rules: config.rules,
            start_stage: 0,
        }
    }
}

impl GameBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stages(mut self, stages: StageCatalog) -> Self {
        self.stages = stages;
        self
    }

    pub fn symbols(mut self, symbols: SymbolCatalog) -> Self {
        self.symbols = symbols;
        self
    }

    pub fn rules(mut self, rules: RoundRules) -> Self {
        self.rules = rules;
        self
    }

    /// Stage to load first. Must be inside the catalog.
    pub fn start_stage(mut self, stage: usize) -> Self {
        self.start_stage = stage;
        self
    }

    /// Validate the configuration and load the starting stage.
    pub fn build<S: BestScoreStore>(self, store: S, seed: u64) -> Result<Game<S>, ConfigError> {
        let config = GameConfig::new(self.stages, self.symbols).with_rules(self.rules);
        Game::with_start_stage(config, store, seed, self.start_stage)
    }
}

impl<S: BestScoreStore> Game<S> {
    /// Start a session at stage 0.
    pub fn new(config: GameConfig, store: S, seed: u64) -> Result<Self, ConfigError> {
        Self::with_start_stage(config, store, seed, 0)
    }

    /// Start a session at `stage`. Fails with `StageOutOfRange` if the
    /// catalog has no such stage.
    pub fn with_start_stage(config: GameConfig, store: S, seed: u64, stage: usize) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut rng = GameRng::new(seed);
        let ledger = BestScoreLedger::new(store);
        let round = Self::deal(&config, &ledger, &mut rng, stage)?;

        Ok(Self {
            config,
            ledger,
            rng,
            round,
        })
    }

    fn deal(config: &GameConfig, ledger: &BestScoreLedger<S>, rng: &mut GameRng, stage: usize) -> Result<Round, ConfigError> {
        let entry = *config.stages.stage(stage)?;
        let mut stage_rng = rng.fork();
        let mut round = Round::new(stage, entry, config.rules, &config.symbols, &mut stage_rng)?;

        round.push_signal(Signal::BestScore(ledger.best_score(stage)));
        log::info!(
            "Loaded stage {} ({} cards, {:.1}s)",
            stage,
            entry.card_count,
            entry.time_budget
        );
        Ok(round)
    }

    // === Stage flow ===

    /// Replace the active round with a fresh deal of `stage`. An unknown
    /// stage leaves the active round untouched.
    pub fn load_stage(&mut self, stage: usize) -> Result<(), ConfigError> {
        self.round = Self::deal(&self.config, &self.ledger, &mut self.rng, stage)?;
        Ok(())
    }

    /// Move to the next stage, staying on the last one when already there.
    pub fn advance_stage(&mut self) -> Result<(), ConfigError> {
        let next = self.config.stages.clamp_stage(self.round.stage().saturating_add(1));
        self.load_stage(next)
    }

    /// Deal the current stage again.
    pub fn restart_stage(&mut self) -> Result<(), ConfigError> {
        self.load_stage(self.round.stage())
    }

    // === Inbound events ===

    pub fn on_card_ready(&mut self) {
        self.round.on_card_ready();
    }

    pub fn on_reveal_complete(&mut self, index: CardIndex) {
        self.round.on_reveal_complete(index);
    }

    pub fn on_card_selected(&mut self, index: CardIndex) -> Option<RoundOutcome> {
        let outcome = self.round.select_card(index);
        self.settle(outcome)
    }

    /// Per-frame clock, `delta` in seconds.
    pub fn tick(&mut self, delta: f32) -> Option<RoundOutcome> {
        let outcome = self.round.tick(delta);
        self.settle(outcome)
    }

    /// Record the finished round in the ledger. Runs once per round because
    /// the round reports its outcome only on the call that ended it.
    fn settle(&mut self, outcome: Option<RoundOutcome>) -> Option<RoundOutcome> {
        if outcome.is_some() {
            let stage = self.round.stage();
            let score = self.round.current_score();
            if self.ledger.record(stage, score) {
                self.round.push_signal(Signal::BestScore(score));
            }
        }
        outcome
    }

    // === Queries ===

    #[must_use]
    pub fn round(&self) -> &Round {
        &self.round
    }

    #[must_use]
    pub fn current_stage(&self) -> usize {
        self.round.stage()
    }

    #[must_use]
    pub fn max_stage(&self) -> usize {
        self.config.stages.max_stage()
    }

    #[must_use]
    pub fn is_final_stage(&self) -> bool {
        self.current_stage() == self.max_stage()
    }

    /// Best score of the current stage, for display.
    #[must_use]
    pub fn best_score(&self) -> i64 {
        self.ledger.best_score(self.round.stage())
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn ledger(&self) -> &BestScoreLedger<S> {
        &self.ledger
    }

    /// RNG checkpoint. Pass it to `restore_rng` to replay the same future
    /// deals.
    #[must_use]
    pub fn rng_state(&self) -> GameRngState {
        self.rng.state()
    }

    /// Rewind the deal source to a checkpoint taken with `rng_state`. The
    /// active round is kept; the next stage load deals from the checkpoint.
    pub fn restore_rng(&mut self, state: &GameRngState) {
        self.rng = GameRng::from_state(state);
        log::debug!("Restored RNG (seed {})", state.seed);
    }

    pub fn drain_signals(&mut self) -> Vec<Signal> {
        self.round.drain_signals()
    }

    /// End the session and hand back the store.
    #[must_use]
    pub fn into_store(self) -> S {
        self.ledger.into_inner()
    }
}

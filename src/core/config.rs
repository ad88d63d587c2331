//! Game configuration types.
//!
//! The orchestrator configures the engine at startup by providing:
//! - `StageCatalog`: per-stage card count and time budget
//! - `SymbolCatalog`: the symbols a deck may draw from
//! - `RoundRules`: penalties, thresholds and score weights
//! - `GameConfig`: combines all configuration
//!
//! Everything is validated once, up front. A `GameConfig` that passed
//! `validate()` can load any of its stages without failing.

use serde::{Deserialize, Serialize};

use crate::cards::DeckError;

/// Static configuration of a single stage.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct StageEntry {
    /// Number of cards dealt. Must be even and non-zero.
    pub card_count: usize,

    /// Countdown budget in seconds.
    pub time_budget: f32,
}

impl StageEntry {
    /// Create a stage entry.
    #[must_use]
    pub const fn new(card_count: usize, time_budget: f32) -> Self {
        Self { card_count, time_budget }
    }

    /// Number of distinct symbols (pairs) in the stage.
    #[must_use]
    pub const fn symbol_count(&self) -> usize {
        self.card_count / 2
    }

    /// Remaining time at or below which the stage is in hurry-up.
    #[must_use]
    pub fn hurry_up_time(&self, ratio: f32) -> f32 {
        self.time_budget * ratio
    }
}

/// Ordered, read-only list of stages indexed `0..=max_stage`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StageCatalog {
    stages: Vec<StageEntry>,
}

impl StageCatalog {
    /// Create an empty catalog. Add stages with `with_stage`.
    #[must_use]
    pub fn new() -> Self {
        Self { stages: Vec::new() }
    }

    /// Append a stage.
    #[must_use]
    pub fn with_stage(mut self, card_count: usize, time_budget: f32) -> Self {
        self.stages.push(StageEntry::new(card_count, time_budget));
        self
    }

    /// Parse a catalog from a JSON array of `{card_count, time_budget}`.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let catalog: Self = serde_json::from_str(json)?;
        Ok(catalog)
    }

    /// Look up a stage.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&StageEntry> {
        self.stages.get(index)
    }

    /// Look up a stage, failing with `StageOutOfRange`.
    pub fn stage(&self, index: usize) -> Result<&StageEntry, ConfigError> {
        self.stages.get(index).ok_or(ConfigError::StageOutOfRange {
            index,
            max_stage: self.max_stage(),
        })
    }

    /// Highest valid stage index (0 for an empty catalog).
    #[must_use]
    pub fn max_stage(&self) -> usize {
        self.stages.len().saturating_sub(1)
    }

    /// Clamp a requested stage index into `[0, max_stage]`.
    #[must_use]
    pub fn clamp_stage(&self, index: usize) -> usize {
        index.min(self.max_stage())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &StageEntry> {
        self.stages.iter()
    }
}

impl Default for StageCatalog {
    fn default() -> Self {
        Self::new()
            .with_stage(8, 60.0)
            .with_stage(12, 60.0)
            .with_stage(16, 75.0)
    }
}

/// The symbols available to a deck. Its length bounds how many pairs a
/// stage may ask for.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SymbolCatalog {
    labels: Vec<String>,
}

impl SymbolCatalog {
    /// Sentinel for "no symbol assigned".
    pub const INVALID_SYMBOL: usize = usize::MAX;

    /// Catalog with the given labels.
    pub fn new(labels: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            labels: labels.into_iter().map(Into::into).collect(),
        }
    }

    /// Catalog of `count` symbols labelled `symbol-0`, `symbol-1`, ...
    #[must_use]
    pub fn numbered(count: usize) -> Self {
        Self::new((0..count).map(|i| format!("symbol-{i}")))
    }

    /// Is `symbol` a real index into this catalog?
    #[must_use]
    pub fn is_available(&self, symbol: usize) -> bool {
        symbol != Self::INVALID_SYMBOL && symbol < self.labels.len()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

impl Default for SymbolCatalog {
    fn default() -> Self {
        Self::numbered(16)
    }
}

/// Tunable constants of turn resolution and scoring.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoundRules {
    /// Seconds removed from the clock on a mismatch.
    pub mismatch_penalty: f32,

    /// Fraction of the time budget at which hurry-up starts.
    pub hurry_up_ratio: f32,

    /// Size of the rotating pool of match messages.
    pub success_message_slots: usize,

    /// Points per whole second left on the clock.
    pub time_points: i64,

    /// Points per matched pair.
    pub match_points: i64,

    /// Points per try in the try-count term of the score.
    pub try_penalty: i64,
}

impl Default for RoundRules {
    fn default() -> Self {
        Self {
            mismatch_penalty: 3.0,
            hurry_up_ratio: 0.5,
            success_message_slots: 3,
            time_points: 100,
            match_points: 200,
            try_penalty: 50,
        }
    }
}

/// Complete game configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub stages: StageCatalog,
    pub symbols: SymbolCatalog,
    #[serde(default)]
    pub rules: RoundRules,
}

impl GameConfig {
    /// Create a configuration with default rules.
    #[must_use]
    pub fn new(stages: StageCatalog, symbols: SymbolCatalog) -> Self {
        Self {
            stages,
            symbols,
            rules: RoundRules::default(),
        }
    }

    /// Override the round rules.
    #[must_use]
    pub fn with_rules(mut self, rules: RoundRules) -> Self {
        self.rules = rules;
        self
    }

    /// Check every stage against the symbol catalog and the rules.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.stages.is_empty() {
            return Err(ConfigError::EmptyCatalog);
        }
        if self.rules.success_message_slots == 0 {
            return Err(ConfigError::NoMessageSlots);
        }
        for (index, entry) in self.stages.iter().enumerate() {
            if entry.card_count == 0 || entry.card_count % 2 != 0 {
                return Err(ConfigError::InvalidCardCount {
                    stage: index,
                    card_count: entry.card_count,
                });
            }
            if !(entry.time_budget.is_finite() && entry.time_budget > 0.0) {
                return Err(ConfigError::InvalidTimeBudget {
                    stage: index,
                    time_budget: entry.time_budget,
                });
            }
            if entry.symbol_count() > self.symbols.len() {
                return Err(ConfigError::SymbolCatalogTooSmall {
                    stage: index,
                    required: entry.symbol_count(),
                    available: self.symbols.len(),
                });
            }
        }
        Ok(())
    }
}

/// Configuration errors. Fatal at load time, never raised mid-round.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("stage catalog is empty")]
    EmptyCatalog,

    #[error("stage {stage}: card count {card_count} must be even and non-zero")]
    InvalidCardCount { stage: usize, card_count: usize },

    #[error("stage {stage}: time budget {time_budget} must be positive")]
    InvalidTimeBudget { stage: usize, time_budget: f32 },

    #[error("stage {stage} needs {required} symbols but the catalog has {available}")]
    SymbolCatalogTooSmall {
        stage: usize,
        required: usize,
        available: usize,
    },

    #[error("stage {index} is outside [0, {max_stage}]")]
    StageOutOfRange { index: usize, max_stage: usize },

    #[error("round rules need at least one match message slot")]
    NoMessageSlots,

    #[error("catalog parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Deck(#[from] DeckError),
}

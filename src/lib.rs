//! # pairs-engine
//!
//! Round state machine and scoring engine for a timed memory-matching
//! ("pairs") card game.
//!
//! A stage deals a grid of face-down cards where every symbol appears
//! exactly twice. The player reveals two cards per turn: matches retire,
//! mismatches flip back and cost time. The round is won when every pair is
//! matched and lost when the countdown reaches zero.
//!
//! ## Design Principles
//!
//! 1. **Presentation-Agnostic**: Rendering, audio, text and animation live
//!    outside. They feed discrete events in and drain `Signal`s out.
//!
//! 2. **Explicit Ownership**: The orchestrator owns a `Game`; nothing is a
//!    global. Time advances only through `tick(delta)`.
//!
//! 3. **Configuration Over Convention**: Stages, symbols and rule constants
//!    come from `GameConfig`, validated once at startup.
//!
//! ## Modules
//!
//! - `core`: RNG and configuration
//! - `cards`: Card state machine and deck generation
//! - `round`: Turn resolution, countdown, signals
//! - `score`: Score formula and best-score ledger
//! - `session`: Stage loading and progression

pub mod core;
pub mod cards;
pub mod round;
pub mod score;
pub mod session;

// Re-export commonly used types
pub use crate::core::{
    ConfigError, GameConfig, GameRng, GameRngState,
    RoundRules, StageCatalog, StageEntry, SymbolCatalog,
};

pub use crate::cards::{check_deck, generate_deck, Card, CardIndex, CardState, DeckError};

pub use crate::round::{CardView, Round, RoundOutcome, RoundSummary, Signal, SignalQueue};

pub use crate::score::{
    best_score_key, compute_score,
    BestScoreLedger, BestScoreStore, JsonFileStore, LedgerError, MemoryStore,
};

pub use crate::session::{Game, GameBuilder};

//! Core engine types: RNG and configuration.
//!
//! Everything here is independent of a particular round. The session
//! configures rounds from these values rather than rounds reading globals.

pub mod rng;
pub mod config;

pub use rng::{GameRng, GameRngState};
pub use config::{ConfigError, GameConfig, RoundRules, StageCatalog, StageEntry, SymbolCatalog};

//! Play session.
//!
//! `Game` is the orchestrator the presentation layer talks to:
//! - Loads stages from the catalog, dealing a fresh deck per load
//! - Forwards card and clock events to the active `Round`
//! - Records finished rounds in the best-score ledger
//! - Advances (clamped to the last stage) or restarts stages

mod game;

pub use game::{Game, GameBuilder};

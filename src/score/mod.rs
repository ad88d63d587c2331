//! Scoring and the best-score ledger.
//!
//! - `compute_score`: score of a round from its time, matches and tries
//! - `BestScoreStore`: persistence backend (`MemoryStore`, `JsonFileStore`)
//! - `BestScoreLedger`: per-stage best score, updated on strict improvement

pub mod formula;
pub mod ledger;

pub use formula::{compute_score, max_rank_try_count};
pub use ledger::{best_score_key, BestScoreLedger, BestScoreStore, JsonFileStore, LedgerError, MemoryStore};

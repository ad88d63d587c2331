//! Round state machine.
//!
//! A `Round` owns the cards of the active stage, the held first pick, the
//! countdown and the try/match counters. It is driven by discrete inbound
//! events (`on_card_ready`, `select_card`, `on_reveal_complete`) and a
//! per-frame `tick`, and reports back through a queue of `Signal`s.
//!
//! ## Example
//!
//! ```
//! use pairs_engine::cards::CardIndex;
//! use pairs_engine::core::{RoundRules, StageEntry, SymbolCatalog};
//! use pairs_engine::round::{Round, RoundOutcome};
//!
//! let symbols = SymbolCatalog::numbered(1);
//! let mut round = Round::from_deck(0, StageEntry::new(2, 30.0), RoundRules::default(), &symbols, vec![0, 0])
//!     .unwrap();
//! round.on_card_ready();
//! round.on_card_ready();
//! round.on_reveal_complete(CardIndex::new(0));
//! round.on_reveal_complete(CardIndex::new(1));
//!
//! round.select_card(CardIndex::new(0));
//! assert_eq!(round.select_card(CardIndex::new(1)), Some(RoundOutcome::Win));
//! ```

mod machine;
mod signal;

pub use machine::{CardView, Round, RoundOutcome, RoundSummary};
pub use signal::{Signal, SignalQueue};

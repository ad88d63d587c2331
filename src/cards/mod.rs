//! Card system: the per-card state machine and deck generation.
//!
//! ## Key Types
//!
//! - `CardIndex`: Position of a card in the stage's deck
//! - `CardState`: Closed / Opening / Open / Matched
//! - `Card`: Symbol identity plus reveal state machine
//! - `generate_deck`: Shuffled pairs of symbol indices
//! - `check_deck`: Validation of a fixed layout

pub mod card;
pub mod deck;

pub use card::{Card, CardIndex, CardState};
pub use deck::{check_deck, generate_deck, DeckError};

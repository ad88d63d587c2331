//! Deck generation: a shuffled multiset of paired symbol indices.

use crate::core::{GameRng, SymbolCatalog};

/// Build a deck of `2 * symbol_count` symbol indices in which every value in
/// `[0, symbol_count)` appears exactly twice, uniformly shuffled.
///
/// `max_symbols` is the size of the symbol catalog the deck draws from.
///
/// ```
/// use pairs_engine::cards::generate_deck;
/// use pairs_engine::core::GameRng;
///
/// let mut rng = GameRng::new(3);
/// let mut deck = generate_deck(4, 16, &mut rng).unwrap();
/// deck.sort();
/// assert_eq!(deck, vec![0, 0, 1, 1, 2, 2, 3, 3]);
/// ```
pub fn generate_deck(symbol_count: usize, max_symbols: usize, rng: &mut GameRng) -> Result<Vec<usize>, DeckError> {
    if symbol_count == 0 {
        return Err(DeckError::NoSymbols);
    }
    if symbol_count > max_symbols {
        return Err(DeckError::TooManySymbols {
            requested: symbol_count,
            available: max_symbols,
        });
    }

    let mut deck: Vec<usize> = (0..symbol_count).flat_map(|symbol| [symbol, symbol]).collect();
    rng.shuffle(&mut deck);
    Ok(deck)
}

/// Check a fixed layout: non-empty, every symbol known to `symbols` and
/// present exactly twice.
pub fn check_deck(deck: &[usize], symbols: &SymbolCatalog) -> Result<(), DeckError> {
    if deck.is_empty() {
        return Err(DeckError::NoSymbols);
    }

    let mut counts = vec![0usize; symbols.len()];
    for &symbol in deck {
        if !symbols.is_available(symbol) {
            return Err(DeckError::UnknownSymbol { symbol });
        }
        counts[symbol] += 1;
    }
    match counts.iter().position(|&count| count != 0 && count != 2) {
        Some(symbol) => Err(DeckError::UnpairedSymbol {
            symbol,
            count: counts[symbol],
        }),
        None => Ok(()),
    }
}

/// Deck generation errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeckError {
    #[error("a deck needs at least one symbol")]
    NoSymbols,

    #[error("requested {requested} symbols but only {available} are available")]
    TooManySymbols { requested: usize, available: usize },

    #[error("symbol {symbol} is not in the symbol catalog")]
    UnknownSymbol { symbol: usize },

    #[error("symbol {symbol} appears {count} times, expected a pair")]
    UnpairedSymbol { symbol: usize, count: usize },
}

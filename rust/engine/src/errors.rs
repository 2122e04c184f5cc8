use std::path::PathBuf;

use thiserror::Error;

use crate::cards::{Card, Suit, MAX_RANKS, MIN_RANKS};

#[derive(Debug, Error, PartialEq, Eq, Clone, Copy)]
#[error("The number of ranks must be between {} and {}, got {got}", MIN_RANKS, MAX_RANKS)]
pub struct RanksError {
    pub got: i64,
}

/// The cell pool ran dry. Piles never hold more cards than the deck, so this
/// only happens when card accounting is broken somewhere else.
#[derive(Debug, Error, PartialEq, Eq, Clone, Copy)]
pub enum PoolError {
    #[error("Cannot get space: all {capacity} card cells are in use")]
    Exhausted { capacity: usize },
}

#[derive(Debug, Error)]
pub enum DealError {
    #[error("Cannot initialize random number generator using the timer: {0}")]
    ClockUnavailable(String),
    #[error(transparent)]
    Pool(#[from] PoolError),
}

/// Why a move was refused. The board is left untouched whenever one of these is returned.
#[derive(Debug, Error, PartialEq, Eq, Clone, Copy)]
pub enum MoveError {
    #[error("There is no stack {}.", .stack + 1)]
    NoSuchStack { stack: usize },
    #[error("There is no card in stack {}.", .stack + 1)]
    EmptyStack { stack: usize },
    #[error("The {card} cannot be moved to the foundation.")]
    NotFoundationSuccessor { card: Card, foundation: Card },
    #[error("The {card} cannot be moved from stack {} to stack {}.", .from + 1, .to + 1)]
    RankMismatch {
        card: Card,
        from: usize,
        to: usize,
        target: Card,
    },
    #[error("The {card} is already on stack {}.", .stack + 1)]
    SameStack { card: Card, stack: usize },
}

/// A proposed arrangement of cards is not a valid board.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum LayoutError {
    #[error("card value {value} is not part of a {ranks}-rank deck")]
    CardOutOfRange { value: i32, ranks: u8 },
    #[error("card {0} appears more than once")]
    DuplicateCard(Card),
    #[error("card {0} is missing")]
    MissingCard(Card),
    #[error("foundation for {suit:?} holds {card}")]
    FoundationSuit { suit: Suit, card: Card },
    #[error("foundation for {suit:?} is past the highest rank in play")]
    FoundationOutOfRange { suit: Suit },
    #[error("card count {0} is not a whole number of suits")]
    CardCount(i32),
    #[error("stack {} has {len} cards, more than the {max} in play", .stack + 1)]
    StackTooLong { stack: usize, len: i64, max: usize },
    #[error(transparent)]
    Ranks(#[from] RanksError),
    #[error(transparent)]
    Pool(#[from] PoolError),
}

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("Cannot open {}", .path.display())]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Bad save file format: {0}")]
    Corrupt(String),
    #[error("Write failed: {0}")]
    WriteFailed(#[source] std::io::Error),
}

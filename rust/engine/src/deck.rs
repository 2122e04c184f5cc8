use std::time::{SystemTime, UNIX_EPOCH};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

use crate::board::Board;
use crate::cards::{full_deck, Card, Ranks, STACKS};
use crate::errors::DealError;

/// Shuffles decks and lays them out on a board.
///
/// The generator is seeded once; successive deals draw from the same stream,
/// so a dealer built with [`Dealer::new_with_seed`] replays the same sequence
/// of games.
#[derive(Debug)]
pub struct Dealer {
    seed: u64,
    rng: ChaCha20Rng,
}

impl Dealer {
    pub fn new_with_seed(seed: u64) -> Self {
        Self {
            seed,
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }

    /// Seeds from the wall clock. Without a readable clock no shuffle is possible.
    pub fn from_clock() -> Result<Self, DealError> {
        clock_seed().map(Self::new_with_seed)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// A freshly shuffled deck for `ranks`.
    ///
    /// Scans from the last index down to 1, swapping each element with a
    /// uniformly chosen element at or below it.
    pub fn shuffle(&mut self, ranks: Ranks) -> Vec<Card> {
        let mut deck = full_deck(ranks);
        for i in (1..deck.len()).rev() {
            let j = self.rng.random_range(0..=i);
            deck.swap(i, j);
        }
        deck
    }

    /// Clears `board` and deals a new shuffle round-robin across the stacks:
    /// card `i` goes to stack `i % 8`, so later cards end up on top.
    pub fn deal(&mut self, board: &mut Board, ranks: Ranks) -> Result<(), DealError> {
        board.reset(ranks);
        let deck = self.shuffle(ranks);
        for (i, card) in deck.into_iter().enumerate() {
            board.push_card(i % STACKS, card)?;
        }
        tracing::debug!(ranks = ranks.count(), seed = self.seed, "dealt new board");
        Ok(())
    }
}

/// Seed taken from the current time at nanosecond resolution.
pub fn clock_seed() -> Result<u64, DealError> {
    let since_epoch = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| DealError::ClockUnavailable(e.to_string()))?;
    Ok(since_epoch.as_nanos() as u64)
}

use std::path::Path;

use crate::board::Board;
use crate::cards::{Card, Ranks};
use crate::deck::Dealer;
use crate::errors::{DealError, MoveError, SaveError};
use crate::moves::Move;
use crate::persistence;

/// One game in progress: the board, the dealer that shuffles for it, and a
/// count of successful moves.
///
/// # Examples
///
/// ```
/// use saa_engine::cards::Ranks;
/// use saa_engine::deck::Dealer;
/// use saa_engine::game::Game;
///
/// let mut game = Game::new(Dealer::new_with_seed(7));
/// game.deal(Ranks::new(5).unwrap()).unwrap();
/// assert_eq!(game.board().cards_on_stacks(), 20);
/// assert_eq!(game.moves(), 0);
/// ```
#[derive(Debug)]
pub struct Game {
    board: Board,
    dealer: Dealer,
    moves: u32,
}

impl Game {
    pub fn new(dealer: Dealer) -> Self {
        Self {
            board: Board::new(Ranks::default()),
            dealer,
            moves: 0,
        }
    }

    /// Starts from an existing board instead of a deal.
    pub fn with_board(board: Board, dealer: Dealer) -> Self {
        Self {
            board,
            dealer,
            moves: 0,
        }
    }

    pub fn deal(&mut self, ranks: Ranks) -> Result<(), DealError> {
        self.moves = 0;
        self.dealer.deal(&mut self.board, ranks)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn ranks(&self) -> Ranks {
        self.board.ranks()
    }

    pub fn seed(&self) -> u64 {
        self.dealer.seed()
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn is_done(&self) -> bool {
        self.board.is_done()
    }

    pub fn move_to_foundation(&mut self, from: usize) -> Result<Card, MoveError> {
        self.apply(Move::ToFoundation { from })
    }

    pub fn move_to_stack(&mut self, from: usize, to: usize) -> Result<Card, MoveError> {
        self.apply(Move::ToStack { from, to })
    }

    pub fn apply(&mut self, mv: Move) -> Result<Card, MoveError> {
        let card = self.board.apply(mv)?;
        self.moves += 1;
        Ok(card)
    }

    pub fn save(&self, path: &Path) -> Result<(), SaveError> {
        persistence::save(&self.board, path)
    }

    /// Replaces the board with the one saved at `path`. On any error the
    /// current board is kept as it was.
    pub fn restore(&mut self, path: &Path) -> Result<(), SaveError> {
        self.board = persistence::restore(path)?;
        self.moves = 0;
        Ok(())
    }
}

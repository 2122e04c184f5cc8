//! The two legal move kinds and their execution.
//!
//! Both return the moved card on success and a [`MoveError`] naming the
//! violated condition otherwise. A refused move never touches the board.

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::cards::{Card, STACKS};
use crate::errors::MoveError;
use crate::rules::{can_move_to_foundation, can_move_to_stack};

/// Stack indices are zero based; they are shown to players as 1..=8.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Move {
    ToFoundation { from: usize },
    ToStack { from: usize, to: usize },
}

impl Board {
    fn source_card(&self, from: usize) -> Result<Card, MoveError> {
        if from >= STACKS {
            return Err(MoveError::NoSuchStack { stack: from });
        }
        self.top_card(from)
            .ok_or(MoveError::EmptyStack { stack: from })
    }

    /// Moves the top card of `from` onto its suit's foundation.
    pub fn move_to_foundation(&mut self, from: usize) -> Result<Card, MoveError> {
        let card = self.source_card(from)?;
        let foundation = self.foundation(card.suit());
        if !can_move_to_foundation(card, foundation) {
            tracing::debug!(%card, %foundation, "foundation move refused");
            return Err(MoveError::NotFoundationSuccessor { card, foundation });
        }
        self.pop_card(from);
        self.set_foundation(card.suit(), card);
        tracing::debug!(%card, from, "moved to foundation");
        Ok(card)
    }

    /// Moves the top card of `from` onto stack `to`.
    pub fn move_to_stack(&mut self, from: usize, to: usize) -> Result<Card, MoveError> {
        let card = self.source_card(from)?;
        if to >= STACKS {
            return Err(MoveError::NoSuchStack { stack: to });
        }
        if from == to {
            return Err(MoveError::SameStack { card, stack: from });
        }
        match self.top_card(to) {
            Some(target) if !can_move_to_stack(card, Some(target)) => {
                tracing::debug!(%card, %target, from, to, "stack move refused");
                return Err(MoveError::RankMismatch {
                    card,
                    from,
                    to,
                    target,
                });
            }
            _ => {}
        }
        self.transfer_top(from, to);
        tracing::debug!(%card, from, to, "moved to stack");
        Ok(card)
    }

    pub fn apply(&mut self, mv: Move) -> Result<Card, MoveError> {
        match mv {
            Move::ToFoundation { from } => self.move_to_foundation(from),
            Move::ToStack { from, to } => self.move_to_stack(from, to),
        }
    }

    /// Every move currently allowed, foundation moves first.
    pub fn legal_moves(&self) -> Vec<Move> {
        let mut moves = Vec::new();
        for from in 0..STACKS {
            let Some(card) = self.top_card(from) else {
                continue;
            };
            if can_move_to_foundation(card, self.foundation(card.suit())) {
                moves.push(Move::ToFoundation { from });
            }
        }
        for from in 0..STACKS {
            let Some(card) = self.top_card(from) else {
                continue;
            };
            for to in (0..STACKS).filter(|to| *to != from) {
                if can_move_to_stack(card, self.top_card(to)) {
                    moves.push(Move::ToStack { from, to });
                }
            }
        }
        moves
    }
}

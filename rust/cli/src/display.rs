//! The display collaborator the interpreter and session talk to.
//!
//! Implementations decide where things appear on screen. Callers only say
//! what to show: cards, stacks, foundations, a status line and a prompt line.

use std::io;

use saa_engine::board::Board;
use saa_engine::cards::{Card, STACKS, Suit, all_suits};

use crate::keymap;

pub trait GameDisplay {
    fn render_card(&mut self, card: Card) -> io::Result<()>;

    /// Shows stack `index` (0-based) with `cards` ordered bottom to top.
    fn render_stack(&mut self, index: usize, cards: &[Card]) -> io::Result<()>;

    fn render_foundation(&mut self, suit: Suit, card: Card) -> io::Result<()>;

    fn clear_status_line(&mut self) -> io::Result<()>;

    fn clear_prompt_line(&mut self) -> io::Result<()>;

    fn write_status(&mut self, text: &str) -> io::Result<()>;

    fn write_prompt(&mut self, text: &str) -> io::Result<()>;

    /// Next key exactly as typed. `None` at end of input.
    fn read_raw_key(&mut self) -> io::Result<Option<char>>;

    /// Next key with command aliases applied.
    fn read_key(&mut self) -> io::Result<Option<char>> {
        Ok(self.read_raw_key()?.map(keymap::translate))
    }

    fn show_help(&mut self) -> io::Result<()>;

    fn show_board(&mut self, board: &Board) -> io::Result<()> {
        for suit in all_suits() {
            self.render_foundation(suit, board.foundation(suit))?;
        }
        for i in 0..STACKS {
            self.render_stack(i, &board.stack_cards(i))?;
        }
        Ok(())
    }
}

/// Replaces the status line with `text`.
pub fn status(display: &mut dyn GameDisplay, text: &str) -> io::Result<()> {
    display.clear_status_line()?;
    display.write_status(text)
}

/// Replaces the prompt line with `text`.
pub fn prompt(display: &mut dyn GameDisplay, text: &str) -> io::Result<()> {
    display.clear_prompt_line()?;
    display.write_prompt(text)
}

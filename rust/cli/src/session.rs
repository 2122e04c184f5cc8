//! Deal, play, and ask what next, until the player leaves.

use std::path::PathBuf;

use saa_engine::cards::Ranks;
use saa_engine::game::Game;
use saa_engine::logger::{GameLogger, GameRecord, Outcome};

use crate::display::{GameDisplay, prompt, status};
use crate::error::CliError;
use crate::interpreter::{GameEnd, Interpreter};

pub const PLAY_AGAIN: &str = "Press space to play again, x to exit, or r to change game size. ";
pub const CHOOSE_RANKS: &str = "Press one of 5,..., 9, t, j, q, k to select the largest rank. ";

/// Largest rank selected by a key at the change-size prompt.
pub fn ranks_for_key(key: char) -> Option<Ranks> {
    let count = match key {
        '5'..='9' => key as u8 - b'0',
        't' => 10,
        'j' => 11,
        'q' => 12,
        'k' => 13,
        _ => return None,
    };
    Ranks::new(count).ok()
}

pub struct Session {
    game: Game,
    ranks: Ranks,
    interpreter: Interpreter,
    history: Option<GameLogger>,
}

impl Session {
    pub fn new(game: Game, ranks: Ranks, save_path: impl Into<PathBuf>) -> Self {
        Self {
            game,
            ranks,
            interpreter: Interpreter::new(save_path),
            history: None,
        }
    }

    pub fn with_history(mut self, logger: GameLogger) -> Self {
        self.history = Some(logger);
        self
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Size of the next deal.
    pub fn ranks(&self) -> Ranks {
        self.ranks
    }

    pub fn run(&mut self, display: &mut dyn GameDisplay) -> Result<(), CliError> {
        loop {
            self.game.deal(self.ranks)?;
            let end = self.interpreter.play(&mut self.game, display)?;
            // a restored game may have changed the size
            self.ranks = self.game.ranks();
            self.record(end);
            match end {
                GameEnd::Redeal => continue,
                GameEnd::Won => status(display, "You won!")?,
                GameEnd::Quit => status(display, "You lose.")?,
            }
            if !self.play_again(display)? {
                return Ok(());
            }
        }
    }

    /// `true` to deal again, `false` to exit.
    fn play_again(&mut self, display: &mut dyn GameDisplay) -> Result<bool, CliError> {
        prompt(display, PLAY_AGAIN)?;
        loop {
            match display.read_raw_key()? {
                None | Some('x') => return Ok(false),
                Some(' ') => return Ok(true),
                Some('r') => return self.change_ranks(display),
                Some(_) => {}
            }
        }
    }

    fn change_ranks(&mut self, display: &mut dyn GameDisplay) -> Result<bool, CliError> {
        loop {
            status(display, "Changing the number of ranks used in a game.")?;
            prompt(display, CHOOSE_RANKS)?;
            let Some(key) = display.read_raw_key()? else {
                return Ok(false);
            };
            if let Some(ranks) = ranks_for_key(key) {
                tracing::debug!(ranks = ranks.count(), "game size changed");
                self.ranks = ranks;
                return Ok(true);
            }
            status(display, "Bad input.")?;
            prompt(
                display,
                "Type space to try again, x to exit program, others play game. ",
            )?;
            match display.read_raw_key()? {
                Some(' ') => continue,
                None | Some('x') => return Ok(false),
                Some(_) => return Ok(true),
            }
        }
    }

    fn record(&mut self, end: GameEnd) {
        let Some(logger) = self.history.as_mut() else {
            return;
        };
        let board = self.game.board();
        let record = GameRecord {
            game_id: logger.next_id(),
            ranks: board.ranks().count(),
            seed: Some(self.game.seed()),
            moves: self.game.moves(),
            outcome: match end {
                GameEnd::Won => Outcome::Won,
                GameEnd::Quit => Outcome::Lost,
                GameEnd::Redeal => Outcome::Abandoned,
            },
            cards_on_foundations: board.cards_on_foundations(),
            ts: None,
        };
        if let Err(e) = logger.write(&record) {
            tracing::warn!(error = %e, "cannot write game history");
        }
    }
}

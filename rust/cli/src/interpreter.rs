//! Two-phase command interpreter.
//!
//! A move takes two keys: the source stack, then the destination (`0` for the
//! foundation, `1`-`8` for a stack). `q`, `r`, `s` and `?` work in either
//! phase, and every key typed while a destination is awaited returns the
//! interpreter to waiting for a source.

use std::path::{Path, PathBuf};

use saa_engine::errors::MoveError;
use saa_engine::game::Game;

use crate::display::{GameDisplay, prompt, status};
use crate::error::CliError;

pub const FRESH_DISPLAY: &str = "Fresh display.  Type ? for help.";
pub const BAD_INPUT: &str = "Bad input.  Type ? for help.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Foundation,
    /// A stack, 0-based
    Stack(usize),
    Quit,
    Restore,
    Save,
    Help,
    Invalid(char),
}

impl Command {
    /// Parses an alias-translated key.
    pub fn parse(key: char) -> Command {
        match key {
            '0' => Command::Foundation,
            '1'..='8' => Command::Stack(key as usize - '1' as usize),
            'q' => Command::Quit,
            'r' => Command::Restore,
            's' => Command::Save,
            '?' => Command::Help,
            other => Command::Invalid(other),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    AwaitingSource,
    AwaitingDestination { from: usize },
}

/// How a game stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEnd {
    Won,
    /// `q` or end of input
    Quit,
    /// The player asked for a fresh deal after a failed restore
    Redeal,
}

#[derive(Debug)]
pub struct Interpreter {
    phase: Phase,
    save_path: PathBuf,
}

impl Interpreter {
    pub fn new(save_path: impl Into<PathBuf>) -> Self {
        Self {
            phase: Phase::AwaitingSource,
            save_path: save_path.into(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn save_path(&self) -> &Path {
        &self.save_path
    }

    /// Shows the board and runs commands until the game is won or abandoned.
    pub fn play(
        &mut self,
        game: &mut Game,
        display: &mut dyn GameDisplay,
    ) -> Result<GameEnd, CliError> {
        self.phase = Phase::AwaitingSource;
        show_game(game, display)?;
        loop {
            if game.is_done() {
                return Ok(GameEnd::Won);
            }
            self.prompt(game, display)?;
            let key = display.read_key()?;
            if let Some(end) = self.handle_key(key, game, display)? {
                return Ok(end);
            }
        }
    }

    fn prompt(&self, game: &Game, display: &mut dyn GameDisplay) -> Result<(), CliError> {
        let text = match self.phase {
            Phase::AwaitingSource => "Move from stack ".to_string(),
            Phase::AwaitingDestination { from } => match game.board().top_card(from) {
                Some(card) => format!("Move {} from stack {} to ", card, from + 1),
                None => format!("Move from stack {} to ", from + 1),
            },
        };
        prompt(display, &text)?;
        Ok(())
    }

    /// Runs one command. `None` (end of input) quits.
    pub fn handle_key(
        &mut self,
        key: Option<char>,
        game: &mut Game,
        display: &mut dyn GameDisplay,
    ) -> Result<Option<GameEnd>, CliError> {
        let Some(key) = key else {
            return Ok(Some(GameEnd::Quit));
        };
        let phase = std::mem::replace(&mut self.phase, Phase::AwaitingSource);
        match (Command::parse(key), phase) {
            (Command::Quit, _) => return Ok(Some(GameEnd::Quit)),
            (Command::Restore, _) => return self.restore(game, display),
            (Command::Save, _) => self.save(game, display)?,
            (Command::Help, _) => {
                display.show_help()?;
                show_game(game, display)?;
            }
            (Command::Stack(from), Phase::AwaitingSource) => {
                if game.board().is_empty(from) {
                    let e = MoveError::EmptyStack { stack: from };
                    status(display, &e.to_string())?;
                } else {
                    self.phase = Phase::AwaitingDestination { from };
                }
            }
            (Command::Foundation, Phase::AwaitingDestination { from }) => {
                let text = match game.move_to_foundation(from) {
                    Ok(card) => format!("The {} was moved to the foundation.", card),
                    Err(e) => e.to_string(),
                };
                self.after_move(game, display, &text)?;
            }
            (Command::Stack(to), Phase::AwaitingDestination { from }) => {
                let text = match game.move_to_stack(from, to) {
                    Ok(card) => {
                        format!("Moved the {} from stack {} to stack {}.", card, from + 1, to + 1)
                    }
                    Err(e) => e.to_string(),
                };
                self.after_move(game, display, &text)?;
            }
            (Command::Foundation, Phase::AwaitingSource) | (Command::Invalid(_), _) => {
                status(display, BAD_INPUT)?;
            }
        }
        Ok(None)
    }

    fn after_move(
        &self,
        game: &Game,
        display: &mut dyn GameDisplay,
        text: &str,
    ) -> Result<(), CliError> {
        display.show_board(game.board())?;
        status(display, text)?;
        Ok(())
    }

    /// Waits for a raw space; anything else declines.
    fn confirm(&self, display: &mut dyn GameDisplay, text: &str) -> Result<bool, CliError> {
        display.clear_status_line()?;
        prompt(display, text)?;
        Ok(display.read_raw_key()? == Some(' '))
    }

    fn save(&self, game: &Game, display: &mut dyn GameDisplay) -> Result<(), CliError> {
        let question = format!(
            "Type space to save game in file {}. ",
            self.save_path.display()
        );
        if !self.confirm(display, &question)? {
            status(display, "The saving of the game was aborted.")?;
            return Ok(());
        }
        match game.save(&self.save_path) {
            Ok(()) => status(display, "Game saved.")?,
            Err(e) => status(display, &format!("Save error: {}.  Game not saved.", e))?,
        }
        Ok(())
    }

    fn restore(
        &self,
        game: &mut Game,
        display: &mut dyn GameDisplay,
    ) -> Result<Option<GameEnd>, CliError> {
        let question = format!(
            "Type space to restore game in file {}. ",
            self.save_path.display()
        );
        if !self.confirm(display, &question)? {
            status(display, "The restoration of the old game was aborted.")?;
            return Ok(None);
        }
        match game.restore(&self.save_path) {
            Ok(()) => {
                show_game(game, display)?;
                Ok(None)
            }
            Err(e) => {
                status(display, &format!("Restore error: {}.  Game not restored.", e))?;
                prompt(
                    display,
                    "Type space for a new game, any other key to continue this one. ",
                )?;
                match display.read_raw_key()? {
                    Some(' ') => Ok(Some(GameEnd::Redeal)),
                    Some(_) => {
                        status(display, FRESH_DISPLAY)?;
                        Ok(None)
                    }
                    None => Ok(Some(GameEnd::Quit)),
                }
            }
        }
    }
}

/// Redraws the whole board with a fresh status line.
pub fn show_game(game: &Game, display: &mut dyn GameDisplay) -> Result<(), CliError> {
    display.show_board(game.board())?;
    status(display, FRESH_DISPLAY)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::GameDisplay;
    use saa_engine::board::Board;
    use saa_engine::cards::{Card, Ranks, STACKS, Suit, all_suits};
    use saa_engine::deck::Dealer;
    use std::collections::VecDeque;
    use std::io;

    /// Records statuses and plays back scripted keys.
    #[derive(Default)]
    struct Script {
        keys: VecDeque<char>,
        statuses: Vec<String>,
        prompts: Vec<String>,
        boards: usize,
    }

    impl Script {
        fn new(keys: &str) -> Self {
            Self {
                keys: keys.chars().collect(),
                ..Self::default()
            }
        }

        fn last_status(&self) -> &str {
            self.statuses.last().map(String::as_str).unwrap_or("")
        }
    }

    impl GameDisplay for Script {
        fn render_card(&mut self, _card: Card) -> io::Result<()> {
            Ok(())
        }
        fn render_stack(&mut self, _index: usize, _cards: &[Card]) -> io::Result<()> {
            Ok(())
        }
        fn render_foundation(&mut self, _suit: Suit, _card: Card) -> io::Result<()> {
            Ok(())
        }
        fn clear_status_line(&mut self) -> io::Result<()> {
            Ok(())
        }
        fn clear_prompt_line(&mut self) -> io::Result<()> {
            Ok(())
        }
        fn write_status(&mut self, text: &str) -> io::Result<()> {
            self.statuses.push(text.to_string());
            Ok(())
        }
        fn write_prompt(&mut self, text: &str) -> io::Result<()> {
            self.prompts.push(text.to_string());
            Ok(())
        }
        fn read_raw_key(&mut self) -> io::Result<Option<char>> {
            Ok(self.keys.pop_front())
        }
        fn show_help(&mut self) -> io::Result<()> {
            Ok(())
        }
        fn show_board(&mut self, _board: &Board) -> io::Result<()> {
            self.boards += 1;
            Ok(())
        }
    }

    fn card(rank: u8, suit: Suit) -> Card {
        Card::new(rank, suit).unwrap()
    }

    /// Five ranks; stack 1 ends CA, stack 2 ends C3, stack 3 ends D2,
    /// stack 8 is empty, the rest spread over stacks 4-7.
    fn game() -> Game {
        let ranks = Ranks::new(5).unwrap();
        let pinned = [card(1, Suit::Clubs), card(3, Suit::Clubs), card(2, Suit::Diamonds)];
        let mut stacks: [Vec<Card>; STACKS] = Default::default();
        let rest = saa_engine::cards::full_deck(ranks)
            .into_iter()
            .filter(|c| !pinned.contains(c));
        for (i, c) in rest.enumerate() {
            stacks[3 + i % 4].push(c);
        }
        for (i, c) in pinned.into_iter().enumerate() {
            stacks[i].push(c);
        }
        let board = Board::from_layout(ranks, &stacks, all_suits().map(Card::sentinel)).unwrap();
        Game::with_board(board, Dealer::new_with_seed(0))
    }

    fn run_keys(keys: &str, game: &mut Game) -> (Interpreter, Script) {
        let mut interp = Interpreter::new("unused.sav");
        let mut script = Script::new(keys);
        while let Some(k) = script.keys.pop_front() {
            let k = crate::keymap::translate(k);
            if interp.handle_key(Some(k), game, &mut script).unwrap().is_some() {
                break;
            }
        }
        (interp, script)
    }

    #[test]
    fn parse_commands() {
        assert_eq!(Command::parse('0'), Command::Foundation);
        assert_eq!(Command::parse('1'), Command::Stack(0));
        assert_eq!(Command::parse('8'), Command::Stack(7));
        assert_eq!(Command::parse('9'), Command::Invalid('9'));
        assert_eq!(Command::parse('q'), Command::Quit);
        assert_eq!(Command::parse('?'), Command::Help);
    }

    #[test]
    fn source_then_foundation_moves_the_ace() {
        let mut g = game();
        let (interp, script) = run_keys("10", &mut g);
        assert_eq!(script.last_status(), "The CA was moved to the foundation.");
        assert_eq!(g.board().foundation(Suit::Clubs), card(1, Suit::Clubs));
        assert_eq!(interp.phase(), Phase::AwaitingSource);
        assert_eq!(g.moves(), 1);
    }

    #[test]
    fn aliases_select_stacks() {
        let mut g = game();
        let (_, script) = run_keys("j ", &mut g);
        assert_eq!(script.last_status(), "The CA was moved to the foundation.");
    }

    #[test]
    fn stack_move_reports_both_stacks() {
        let mut g = game();
        let (_, script) = run_keys("32", &mut g);
        assert_eq!(script.last_status(), "Moved the D2 from stack 3 to stack 2.");
        assert_eq!(g.board().top_card(1), Some(card(2, Suit::Diamonds)));
    }

    #[test]
    fn refused_move_reports_and_returns_to_source() {
        let mut g = game();
        let before = g.board().clone();
        let (interp, script) = run_keys("23", &mut g);
        assert_eq!(
            script.last_status(),
            "The C3 cannot be moved from stack 2 to stack 3."
        );
        assert_eq!(g.board(), &before);
        assert_eq!(g.moves(), 0);
        assert_eq!(interp.phase(), Phase::AwaitingSource);
    }

    #[test]
    fn empty_source_is_reported() {
        let mut g = game();
        let (interp, script) = run_keys("8", &mut g);
        assert_eq!(script.last_status(), "There is no card in stack 8.");
        assert_eq!(interp.phase(), Phase::AwaitingSource);
    }

    #[test]
    fn bad_keys_in_either_phase() {
        let mut g = game();
        let (interp, script) = run_keys("x", &mut g);
        assert_eq!(script.last_status(), BAD_INPUT);
        assert_eq!(interp.phase(), Phase::AwaitingSource);

        let (interp, script) = run_keys("0", &mut g);
        assert_eq!(script.last_status(), BAD_INPUT);
        assert_eq!(interp.phase(), Phase::AwaitingSource);

        let (interp, script) = run_keys("1x", &mut g);
        assert_eq!(script.last_status(), BAD_INPUT);
        assert_eq!(interp.phase(), Phase::AwaitingSource);
        assert_eq!(g.board().stack_len(0), 1);
    }

    #[test]
    fn quit_ends_the_game_from_either_phase() {
        for keys in ["q", "1q"] {
            let mut g = game();
            let mut interp = Interpreter::new("unused.sav");
            let mut script = Script::new(keys);
            assert_eq!(interp.play(&mut g, &mut script).unwrap(), GameEnd::Quit);
        }
    }

    #[test]
    fn end_of_input_quits() {
        let mut g = game();
        let mut interp = Interpreter::new("unused.sav");
        let mut script = Script::new("");
        assert_eq!(interp.play(&mut g, &mut script).unwrap(), GameEnd::Quit);
        assert_eq!(script.prompts, vec!["Move from stack "]);
    }

    #[test]
    fn destination_prompt_names_the_card() {
        let mut g = game();
        let mut interp = Interpreter::new("unused.sav");
        let mut script = Script::new("2q");
        interp.play(&mut g, &mut script).unwrap();
        assert_eq!(script.prompts[1], "Move C3 from stack 2 to ");
    }

    #[test]
    fn help_redraws_the_board() {
        let mut g = game();
        let (_, script) = run_keys("?", &mut g);
        assert_eq!(script.boards, 1);
        assert_eq!(script.last_status(), FRESH_DISPLAY);
    }

    #[test]
    fn declined_save_does_not_write() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("saa.sav");
        let mut g = game();
        let mut interp = Interpreter::new(&path);
        let mut script = Script::new("sx");
        let k = script.keys.pop_front();
        interp.handle_key(k, &mut g, &mut script).unwrap();
        assert_eq!(script.last_status(), "The saving of the game was aborted.");
        assert!(!path.exists());
    }

    #[test]
    fn won_board_ends_before_the_first_prompt() {
        let ranks = Ranks::new(5).unwrap();
        let stacks: [Vec<Card>; STACKS] = Default::default();
        let board =
            Board::from_layout(ranks, &stacks, all_suits().map(|s| card(5, s))).unwrap();
        let mut g = Game::with_board(board, Dealer::new_with_seed(0));
        let mut interp = Interpreter::new("unused.sav");
        let mut script = Script::new("");
        assert_eq!(interp.play(&mut g, &mut script).unwrap(), GameEnd::Won);
        assert!(script.prompts.is_empty());
    }
}

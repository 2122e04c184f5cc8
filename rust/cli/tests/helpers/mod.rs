//! Shared helpers for the CLI integration tests.
//!
//! - `ScriptedDisplay`: a `GameDisplay` that plays back keys and records
//!   everything shown.
//! - `run_cli`: runs the whole program on a key script with a clean `SAA_*`
//!   environment. Tests calling it must be `#[serial]`.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::io::{self, Cursor};

use saa_cli::display::GameDisplay;
use saa_engine::board::Board;
use saa_engine::cards::{Card, Suit};

#[derive(Debug, Default)]
pub struct ScriptedDisplay {
    keys: VecDeque<char>,
    pub statuses: Vec<String>,
    pub prompts: Vec<String>,
    pub boards: usize,
    pub helps: usize,
}

impl ScriptedDisplay {
    pub fn new(keys: &str) -> Self {
        Self {
            keys: keys.chars().collect(),
            ..Self::default()
        }
    }

    pub fn remaining_keys(&self) -> usize {
        self.keys.len()
    }

    pub fn saw_status(&self, text: &str) -> bool {
        self.statuses.iter().any(|s| s.contains(text))
    }
}

impl GameDisplay for ScriptedDisplay {
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
        self.helps += 1;
        Ok(())
    }

    fn show_board(&mut self, _board: &Board) -> io::Result<()> {
        self.boards += 1;
        Ok(())
    }
}

const VARS: [&str; 5] = [
    "SAA_CONFIG",
    "SAA_RANKS",
    "SAA_SEED",
    "SAA_SAVE_FILE",
    "SAA_HISTORY",
];

/// Clears every `SAA_*` variable, applies `pairs`, and restores the previous
/// values on drop.
pub struct EnvGuard {
    restores: Vec<(String, Option<String>)>,
}

impl EnvGuard {
    pub fn apply(pairs: &[(&str, &str)]) -> Self {
        let mut restores = Vec::new();
        for key in VARS {
            restores.push((key.to_string(), std::env::var(key).ok()));
            unsafe {
                std::env::remove_var(key);
            }
        }
        for (key, value) in pairs {
            unsafe {
                std::env::set_var(key, value);
            }
        }
        EnvGuard { restores }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (key, previous) in self.restores.iter().rev() {
            unsafe {
                match previous {
                    Some(val) => std::env::set_var(key, val),
                    None => std::env::remove_var(key),
                }
            }
        }
    }
}

#[derive(Debug)]
pub struct CliResult {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

pub fn run_cli(args: &[&str], keys: &str, env: &[(&str, &str)]) -> CliResult {
    let _guard = EnvGuard::apply(env);
    let mut argv = vec!["saa"];
    argv.extend_from_slice(args);
    let mut input = Cursor::new(keys.as_bytes().to_vec());
    let mut out = Vec::new();
    let mut err = Vec::new();
    let exit_code = saa_cli::run_with_input(argv, &mut input, &mut out, &mut err);
    CliResult {
        exit_code,
        stdout: String::from_utf8_lossy(&out).into_owned(),
        stderr: String::from_utf8_lossy(&err).into_owned(),
    }
}

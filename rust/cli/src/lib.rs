//! # Streets and Alleys CLI Library
//!
//! Terminal front end for the [`saa_engine`] solitaire. The game is played one
//! key at a time: pick a source stack with `1`-`8`, then a destination with
//! `0` (the foundation) or `1`-`8`.
//!
//! ## Main Entry Point
//!
//! [`run`] parses the command line, resolves the configuration and plays
//! games on stdin/stdout until the player exits. [`run_with_input`] does the
//! same with an explicit input stream.
//!
//! ```
//! use std::io::Cursor;
//!
//! // quit the first game, then exit at the play-again prompt
//! let mut input = Cursor::new("qx");
//! let mut out = Vec::new();
//! let mut err = Vec::new();
//! let code = saa_cli::run_with_input(vec!["saa", "5"], &mut input, &mut out, &mut err);
//! assert_eq!(code, 0);
//! assert!(String::from_utf8(out).unwrap().contains("You lose."));
//! ```
//!
//! ## Configuration
//!
//! See [`config`]: `SAA_CONFIG` names a TOML file; `SAA_RANKS`, `SAA_SEED`,
//! `SAA_SAVE_FILE` and `SAA_HISTORY` override it. A rank count on the command
//! line overrides both.

use clap::Parser;
use std::io::{BufRead, Write};

#[macro_use]
mod macros;

pub mod cli;
pub mod config;
pub mod display;
mod error;
pub mod exit_code;
pub mod interpreter;
pub mod io_utils;
pub mod keymap;
pub mod logging;
pub mod session;
pub mod terminal;
pub mod ui;

use cli::SaaCli;
use config::ValueSource;
use saa_engine::cards::{MAX_RANKS, MIN_RANKS};
use saa_engine::deck::Dealer;
use saa_engine::game::Game;
use saa_engine::logger::GameLogger;
use session::Session;
use terminal::{HELP, TextDisplay};

pub use error::CliError;

/// Main entry point for the CLI application, reading keys from stdin.
///
/// # Returns
///
/// Exit code: `0` when the player exits, `1` for bad arguments, bad
/// configuration, or a fatal error
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let stdin = std::io::stdin();
    let mut stdin_lock = stdin.lock();
    run_with_input(args, &mut stdin_lock, out, err)
}

/// [`run`] with keys read from `input`.
pub fn run_with_input<I, S>(
    args: I,
    input: &mut dyn BufRead,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let cli = match SaaCli::try_parse_from(&argv) {
        Ok(cli) => cli,
        Err(e) => {
            use clap::error::ErrorKind;

            // Help and version should print to stdout and exit 0
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                    if write!(out, "{}", e).is_err() {
                        return exit_code::FAILURE;
                    }
                    exit_code::SUCCESS
                }
                _ => {
                    write_or_exit!(err, "{}", e);
                    if write!(err, "{}", HELP).is_err() {
                        return exit_code::FAILURE;
                    }
                    write_or_exit!(err, "\nUsage: saa [number_of_ranks].");
                    write_or_exit!(
                        err,
                        "The number of ranks must be between {} and {}.",
                        MIN_RANKS,
                        MAX_RANKS
                    );
                    exit_code::FAILURE
                }
            };
        }
    };

    match play(cli, input, out, err) {
        Ok(()) => exit_code::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "session ended with an error");
            let _ = ui::write_error(err, &e.to_string());
            exit_code::FAILURE
        }
    }
}

fn play(
    cli: SaaCli,
    input: &mut dyn BufRead,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let mut resolved = config::load_with_sources()?;
    resolved.apply_cli_ranks(cli.ranks);
    let ranks = resolved.ranks().map_err(|e| match resolved.sources.ranks {
        ValueSource::Cli => CliError::InvalidInput(e.to_string()),
        _ => CliError::Config(e.to_string()),
    })?;
    let cfg = resolved.config;

    let dealer = match cfg.seed {
        Some(seed) => Dealer::new_with_seed(seed),
        None => Dealer::from_clock()?,
    };
    tracing::info!(ranks = ranks.count(), seed = dealer.seed(), "starting session");

    let mut session = Session::new(Game::new(dealer), ranks, cfg.save_file);
    if let Some(path) = &cfg.history_file {
        match GameLogger::create(path) {
            Ok(logger) => session = session.with_history(logger),
            Err(e) => {
                let _ = ui::display_warning(
                    err,
                    &format!("Cannot open history file {}: {}", path.display(), e),
                );
            }
        }
    }

    {
        let mut display = TextDisplay::new(input, out);
        session.run(&mut display)?;
    }
    writeln!(out)?;
    Ok(())
}

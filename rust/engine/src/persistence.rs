//! Binary save file for a [`Board`].
//!
//! Layout, every field a host-order 32-bit integer:
//!
//! ```text
//! magic                  13921
//! card count             4 x ranks
//! foundation[4]          suit order
//! 8 x { length, card[length] }   stacks in order, cards bottom to top
//! ```
//!
//! Saving writes straight into the destination file. A failed save can leave
//! a truncated file behind.

use std::fs::File;
use std::io::{BufReader, BufWriter, ErrorKind, Read, Write};
use std::path::Path;

use crate::board::Board;
use crate::cards::{Card, Ranks, STACKS, SUITS};
use crate::errors::{LayoutError, SaveError};

pub const MAGIC: i32 = 13921;

/// File name used when none is configured, relative to the working directory.
pub const DEFAULT_SAVE_FILE: &str = "saa.sav";

fn put(w: &mut dyn Write, value: i32) -> Result<(), SaveError> {
    w.write_all(&value.to_ne_bytes())
        .map_err(SaveError::WriteFailed)
}

fn get(r: &mut dyn Read, what: &str) -> Result<i32, SaveError> {
    let mut buf = [0u8; 4];
    r.read_exact(&mut buf).map_err(|e| match e.kind() {
        ErrorKind::UnexpectedEof => SaveError::Corrupt(format!("file ends before {what}")),
        _ => SaveError::Corrupt(format!("read error at {what}: {e}")),
    })?;
    Ok(i32::from_ne_bytes(buf))
}

fn corrupt(e: LayoutError) -> SaveError {
    SaveError::Corrupt(e.to_string())
}

pub fn write_board(board: &Board, w: &mut dyn Write) -> Result<(), SaveError> {
    put(w, MAGIC)?;
    put(w, board.ranks().card_count() as i32)?;
    for card in board.foundations() {
        put(w, card.encoded())?;
    }
    for stack in 0..STACKS {
        let cards = board.stack_cards(stack);
        put(w, cards.len() as i32)?;
        for card in cards {
            put(w, card.encoded())?;
        }
    }
    w.flush().map_err(SaveError::WriteFailed)
}

/// Reads a board, checking the magic number before anything else and the
/// board invariants after everything else.
pub fn read_board(r: &mut dyn Read) -> Result<Board, SaveError> {
    let magic = get(r, "magic number")?;
    if magic != MAGIC {
        return Err(SaveError::Corrupt(format!(
            "magic number {magic}, expected {MAGIC}"
        )));
    }
    let count = get(r, "card count")?;
    let ranks = Ranks::from_card_count(count).map_err(corrupt)?;

    let mut foundations = [Card::sentinel(crate::cards::Suit::Clubs); SUITS];
    for slot in foundations.iter_mut() {
        let value = get(r, "foundations")?;
        *slot = Card::from_encoded(value).ok_or_else(|| {
            corrupt(LayoutError::CardOutOfRange {
                value,
                ranks: ranks.count(),
            })
        })?;
    }

    let mut stacks: [Vec<Card>; STACKS] = Default::default();
    for (i, cards) in stacks.iter_mut().enumerate() {
        let len = get(r, "stack length")?;
        let len = usize::try_from(len)
            .ok()
            .filter(|n| *n <= ranks.card_count())
            .ok_or_else(|| {
                corrupt(LayoutError::StackTooLong {
                    stack: i,
                    len: i64::from(len),
                    max: ranks.card_count(),
                })
            })?;
        for _ in 0..len {
            let value = get(r, "stack cards")?;
            let card = Card::from_encoded(value)
                .filter(|c| ranks.contains(*c))
                .ok_or_else(|| {
                    corrupt(LayoutError::CardOutOfRange {
                        value,
                        ranks: ranks.count(),
                    })
                })?;
            cards.push(card);
        }
    }
    Board::from_layout(ranks, &stacks, foundations).map_err(corrupt)
}

pub fn save(board: &Board, path: &Path) -> Result<(), SaveError> {
    let file = File::create(path).map_err(|source| SaveError::OpenFailed {
        path: path.to_path_buf(),
        source,
    })?;
    let mut w = BufWriter::new(file);
    write_board(board, &mut w)?;
    w.into_inner()
        .map_err(|e| SaveError::WriteFailed(e.into_error()))?
        .sync_all()
        .map_err(SaveError::WriteFailed)?;
    tracing::info!(path = %path.display(), "game saved");
    Ok(())
}

pub fn restore(path: &Path) -> Result<Board, SaveError> {
    let file = File::open(path).map_err(|source| SaveError::OpenFailed {
        path: path.to_path_buf(),
        source,
    })?;
    let mut r = BufReader::new(file);
    match read_board(&mut r) {
        Ok(board) => {
            tracing::info!(path = %path.display(), ranks = board.ranks().count(), "game restored");
            Ok(board)
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "restore failed");
            Err(e)
        }
    }
}

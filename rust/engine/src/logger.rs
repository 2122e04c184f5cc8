use serde::{Deserialize, Serialize};

/// How a game ended.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    /// Every stack ended up ordered
    Won,
    /// The player quit
    Lost,
    /// Dropped for a fresh deal after a failed restore
    Abandoned,
}

/// Summary of one finished game, written as a JSON line to the history file.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    /// Identifier of the form YYYYMMDD-NNNNNN
    pub game_id: String,
    /// Ranks per suit in play
    pub ranks: u8,
    /// Seed of the dealer that shuffled the game
    pub seed: Option<u64>,
    /// Successful moves made
    pub moves: u32,
    pub outcome: Outcome,
    /// Cards moved to the foundations when the game ended
    pub cards_on_foundations: usize,
    /// Timestamp (RFC3339), filled in on write when missing
    #[serde(default)]
    pub ts: Option<String>,
}

pub fn format_game_id(yyyymmdd: &str, seq: u32) -> String {
    format!("{}-{:06}", yyyymmdd, seq)
}

use chrono::{SecondsFormat, Utc};
use std::fs::{create_dir_all, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

pub struct GameLogger {
    writer: Option<BufWriter<File>>,
    date: String,
    seq: u32,
}

impl GameLogger {
    /// Opens `path` for appending, creating it and its parent directory as needed.
    pub fn create<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                let _ = create_dir_all(parent);
            }
        }
        let f = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            writer: Some(BufWriter::new(f)),
            date: Utc::now().format("%Y%m%d").to_string(),
            seq: 0,
        })
    }

    pub fn with_seq_for_test(date: &str) -> Self {
        Self {
            writer: None,
            date: date.to_string(),
            seq: 0,
        }
    }

    pub fn next_id(&mut self) -> String {
        self.seq += 1;
        format_game_id(&self.date, self.seq)
    }

    pub fn write(&mut self, record: &GameRecord) -> std::io::Result<()> {
        let mut rec = record.clone();
        if rec.ts.is_none() {
            rec.ts = Some(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true));
        }
        let line = serde_json::to_string(&rec).map_err(std::io::Error::other)?;
        if let Some(w) = &mut self.writer {
            w.write_all(line.as_bytes())?;
            w.write_all(b"\n")?;
            w.flush()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_count_up_from_one() {
        let mut logger = GameLogger::with_seq_for_test("20261019");
        assert_eq!(logger.next_id(), "20261019-000001");
        assert_eq!(logger.next_id(), "20261019-000002");
    }

    #[test]
    fn outcome_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Outcome::Won).unwrap(), "\"won\"");
        assert_eq!(
            serde_json::to_string(&Outcome::Abandoned).unwrap(),
            "\"abandoned\""
        );
    }
}

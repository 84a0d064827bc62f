use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::game::GameId;
use crate::hand::Category;
use crate::player::{ActionKind, PlayerId};
use crate::round::Phase;

use chrono::{DateTime, SecondsFormat, Utc};
use std::fs::{create_dir_all, File};
use std::io::{BufWriter, Write};
use std::path::Path;

/// One entry of the append-only action log.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ActionRecord {
    pub player: PlayerId,
    pub seat: usize,
    pub round_number: u32,
    /// Phase in which the action was taken
    pub phase: Phase,
    pub kind: ActionKind,
    /// Chips the action moved into the pot (0 for fold and check)
    pub amount: u32,
    pub timestamp: DateTime<Utc>,
}

/// Chips paid to one winner at showdown.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Payout {
    pub player: PlayerId,
    pub seat: usize,
    pub amount: u32,
}

/// Outcome of a round once it reaches showdown.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ShowdownInfo {
    /// Winners in payout order (clockwise from the dealer's left)
    pub winners: Vec<PlayerId>,
    pub payouts: Vec<Payout>,
    /// Winning category, `None` when everyone else folded
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Complete history of one round, written as a JSONL line.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct RoundRecord {
    pub game_id: GameId,
    pub round_number: u32,
    /// RNG seed of the table, when the host runs seeded
    #[serde(default)]
    pub seed: Option<u64>,
    pub community: Vec<Card>,
    pub actions: Vec<ActionRecord>,
    #[serde(default)]
    pub showdown: Option<ShowdownInfo>,
    /// RFC3339 time the record was written
    #[serde(default)]
    pub ts: Option<String>,
}

/// Writes [`RoundRecord`]s as JSON lines.
pub struct RoundLogger<W: Write> {
    writer: W,
    written: usize,
}

impl RoundLogger<BufWriter<File>> {
    pub fn create<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                create_dir_all(parent)?;
            }
        }
        let f = File::create(path)?;
        Ok(Self::new(BufWriter::new(f)))
    }
}

impl<W: Write> RoundLogger<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, written: 0 }
    }

    pub fn write(&mut self, record: &RoundRecord) -> std::io::Result<()> {
        // stamp records that arrive without a time
        let mut rec = record.clone();
        if rec.ts.is_none() {
            rec.ts = Some(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true));
        }
        let line = serde_json::to_string(&rec).map_err(std::io::Error::other)?;
        self.writer.write_all(line.as_bytes())?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        self.written += 1;
        Ok(())
    }

    pub fn written(&self) -> usize {
        self.written
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

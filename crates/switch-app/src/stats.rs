use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;
use switch_core::game::state::GameState;
use switch_core::model::player::WinRecord;

#[derive(Debug)]
pub enum StatsError {
    Io(io::Error),
    Json(serde_json::Error),
}

impl fmt::Display for StatsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatsError::Io(err) => write!(f, "statistics I/O error: {err}"),
            StatsError::Json(err) => write!(f, "statistics file is not valid JSON: {err}"),
        }
    }
}

impl std::error::Error for StatsError {}

impl From<io::Error> for StatsError {
    fn from(value: io::Error) -> Self {
        StatsError::Io(value)
    }
}

impl From<serde_json::Error> for StatsError {
    fn from(value: serde_json::Error) -> Self {
        StatsError::Json(value)
    }
}

/// Win/loss records by player name, persisted as a JSON file. The engine
/// only keeps counters in memory; this store carries them across games.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct StatsStore {
    records: BTreeMap<String, WinRecord>,
}

impl StatsStore {
    /// A missing file is an empty store, not an error.
    pub fn load(path: &Path) -> Result<Self, StatsError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = fs::read_to_string(path)?;
        let records = serde_json::from_str(&text)?;
        Ok(Self { records })
    }

    pub fn save(&self, path: &Path) -> Result<(), StatsError> {
        let text = serde_json::to_string_pretty(&self.records)?;
        fs::write(path, text)?;
        Ok(())
    }

    /// Folds a finished game's human counters into the store, merging by
    /// player name. Automated players carry no record and are skipped.
    pub fn absorb(&mut self, game: &GameState) {
        for player in game.players() {
            if let Some(record) = player.record() {
                let entry = self.records.entry(player.name().to_string()).or_default();
                entry.wins += record.wins;
                entry.losses += record.losses;
            }
        }
    }

    pub fn record(&self, name: &str) -> Option<&WinRecord> {
        self.records.get(name)
    }
}

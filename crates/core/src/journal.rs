//! Action journal: the scenario plus every inbound action in arrival order.
//! Replaying a journal reproduces the game exactly, so it doubles as a save file.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::scenario::Scenario;
use crate::types::Action;

pub const JOURNAL_FORMAT_VERSION: u16 = 1;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionJournal {
    pub format_version: u16,
    pub scenario: Scenario,
    pub actions: Vec<ActionRecord>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    pub seq: u64,
    pub action: Action,
}

impl ActionJournal {
    pub fn new(scenario: Scenario) -> Self {
        Self { format_version: JOURNAL_FORMAT_VERSION, scenario, actions: Vec::new() }
    }

    /// Records `action` with the next sequence number and returns that number.
    pub fn append(&mut self, action: Action) -> u64 {
        let seq = self.actions.last().map_or(0, |record| record.seq + 1);
        self.actions.push(ActionRecord { seq, action });
        seq
    }

    /// Writes to a sibling temp file first so a crash never leaves a torn journal.
    pub fn write_atomic(&self, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let tmp_path = path.with_extension("json.tmp");
        let json = serde_json::to_string_pretty(self).map_err(io::Error::other)?;

        fs::write(&tmp_path, json)?;
        fs::rename(&tmp_path, path)?;

        Ok(())
    }

    pub fn load(path: &Path) -> io::Result<Self> {
        let content = fs::read_to_string(path)?;
        let journal: Self = serde_json::from_str(&content)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        Ok(journal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Phase, Pos};
    use tempfile::tempdir;

    fn sample() -> ActionJournal {
        let mut journal = ActionJournal::new(Scenario::default());
        journal.append(Action::Select(Pos::new(0, 0)));
        journal.append(Action::Move(Pos::new(1, 0)));
        journal.append(Action::SetPhase(Phase::Attack));
        journal.append(Action::EndTurn);
        journal.append(Action::AiTurn { player: "Computer".to_string() });
        journal
    }

    #[test]
    fn sequence_numbers_are_dense_from_zero() {
        let journal = sample();
        let seqs: Vec<u64> = journal.actions.iter().map(|record| record.seq).collect();
        assert_eq!(seqs, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn atomic_write_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("saves").join("journal.json");
        let journal = sample();

        journal.write_atomic(&path).unwrap();
        assert!(path.exists());
        assert!(!path.with_extension("json.tmp").exists());

        let loaded = ActionJournal::load(&path).unwrap();
        assert_eq!(loaded, journal);
    }

    #[test]
    fn load_rejects_malformed_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{ \"format_version\": 1").unwrap();

        let err = ActionJournal::load(&path).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }
}

//! JSON file store
//!
//! Writes go to a sibling `.tmp` file first and are renamed over the real
//! file, so a crash mid-write never leaves a truncated record behind.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{ScoreRecord, ScoreStore, StoreError};
use crate::highscores::Leaderboard;
use crate::sim::Difficulty;

/// On-disk format version
const FORMAT_VERSION: u32 = 1;

#[derive(Serialize, Deserialize)]
struct Envelope {
    #[serde(default)]
    version: u32,
    #[serde(flatten)]
    record: ScoreRecord,
}

#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current record; a missing file is an empty record
    pub fn read(&self) -> Result<ScoreRecord, StoreError> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(ScoreRecord::default()),
            Err(e) => return Err(e.into()),
        };
        let envelope: Envelope = serde_json::from_str(&json)?;
        if envelope.version > FORMAT_VERSION {
            log::warn!(
                "{} has newer format v{}, reading as v{}",
                self.path.display(),
                envelope.version,
                FORMAT_VERSION
            );
        }
        Ok(envelope.record)
    }

    pub fn write(&self, record: &ScoreRecord) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let envelope = Envelope {
            version: FORMAT_VERSION,
            record: record.clone(),
        };
        let json = serde_json::to_string_pretty(&envelope)?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        log::debug!(
            "Scores saved to {} ({} entries)",
            self.path.display(),
            record.leaderboard.len()
        );
        Ok(())
    }
}

impl ScoreStore for JsonFileStore {
    fn load_high_score(&self) -> Result<u64, StoreError> {
        Ok(self.read()?.high_score)
    }

    fn record_session_end(
        &mut self,
        score: u64,
        difficulty: Difficulty,
        player_name: &str,
    ) -> Result<bool, StoreError> {
        let mut record = self.read()?;
        let new_high = record.record(score, difficulty, player_name, crate::unix_millis());
        self.write(&record)?;
        Ok(new_high)
    }

    fn load_leaderboard(&self) -> Result<Leaderboard, StoreError> {
        Ok(self.read()?.leaderboard)
    }

    fn clear_leaderboard(&mut self) -> Result<(), StoreError> {
        let mut record = self.read()?;
        record.leaderboard.clear();
        self.write(&record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "cosmic-catch-{}-{}.json",
            name,
            std::process::id()
        ))
    }

    #[test]
    fn test_missing_file_is_empty() {
        let store = JsonFileStore::new(temp_path("missing"));
        assert_eq!(store.load_high_score().unwrap(), 0);
        assert!(store.load_leaderboard().unwrap().is_empty());
    }

    #[test]
    fn test_record_persists_across_instances() {
        let path = temp_path("persist");
        let _ = fs::remove_file(&path);

        let mut store = JsonFileStore::new(&path);
        assert!(store.record_session_end(70, Difficulty::Medium, "Dee").unwrap());
        assert!(!store.record_session_end(30, Difficulty::Easy, "Eli").unwrap());

        let reopened = JsonFileStore::new(&path);
        assert_eq!(reopened.load_high_score().unwrap(), 70);
        let board = reopened.load_leaderboard().unwrap();
        let names: Vec<&str> = board.entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Dee", "Eli"]);

        let mut store = reopened;
        store.clear_leaderboard().unwrap();
        assert!(store.load_leaderboard().unwrap().is_empty());
        assert_eq!(store.load_high_score().unwrap(), 70);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_corrupt_file_is_parse_error() {
        let path = temp_path("corrupt");
        fs::write(&path, "{not json").unwrap();
        let store = JsonFileStore::new(&path);
        assert!(matches!(store.load_high_score(), Err(StoreError::Parse(_))));
        let _ = fs::remove_file(&path);
    }
}

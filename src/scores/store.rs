//! Score file persistence
//!
//! The leaderboard is stored as pretty JSON keyed by difficulty:
//!
//! ```json
//! { "EASY": [ { "name": "Player", "score": 40, "difficulty": "EASY", "date": "2024-05-01 20:13" } ] }
//! ```
//!
//! Reading never fails: a missing file means no scores yet and an unreadable
//! or corrupt file is logged and replaced by an empty table on the next save.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use super::leaderboard::{Leaderboard, ScoreEntry};
use crate::game::Difficulty;
use crate::log;

pub const DEFAULT_SCORE_FILE: &str = "high_scores.json";

pub struct ScoreStore {
    path: PathBuf,
    leaderboard: Leaderboard,
}

impl ScoreStore {
    /// Load the score file at `path`, falling back to an empty leaderboard
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let leaderboard = match load_leaderboard(&path) {
            Ok(Some(board)) => {
                log!("Loaded scores from {:?}", path);
                board
            }
            Ok(None) => {
                log!("No score file at {:?}, starting empty", path);
                Leaderboard::new()
            }
            Err(e) => {
                log!("Warning: could not load scores - {:#}", e);
                Leaderboard::new()
            }
        };

        Self { path, leaderboard }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn leaderboard(&self) -> &Leaderboard {
        &self.leaderboard
    }

    pub fn best(&self, difficulty: Difficulty) -> u32 {
        self.leaderboard.best(difficulty)
    }

    /// Record a finished round.
    ///
    /// Returns the 1-based rank when the score made the table; the file is
    /// rewritten only in that case. A failed write is logged and the in-memory
    /// table keeps the entry.
    pub fn record(&mut self, name: &str, score: u32, difficulty: Difficulty) -> Option<usize> {
        let rank = self
            .leaderboard
            .insert(ScoreEntry::new(name, score, difficulty))?;

        if let Err(e) = self.save() {
            log!("Warning: could not save scores - {:#}", e);
        }
        Some(rank)
    }

    /// Write the whole leaderboard to disk
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {:?}", parent))?;
        }

        let json = serde_json::to_string_pretty(&self.leaderboard)
            .context("Failed to serialize scores")?;
        std::fs::write(&self.path, json)
            .with_context(|| format!("Failed to write scores to {:?}", self.path))?;

        Ok(())
    }
}

/// `Ok(None)` when there is no file yet
fn load_leaderboard(path: &Path) -> Result<Option<Leaderboard>> {
    if !path.exists() {
        return Ok(None);
    }

    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read scores from {:?}", path))?;
    let mut board: Leaderboard = serde_json::from_str(&json)
        .with_context(|| format!("Failed to parse scores in {:?}", path))?;
    board.normalize();

    Ok(Some(board))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = ScoreStore::open(dir.path().join("nope.json"));
        assert!(store.leaderboard().is_empty());
    }

    #[test]
    fn test_corrupt_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("scores.json");
        std::fs::write(&path, "{ this is not json").unwrap();

        let store = ScoreStore::open(&path);
        assert!(store.leaderboard().is_empty());
    }

    #[test]
    fn test_wrong_shape_is_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("scores.json");
        std::fs::write(&path, r#"[1, 2, 3]"#).unwrap();

        let store = ScoreStore::open(&path);
        assert!(store.leaderboard().is_empty());
    }

    #[test]
    fn test_record_persists_between_sessions() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("scores.json");

        let mut store = ScoreStore::open(&path);
        assert_eq!(store.record("ana", 45, Difficulty::Medium), Some(1));
        assert_eq!(store.record("bo", 90, Difficulty::Medium), Some(1));
        assert!(path.exists());

        let reopened = ScoreStore::open(&path);
        let table = reopened.leaderboard().top(Difficulty::Medium);
        assert_eq!(table.len(), 2);
        assert_eq!(table[0].name, "bo");
        assert_eq!(reopened.best(Difficulty::Medium), 90);
        assert_eq!(reopened.best(Difficulty::Easy), 0);
    }

    #[test]
    fn test_rejected_score_is_not_written() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("scores.json");

        let mut store = ScoreStore::open(&path);
        for score in 1..=10 {
            store.record("p", score * 100, Difficulty::Hard);
        }
        std::fs::remove_file(&path).unwrap();

        assert_eq!(store.record("p", 1, Difficulty::Hard), None);
        assert!(!path.exists());
    }

    #[test]
    fn test_oversized_file_is_trimmed_on_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("scores.json");
        let entries: Vec<String> = (0..15)
            .map(|i| format!(r#"{{"player": "p{}", "score": {}, "date": ""}}"#, i, i))
            .collect();
        std::fs::write(&path, format!(r#"{{"EASY": [{}]}}"#, entries.join(","))).unwrap();

        let store = ScoreStore::open(&path);
        let table = store.leaderboard().top(Difficulty::Easy);
        assert_eq!(table.len(), 10);
        assert_eq!(table[0].score, 14);
        assert_eq!(table[9].score, 5);
    }
}

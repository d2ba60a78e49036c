//! In-memory high-score table
//!
//! One list per difficulty, each kept sorted best-first and capped at
//! [`MAX_ENTRIES`]. A new score that ties an existing one ranks below it.

use chrono::Local;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::game::Difficulty;

/// Entries kept per difficulty
pub const MAX_ENTRIES: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    #[serde(alias = "player")]
    pub name: String,
    pub score: u32,
    #[serde(default)]
    pub difficulty: Difficulty,
    /// Local time the round ended, `YYYY-MM-DD HH:MM`
    #[serde(default)]
    pub date: String,
}

impl ScoreEntry {
    /// Entry stamped with the current local time
    pub fn new(name: impl Into<String>, score: u32, difficulty: Difficulty) -> Self {
        Self {
            name: name.into(),
            score,
            difficulty,
            date: Local::now().format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Leaderboard {
    tables: BTreeMap<Difficulty, Vec<ScoreEntry>>,
}

impl Leaderboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `score` would earn a place on the `difficulty` table
    pub fn qualifies(&self, difficulty: Difficulty, score: u32) -> bool {
        let table = self.top(difficulty);
        table.len() < MAX_ENTRIES || table.last().is_some_and(|last| score > last.score)
    }

    /// Insert an entry, returning its 1-based rank if it made the table
    pub fn insert(&mut self, entry: ScoreEntry) -> Option<usize> {
        if !self.qualifies(entry.difficulty, entry.score) {
            return None;
        }

        let table = self.tables.entry(entry.difficulty).or_default();
        let index = table.iter().filter(|e| e.score >= entry.score).count();
        table.insert(index, entry);
        table.truncate(MAX_ENTRIES);

        Some(index + 1)
    }

    /// Best-first entries for a difficulty
    pub fn top(&self, difficulty: Difficulty) -> &[ScoreEntry] {
        self.tables
            .get(&difficulty)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Highest score recorded for a difficulty, 0 when empty
    pub fn best(&self, difficulty: Difficulty) -> u32 {
        self.top(difficulty).first().map_or(0, |e| e.score)
    }

    pub fn is_empty(&self) -> bool {
        self.tables.values().all(Vec::is_empty)
    }

    /// Restore the table invariants after loading from disk.
    ///
    /// Entries are filed under the table they were stored in, sorted
    /// best-first (stable, so ties keep file order) and capped.
    pub fn normalize(&mut self) {
        for (difficulty, table) in self.tables.iter_mut() {
            for entry in table.iter_mut() {
                entry.difficulty = *difficulty;
            }
            table.sort_by(|a, b| b.score.cmp(&a.score));
            table.truncate(MAX_ENTRIES);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, score: u32, difficulty: Difficulty) -> ScoreEntry {
        ScoreEntry {
            name: name.to_string(),
            score,
            difficulty,
            date: "2024-01-01 12:00".to_string(),
        }
    }

    fn is_sorted_desc(table: &[ScoreEntry]) -> bool {
        table.windows(2).all(|w| w[0].score >= w[1].score)
    }

    #[test]
    fn test_insert_returns_rank() {
        let mut board = Leaderboard::new();
        assert_eq!(board.insert(entry("a", 50, Difficulty::Easy)), Some(1));
        assert_eq!(board.insert(entry("b", 80, Difficulty::Easy)), Some(1));
        assert_eq!(board.insert(entry("c", 60, Difficulty::Easy)), Some(2));

        let names: Vec<_> = board.top(Difficulty::Easy).iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["b", "c", "a"]);
        assert_eq!(board.best(Difficulty::Easy), 80);
    }

    #[test]
    fn test_ties_rank_below_existing() {
        let mut board = Leaderboard::new();
        board.insert(entry("first", 40, Difficulty::Medium));
        assert_eq!(board.insert(entry("second", 40, Difficulty::Medium)), Some(2));
        assert_eq!(board.top(Difficulty::Medium)[0].name, "first");
    }

    #[test]
    fn test_tables_are_independent() {
        let mut board = Leaderboard::new();
        board.insert(entry("easy", 10, Difficulty::Easy));
        board.insert(entry("hard", 90, Difficulty::Hard));

        assert_eq!(board.top(Difficulty::Easy).len(), 1);
        assert!(board.top(Difficulty::Medium).is_empty());
        assert_eq!(board.best(Difficulty::Medium), 0);
        assert_eq!(board.best(Difficulty::Hard), 90);
    }

    #[test]
    fn test_capped_and_sorted() {
        let mut board = Leaderboard::new();
        for score in [5, 90, 30, 70, 10, 60, 20, 80, 40, 50, 100, 1, 55, 0, 95] {
            board.insert(entry("p", score, Difficulty::Hard));
            let table = board.top(Difficulty::Hard);
            assert!(table.len() <= MAX_ENTRIES);
            assert!(is_sorted_desc(table));
        }
        let scores: Vec<u32> = board.top(Difficulty::Hard).iter().map(|e| e.score).collect();
        assert_eq!(scores, [100, 95, 90, 80, 70, 60, 55, 50, 40, 30]);
    }

    #[test]
    fn test_full_table_rejects_low_and_equal_scores() {
        let mut board = Leaderboard::new();
        for score in 1..=10 {
            board.insert(entry("p", score * 10, Difficulty::Easy));
        }
        assert!(!board.qualifies(Difficulty::Easy, 5));
        assert!(!board.qualifies(Difficulty::Easy, 10));
        assert!(board.qualifies(Difficulty::Easy, 11));
        assert_eq!(board.insert(entry("low", 10, Difficulty::Easy)), None);
        assert_eq!(board.insert(entry("ok", 11, Difficulty::Easy)), Some(10));
        assert_eq!(board.top(Difficulty::Easy).len(), MAX_ENTRIES);
    }

    #[test]
    fn test_normalize_repairs_loaded_tables() {
        let json = r#"{
            "HARD": [
                {"player": "x", "score": 10, "date": "d"},
                {"player": "y", "score": 30, "date": "d"},
                {"name": "z", "score": 20}
            ]
        }"#;
        let mut board: Leaderboard = serde_json::from_str(json).unwrap();
        board.normalize();

        let table = board.top(Difficulty::Hard);
        assert_eq!(table[0].name, "y");
        assert_eq!(table[2].name, "x");
        assert!(table.iter().all(|e| e.difficulty == Difficulty::Hard));
    }

    #[test]
    fn test_new_entry_has_timestamp() {
        let e = ScoreEntry::new("me", 15, Difficulty::Medium);
        assert_eq!(e.date.len(), "2024-01-01 12:00".len());
    }
}

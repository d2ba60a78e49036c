//! Persistent high scores

pub mod leaderboard;
pub mod store;

pub use leaderboard::{Leaderboard, MAX_ENTRIES, ScoreEntry};
pub use store::{DEFAULT_SCORE_FILE, ScoreStore};

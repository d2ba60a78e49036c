use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::difficulty::Difficulty;

/// Smallest playable field edge, in cells
pub const MIN_GRID_SIZE: usize = 5;

/// Largest field edge; anything bigger cannot be shown in a terminal anyway
pub const MAX_GRID_SIZE: usize = 200;

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the game grid
    pub grid_width: usize,
    /// Height of the game grid
    pub grid_height: usize,
    /// Initial length of the snake
    pub initial_snake_length: usize,
    /// Raw points awarded per food
    pub food_points: u32,
    /// Tier highlighted when the menu first opens
    pub starting_difficulty: Difficulty,
    /// Name written to the leaderboard
    pub player_name: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 35,
            grid_height: 27,
            initial_snake_length: 1,
            food_points: 10,
            starting_difficulty: Difficulty::Medium,
            player_name: "Player".to_string(),
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10, 10)
    }

    /// Load a configuration from a JSON file; absent fields keep their defaults
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        serde_json::from_str(&json).with_context(|| format!("Invalid config file {:?}", path))
    }

    /// Reject fields the engine cannot play with
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.grid_width >= MIN_GRID_SIZE && self.grid_height >= MIN_GRID_SIZE,
            "grid must be at least {}x{}, got {}x{}",
            MIN_GRID_SIZE,
            MIN_GRID_SIZE,
            self.grid_width,
            self.grid_height
        );
        ensure!(
            self.grid_width <= MAX_GRID_SIZE && self.grid_height <= MAX_GRID_SIZE,
            "grid must be at most {}x{}, got {}x{}",
            MAX_GRID_SIZE,
            MAX_GRID_SIZE,
            self.grid_width,
            self.grid_height
        );
        ensure!(
            self.initial_snake_length >= 1,
            "initial snake length must be at least 1"
        );
        ensure!(
            self.initial_snake_length <= self.grid_width / 2,
            "initial snake length {} does not fit a {}-wide grid",
            self.initial_snake_length,
            self.grid_width
        );
        ensure!(!self.player_name.trim().is_empty(), "player name is empty");
        Ok(())
    }
}

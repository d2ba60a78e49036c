//! Difficulty tiers
//!
//! A tier fixes how fast the snake moves and how much the raw score is worth
//! when the round ends.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Simulation steps per second
    pub fn ticks_per_second(&self) -> u32 {
        match self {
            Difficulty::Easy => 8,
            Difficulty::Medium => 12,
            Difficulty::Hard => 18,
        }
    }

    /// Time between two simulation steps
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(1000 / self.ticks_per_second() as u64)
    }

    /// Factor applied to the raw score when the round ends
    pub fn multiplier(&self) -> f32 {
        match self {
            Difficulty::Easy => 1.0,
            Difficulty::Medium => 1.5,
            Difficulty::Hard => 2.0,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Easy => "EASY",
            Difficulty::Medium => "MEDIUM",
            Difficulty::Hard => "HARD",
        }
    }

    /// Final score for a round, rounded down
    pub fn final_score(&self, raw: u32) -> u32 {
        (raw as f64 * self.multiplier() as f64).floor() as u32
    }

    /// Next tier, wrapping around
    pub fn next(&self) -> Self {
        match self {
            Difficulty::Easy => Difficulty::Medium,
            Difficulty::Medium => Difficulty::Hard,
            Difficulty::Hard => Difficulty::Easy,
        }
    }

    /// Previous tier, wrapping around
    pub fn previous(&self) -> Self {
        match self {
            Difficulty::Easy => Difficulty::Hard,
            Difficulty::Medium => Difficulty::Easy,
            Difficulty::Hard => Difficulty::Medium,
        }
    }

    /// Quick-select keys: 1, 2 and 3
    pub fn from_digit(digit: char) -> Option<Self> {
        match digit {
            '1' => Some(Difficulty::Easy),
            '2' => Some(Difficulty::Medium),
            '3' => Some(Difficulty::Hard),
            _ => None,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "easy" | "1" => Ok(Difficulty::Easy),
            "medium" | "2" => Ok(Difficulty::Medium),
            "hard" | "3" => Ok(Difficulty::Hard),
            other => Err(format!(
                "unknown difficulty '{}', expected easy, medium or hard",
                other
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_table() {
        assert_eq!(Difficulty::Easy.ticks_per_second(), 8);
        assert_eq!(Difficulty::Medium.ticks_per_second(), 12);
        assert_eq!(Difficulty::Hard.ticks_per_second(), 18);
        assert_eq!(Difficulty::Hard.multiplier(), 2.0);
        assert_eq!(Difficulty::default(), Difficulty::Medium);
    }

    #[test]
    fn test_harder_is_faster() {
        assert!(Difficulty::Easy.tick_interval() > Difficulty::Medium.tick_interval());
        assert!(Difficulty::Medium.tick_interval() > Difficulty::Hard.tick_interval());
        assert_eq!(Difficulty::Easy.tick_interval(), Duration::from_millis(125));
    }

    #[test]
    fn test_final_score_rounds_down() {
        assert_eq!(Difficulty::Easy.final_score(30), 30);
        assert_eq!(Difficulty::Medium.final_score(30), 45);
        assert_eq!(Difficulty::Medium.final_score(10), 15);
        assert_eq!(Difficulty::Hard.final_score(0), 0);
    }

    #[test]
    fn test_cycling_wraps() {
        for tier in Difficulty::ALL {
            assert_eq!(tier.next().previous(), tier);
        }
        assert_eq!(Difficulty::Hard.next(), Difficulty::Easy);
    }

    #[test]
    fn test_parse() {
        assert_eq!("HARD".parse::<Difficulty>(), Ok(Difficulty::Hard));
        assert_eq!("1".parse::<Difficulty>(), Ok(Difficulty::Easy));
        assert!("insane".parse::<Difficulty>().is_err());
        assert_eq!(Difficulty::from_digit('2'), Some(Difficulty::Medium));
        assert_eq!(Difficulty::from_digit('4'), None);
    }

    #[test]
    fn test_serialized_as_uppercase() {
        let json = serde_json::to_string(&Difficulty::Easy).unwrap();
        assert_eq!(json, "\"EASY\"");
    }
}

//! Snake Arcade - a terminal Snake game
//!
//! This library provides:
//! - Core game rules and difficulty tiers (game module)
//! - Screen flow and the interactive loop (app module)
//! - Particle effects (effects module)
//! - Persistent per-difficulty leaderboards (scores module)
//! - Optional sound effects and music (audio module)
//! - TUI rendering (render module)

pub mod logger;

pub mod app;
pub mod audio;
pub mod effects;
pub mod game;
pub mod input;
pub mod metrics;
pub mod render;
pub mod scores;

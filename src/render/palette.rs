use ratatui::style::Color;

use crate::effects::Rgb;
use crate::game::Difficulty;

pub const SNAKE_HEAD: Color = Color::Rgb(100, 255, 150);
pub const SNAKE_PRIMARY: Color = Color::Rgb(50, 255, 50);
pub const SNAKE_SECONDARY: Color = Color::Rgb(34, 200, 34);
pub const SNAKE_DEAD: Color = Color::Rgb(255, 80, 80);
pub const FOOD: Color = Color::Rgb(255, 100, 50);
pub const GRID: Color = Color::Rgb(45, 45, 65);
pub const BORDER: Color = Color::Rgb(60, 60, 80);
pub const TEXT_PRIMARY: Color = Color::Rgb(240, 240, 240);
pub const TEXT_SECONDARY: Color = Color::Rgb(180, 180, 180);
pub const ACCENT_BLUE: Color = Color::Rgb(100, 149, 237);
pub const ACCENT_GOLD: Color = Color::Rgb(255, 215, 0);

pub fn difficulty_color(difficulty: Difficulty) -> Color {
    match difficulty {
        Difficulty::Easy => Color::Rgb(50, 255, 50),
        Difficulty::Medium => Color::Rgb(255, 200, 50),
        Difficulty::Hard => Color::Rgb(255, 80, 80),
    }
}

/// Scale a colour towards black; `ratio` 1.0 keeps it, 0.0 is black
pub fn fade((r, g, b): Rgb, ratio: f32) -> Color {
    let ratio = ratio.clamp(0.0, 1.0);
    let scale = |c: u8| (c as f32 * ratio).round() as u8;
    Color::Rgb(scale(r), scale(g), scale(b))
}

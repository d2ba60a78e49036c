use std::collections::HashMap;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Cell, Clear, Paragraph, Row, Table, Tabs},
};

use super::palette;
use crate::app::{RoundSummary, Screen, ScreenState};
use crate::effects::{Layer, Particle, ParticleSystem};
use crate::game::{Difficulty, GameState, Position};
use crate::metrics::GameMetrics;
use crate::scores::Leaderboard;

/// Everything one frame needs, borrowed from the app
pub struct View<'a> {
    pub screens: &'a ScreenState,
    pub round: Option<&'a GameState>,
    pub last_round: Option<&'a RoundSummary>,
    pub metrics: &'a GameMetrics,
    pub leaderboard: &'a Leaderboard,
    pub particles: &'a ParticleSystem,
    pub audio_on: bool,
    pub player: &'a str,
}

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, view: &View) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Body
                Constraint::Length(2), // Footer
            ])
            .split(frame.area());

        frame.render_widget(self.render_header(view), chunks[0]);

        match view.screens.screen() {
            Screen::Menu => self.render_menu(frame, chunks[1], view),
            Screen::Leaderboard => self.render_leaderboard(frame, chunks[1], view),
            Screen::Playing | Screen::Paused | Screen::GameOver => {
                if let Some(state) = view.round {
                    let field = self.field_area(chunks[1], state);
                    frame.render_widget(self.render_grid(state, view), field);
                }
                match view.screens.screen() {
                    Screen::Paused => self.render_pause(frame, chunks[1]),
                    Screen::GameOver => self.render_game_over(frame, chunks[1], view),
                    _ => {}
                }
            }
        }

        frame.render_widget(self.render_controls(view.screens.screen()), chunks[2]);

        self.render_screen_particles(frame, view.particles);
    }

    /// Rect of the bordered play field, centred in `body`
    fn field_area(&self, body: Rect, state: &GameState) -> Rect {
        // Two terminal columns per grid cell keep cells roughly square.
        let cells = |n: usize| u16::try_from(n).unwrap_or(u16::MAX);
        let width = cells(state.grid_width)
            .saturating_mul(2)
            .saturating_add(2)
            .min(body.width);
        let height = cells(state.grid_height).saturating_add(2).min(body.height);
        centered_rect(width, height, body)
    }

    fn render_grid(&self, state: &GameState, view: &View) -> Paragraph<'_> {
        let sparks: HashMap<Position, &Particle> = view
            .particles
            .iter()
            .filter(|p| p.layer == Layer::Field && p.x >= 0.0 && p.y >= 0.0)
            .map(|p| (Position::new(p.x as i32, p.y as i32), p))
            .collect();

        let dead = !state.is_alive && !state.board_full;
        let mut lines = Vec::with_capacity(state.grid_height);

        for y in 0..state.grid_height {
            let mut spans = Vec::with_capacity(state.grid_width);

            for x in 0..state.grid_width {
                let pos = Position::new(x as i32, y as i32);

                let cell = if pos == state.snake.head() {
                    let color = if dead { palette::SNAKE_DEAD } else { palette::SNAKE_HEAD };
                    let glyph = if dead { "✕" } else { state.snake.direction.head_glyph() };
                    Span::styled(
                        format!("{} ", glyph),
                        Style::default().fg(color).add_modifier(Modifier::BOLD),
                    )
                } else if let Some(i) = state.snake.body.iter().position(|p| *p == pos) {
                    let color = if dead {
                        palette::SNAKE_DEAD
                    } else if i % 2 == 0 {
                        palette::SNAKE_PRIMARY
                    } else {
                        palette::SNAKE_SECONDARY
                    };
                    Span::styled("■ ", Style::default().fg(color))
                } else if pos == state.food && !state.board_full {
                    Span::styled(
                        "● ",
                        Style::default().fg(palette::FOOD).add_modifier(Modifier::BOLD),
                    )
                } else if let Some(p) = sparks.get(&pos) {
                    Span::styled(
                        format!("{} ", p.glyph()),
                        Style::default().fg(palette::fade(p.color, p.life_ratio())),
                    )
                } else {
                    Span::styled("· ", Style::default().fg(palette::GRID))
                };

                spans.push(cell);
            }

            lines.push(Line::from(spans));
        }

        let tier = state.difficulty;
        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(palette::BORDER))
                .title(Line::from(vec![
                    Span::raw(" Snake · "),
                    Span::styled(
                        tier.label(),
                        Style::default().fg(palette::difficulty_color(tier)),
                    ),
                    Span::raw(" "),
                ])),
        )
    }

    fn render_header(&self, view: &View) -> Paragraph<'_> {
        let label = Style::default().fg(palette::ACCENT_GOLD);
        let value = Style::default()
            .fg(palette::TEXT_PRIMARY)
            .add_modifier(Modifier::BOLD);

        // A finished round lingers after the game-over screen is left.
        let round = match view.screens.screen() {
            Screen::Playing | Screen::Paused | Screen::GameOver => view.round,
            Screen::Menu | Screen::Leaderboard => None,
        };
        let tier = round
            .map(|r| r.difficulty)
            .unwrap_or_else(|| view.screens.selected());
        let score = round.map_or(0, |r| r.score);

        let text = vec![Line::from(vec![
            Span::styled("Score: ", label),
            Span::styled(score.to_string(), value),
            Span::raw("    "),
            Span::styled("Multiplier: ", label),
            Span::styled(format!("x{}", tier.multiplier()), value),
            Span::raw("    "),
            Span::styled("Best: ", label),
            Span::styled(view.leaderboard.best(tier).to_string(), value),
            Span::raw("    "),
            Span::styled("Time: ", label),
            Span::styled(view.metrics.format_time(), value),
            Span::raw("    "),
            Span::styled("Audio: ", label),
            Span::styled(if view.audio_on { "ON" } else { "OFF" }, value),
        ])];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(palette::BORDER)),
        )
    }

    fn render_menu(&self, frame: &mut Frame, area: Rect, view: &View) {
        let selected = view.screens.selected();
        let mut lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                "S N A K E",
                Style::default()
                    .fg(palette::SNAKE_PRIMARY)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                format!("Welcome, {}", view.player),
                Style::default().fg(palette::TEXT_SECONDARY),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "Choose a difficulty",
                Style::default().fg(palette::TEXT_PRIMARY),
            )),
            Line::from(""),
        ];

        for (i, tier) in Difficulty::ALL.into_iter().enumerate() {
            let color = palette::difficulty_color(tier);
            let mut style = Style::default().fg(color);
            let marker = if tier == selected {
                style = style.add_modifier(Modifier::BOLD | Modifier::REVERSED);
                "▶"
            } else {
                " "
            };
            lines.push(Line::from(vec![
                Span::styled(format!("{} ", marker), Style::default().fg(color)),
                Span::styled(format!(" {}  {:<6} ", i + 1, tier.label()), style),
                Span::styled(
                    format!(
                        "  {:>2} moves/s  x{:<3}  best {}",
                        tier.ticks_per_second(),
                        tier.multiplier(),
                        view.leaderboard.best(tier)
                    ),
                    Style::default().fg(palette::TEXT_SECONDARY),
                ),
            ]));
        }

        if let Some(last) = view.last_round {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                format!(
                    "Last round: {} points on {}",
                    last.final_score,
                    last.difficulty.label()
                ),
                Style::default().fg(palette::TEXT_SECONDARY),
            )));
        }

        let height = (lines.len() as u16 + 2).min(area.height);
        let width = 56.min(area.width);
        let menu_area = centered_rect(width, height, area);

        frame.render_widget(
            Paragraph::new(lines).alignment(Alignment::Center).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(palette::ACCENT_BLUE)),
            ),
            menu_area,
        );
    }

    fn render_leaderboard(&self, frame: &mut Frame, area: Rect, view: &View) {
        let tab = view.screens.tab();
        let width = 60.min(area.width);
        let height = 18.min(area.height);
        let board_area = centered_rect(width, height, area);

        let parts = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0)])
            .split(board_area);

        let tabs = Tabs::new(Difficulty::ALL.iter().map(|d| d.label()))
            .select(Difficulty::ALL.iter().position(|d| *d == tab).unwrap_or(0))
            .style(Style::default().fg(palette::TEXT_SECONDARY))
            .highlight_style(
                Style::default()
                    .fg(palette::difficulty_color(tab))
                    .add_modifier(Modifier::BOLD),
            )
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(palette::ACCENT_BLUE))
                    .title(" High Scores "),
            );
        frame.render_widget(tabs, parts[0]);

        let entries = view.leaderboard.top(tab);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(palette::BORDER));

        if entries.is_empty() {
            frame.render_widget(
                Paragraph::new(vec![
                    Line::from(""),
                    Line::from(Span::styled(
                        "No scores yet. Go set one!",
                        Style::default().fg(palette::TEXT_SECONDARY),
                    )),
                ])
                .alignment(Alignment::Center)
                .block(block),
                parts[1],
            );
            return;
        }

        let rows = entries.iter().enumerate().map(|(i, entry)| {
            let style = match i {
                0 => Style::default().fg(palette::ACCENT_GOLD).add_modifier(Modifier::BOLD),
                1 | 2 => Style::default().fg(palette::TEXT_PRIMARY),
                _ => Style::default().fg(palette::TEXT_SECONDARY),
            };
            Row::new(vec![
                Cell::from(format!("#{}", i + 1)),
                Cell::from(entry.name.clone()),
                Cell::from(entry.score.to_string()),
                Cell::from(entry.date.clone()),
            ])
            .style(style)
        });

        let table = Table::new(
            rows,
            [
                Constraint::Length(4),
                Constraint::Min(10),
                Constraint::Length(8),
                Constraint::Length(16),
            ],
        )
        .header(
            Row::new(vec!["Rank", "Player", "Score", "Date"])
                .style(Style::default().fg(palette::ACCENT_BLUE).add_modifier(Modifier::BOLD)),
        )
        .block(block);

        frame.render_widget(table, parts[1]);
    }

    fn render_pause(&self, frame: &mut Frame, area: Rect) {
        let popup = centered_rect(30.min(area.width), 7.min(area.height), area);
        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                "PAUSED",
                Style::default()
                    .fg(palette::ACCENT_BLUE)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "P to resume, Esc for menu",
                Style::default().fg(palette::TEXT_SECONDARY),
            )),
        ];

        frame.render_widget(Clear, popup);
        frame.render_widget(
            Paragraph::new(text).alignment(Alignment::Center).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(palette::ACCENT_BLUE)),
            ),
            popup,
        );
    }

    fn render_game_over(&self, frame: &mut Frame, area: Rect, view: &View) {
        let Some(last) = view.last_round else {
            return;
        };

        let (title, title_color) = if last.board_full {
            ("BOARD CLEARED!", palette::ACCENT_GOLD)
        } else {
            ("GAME OVER", palette::SNAKE_DEAD)
        };
        let label = Style::default().fg(palette::TEXT_SECONDARY);
        let value = Style::default()
            .fg(palette::TEXT_PRIMARY)
            .add_modifier(Modifier::BOLD);

        let mut text = vec![
            Line::from(""),
            Line::from(Span::styled(
                title,
                Style::default().fg(title_color).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("Score: ", label),
                Span::styled(last.raw_score.to_string(), value),
                Span::styled(format!("  ({} food)", last.foods_eaten), label),
            ]),
            Line::from(vec![
                Span::styled("Multiplier: ", label),
                Span::styled(format!("x{}", last.difficulty.multiplier()), value),
            ]),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(palette::ACCENT_GOLD)),
                Span::styled(
                    last.final_score.to_string(),
                    Style::default()
                        .fg(palette::ACCENT_GOLD)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(""),
        ];

        text.push(match last.rank {
            Some(1) => Line::from(Span::styled(
                "NEW HIGH SCORE!",
                Style::default()
                    .fg(palette::ACCENT_GOLD)
                    .add_modifier(Modifier::BOLD | Modifier::SLOW_BLINK),
            )),
            Some(rank) => Line::from(Span::styled(
                format!("Leaderboard rank #{}", rank),
                Style::default().fg(palette::ACCENT_BLUE),
            )),
            None => Line::from(""),
        });
        text.push(Line::from(""));
        text.push(Line::from(vec![
            Span::styled("Enter", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
            Span::styled(" again  ", label),
            Span::styled("L", Style::default().fg(palette::ACCENT_BLUE).add_modifier(Modifier::BOLD)),
            Span::styled(" scores  ", label),
            Span::styled("Esc", Style::default().fg(palette::TEXT_PRIMARY).add_modifier(Modifier::BOLD)),
            Span::styled(" menu", label),
        ]));

        let popup = centered_rect(40.min(area.width), (text.len() as u16 + 2).min(area.height), area);
        frame.render_widget(Clear, popup);
        frame.render_widget(
            Paragraph::new(text).alignment(Alignment::Center).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(title_color)),
            ),
            popup,
        );
    }

    fn render_controls(&self, screen: Screen) -> Paragraph<'_> {
        let key = |k: &'static str| Span::styled(k, Style::default().fg(Color::Cyan));
        let sep = || Span::raw(" | ");

        let spans = match screen {
            Screen::Menu => vec![
                key("1-3 ←→"), Span::raw(" difficulty"), sep(),
                key("Enter"), Span::raw(" start"), sep(),
                key("L"), Span::raw(" scores"), sep(),
                key("M"), Span::raw(" audio"), sep(),
                key("Q"), Span::raw(" quit"),
            ],
            Screen::Playing => vec![
                key("↑↓←→"), Span::raw(" or "), key("WASD"), Span::raw(" move"), sep(),
                key("P"), Span::raw(" pause"), sep(),
                key("M"), Span::raw(" audio"), sep(),
                key("Esc"), Span::raw(" menu"),
            ],
            Screen::Paused => vec![
                key("P"), Span::raw(" resume"), sep(),
                key("Esc"), Span::raw(" menu"), sep(),
                key("Q"), Span::raw(" quit"),
            ],
            Screen::GameOver => vec![
                key("Enter"), Span::raw(" play again"), sep(),
                key("L"), Span::raw(" scores"), sep(),
                key("Esc"), Span::raw(" menu"), sep(),
                key("Q"), Span::raw(" quit"),
            ],
            Screen::Leaderboard => vec![
                key("1-3 ←→"), Span::raw(" difficulty"), sep(),
                key("Esc"), Span::raw(" back"),
            ],
        };

        Paragraph::new(Line::from(spans)).alignment(Alignment::Center)
    }

    /// Ambient motes only land on blank cells so text stays readable
    fn render_screen_particles(&self, frame: &mut Frame, particles: &ParticleSystem) {
        let area = frame.area();
        let buffer = frame.buffer_mut();

        for p in particles.iter().filter(|p| p.layer == Layer::Screen) {
            if p.x < 0.0 || p.y < 0.0 {
                continue;
            }
            let (x, y) = (p.x as u16, p.y as u16);
            if x >= area.right() || y >= area.bottom() {
                continue;
            }
            if let Some(cell) = buffer.cell_mut((x, y)) {
                if cell.symbol() == " " {
                    cell.set_symbol(p.glyph())
                        .set_fg(palette::fade(p.color, p.life_ratio()));
                }
            }
        }
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

/// A `width` x `height` rect centred in `area`
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::particles::SNAKE_HEAD;
    use crate::game::{Direction, Snake};
    use ratatui::{Terminal, backend::TestBackend};

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    fn draw(view: &View) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        terminal
            .draw(|frame| Renderer::new().render(frame, view))
            .unwrap();
        buffer_text(&terminal)
    }

    fn round() -> GameState {
        GameState::new(
            Snake::new(Position::new(5, 5), Direction::Right, 3),
            Position::new(8, 2),
            12,
            10,
            Difficulty::Hard,
        )
    }

    #[test]
    fn test_centered_rect() {
        let area = Rect::new(0, 0, 100, 40);
        assert_eq!(centered_rect(20, 10, area), Rect::new(40, 15, 20, 10));
        assert_eq!(centered_rect(200, 10, area).width, 100);
    }

    #[test]
    fn test_menu_lists_every_difficulty() {
        let screens = ScreenState::new(Difficulty::Medium);
        let metrics = GameMetrics::new();
        let leaderboard = Leaderboard::new();
        let particles = ParticleSystem::with_seed(8, 1);
        let text = draw(&View {
            screens: &screens,
            round: None,
            last_round: None,
            metrics: &metrics,
            leaderboard: &leaderboard,
            particles: &particles,
            audio_on: true,
            player: "Tester",
        });

        assert!(text.contains("S N A K E"));
        assert!(text.contains("EASY"));
        assert!(text.contains("MEDIUM"));
        assert!(text.contains("HARD"));
        assert!(text.contains("Welcome, Tester"));
    }

    #[test]
    fn test_playing_draws_snake_food_and_sparks() {
        let mut screens = ScreenState::new(Difficulty::Hard);
        screens.handle(crate::input::KeyAction::Confirm);
        let state = round();
        let metrics = GameMetrics::new();
        let leaderboard = Leaderboard::new();
        let mut particles = ParticleSystem::with_seed(64, 1);
        particles.spawn_explosion(1.5, 1.5, SNAKE_HEAD, 1);

        let text = draw(&View {
            screens: &screens,
            round: Some(&state),
            last_round: None,
            metrics: &metrics,
            leaderboard: &leaderboard,
            particles: &particles,
            audio_on: false,
            player: "Tester",
        });

        assert!(text.contains("▶ ■ ■") || text.contains("■ ■ ▶"));
        assert!(text.contains('●'));
        assert!(text.contains("Audio: OFF"));
        assert!(text.contains("x2"));
    }

    #[test]
    fn test_game_over_shows_final_score_and_rank() {
        let mut screens = ScreenState::new(Difficulty::Hard);
        screens.handle(crate::input::KeyAction::Confirm);
        screens.round_over();
        let mut state = round();
        state.is_alive = false;
        let summary = RoundSummary {
            difficulty: Difficulty::Hard,
            raw_score: 40,
            final_score: 80,
            foods_eaten: 4,
            rank: Some(1),
            board_full: false,
        };
        let metrics = GameMetrics::new();
        let leaderboard = Leaderboard::new();
        let particles = ParticleSystem::with_seed(8, 1);

        let text = draw(&View {
            screens: &screens,
            round: Some(&state),
            last_round: Some(&summary),
            metrics: &metrics,
            leaderboard: &leaderboard,
            particles: &particles,
            audio_on: true,
            player: "Tester",
        });

        assert!(text.contains("GAME OVER"));
        assert!(text.contains("Final Score: 80"));
        assert!(text.contains("NEW HIGH SCORE!"));
    }

    #[test]
    fn test_oversized_grid_is_clipped() {
        let mut screens = ScreenState::new(Difficulty::Easy);
        screens.handle(crate::input::KeyAction::Confirm);
        let state = GameState::new(
            Snake::new(Position::new(3, 2), Direction::Right, 1),
            Position::new(0, 0),
            40_000,
            5,
            Difficulty::Easy,
        );
        let metrics = GameMetrics::new();
        let leaderboard = Leaderboard::new();
        let particles = ParticleSystem::with_seed(8, 1);

        let text = draw(&View {
            screens: &screens,
            round: Some(&state),
            last_round: None,
            metrics: &metrics,
            leaderboard: &leaderboard,
            particles: &particles,
            audio_on: true,
            player: "Tester",
        });

        assert!(text.contains('▶'));
    }

    #[test]
    fn test_menu_header_ignores_finished_round() {
        let screens = ScreenState::new(Difficulty::Easy);
        let mut state = round();
        state.score = 70;
        let metrics = GameMetrics::new();
        let leaderboard = Leaderboard::new();
        let particles = ParticleSystem::with_seed(8, 1);

        let text = draw(&View {
            screens: &screens,
            round: Some(&state),
            last_round: None,
            metrics: &metrics,
            leaderboard: &leaderboard,
            particles: &particles,
            audio_on: true,
            player: "Tester",
        });

        assert!(text.contains("Multiplier: x1 "));
        assert!(text.contains("Score: 0 "));
    }

    #[test]
    fn test_leaderboard_table() {
        let mut screens = ScreenState::new(Difficulty::Easy);
        screens.handle(crate::input::KeyAction::Leaderboard);
        let mut leaderboard = Leaderboard::new();
        leaderboard.insert(crate::scores::ScoreEntry {
            name: "ada".to_string(),
            score: 120,
            difficulty: Difficulty::Easy,
            date: "2024-03-03 10:00".to_string(),
        });
        let metrics = GameMetrics::new();
        let particles = ParticleSystem::with_seed(8, 1);

        let text = draw(&View {
            screens: &screens,
            round: None,
            last_round: None,
            metrics: &metrics,
            leaderboard: &leaderboard,
            particles: &particles,
            audio_on: true,
            player: "Tester",
        });

        assert!(text.contains("High Scores"));
        assert!(text.contains("ada"));
        assert!(text.contains("120"));
    }
}

//! The interactive game: terminal setup, the frame loop and the glue between
//! input, simulation, effects, scores and audio.

pub mod screen;

pub use screen::{Effect, Screen, ScreenState};

use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEvent, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::collections::VecDeque;
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::{Instant, Interval, MissedTickBehavior, interval, interval_at};

use crate::audio::{AudioManager, Sound};
use crate::effects::{ParticleSystem, particles::SNAKE_HEAD};
use crate::game::{Action, Difficulty, Direction, GameConfig, GameEngine, GameState};
use crate::input::InputHandler;
use crate::log;
use crate::metrics::GameMetrics;
use crate::render::{Renderer, View};
use crate::scores::ScoreStore;

/// Render at 30 FPS; particles age once per frame
const FRAME_INTERVAL: Duration = Duration::from_millis(33);

/// Turns typed faster than the snake moves are replayed on later ticks
const MAX_QUEUED_TURNS: usize = 2;

const EXPLOSION_PARTICLES: usize = 25;

/// Outcome of the last finished round, shown on the game-over screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundSummary {
    pub difficulty: Difficulty,
    pub raw_score: u32,
    pub final_score: u32,
    pub foods_eaten: u32,
    /// Leaderboard placement, if the score made the table
    pub rank: Option<usize>,
    pub board_full: bool,
}

pub struct App {
    engine: GameEngine,
    round: Option<GameState>,
    screens: ScreenState,
    metrics: GameMetrics,
    scores: ScoreStore,
    audio: AudioManager,
    particles: ParticleSystem,
    renderer: Renderer,
    input_handler: InputHandler,
    last_round: Option<RoundSummary>,
    pending_turns: VecDeque<Direction>,
    /// Set when a round starts so the loop can re-arm its tick timer
    retime: Option<Duration>,
    should_quit: bool,
}

impl App {
    pub fn new(config: GameConfig, scores: ScoreStore, audio: AudioManager) -> Self {
        let screens = ScreenState::new(config.starting_difficulty);

        Self {
            engine: GameEngine::new(config),
            round: None,
            screens,
            metrics: GameMetrics::new(),
            scores,
            audio,
            particles: ParticleSystem::default(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            last_round: None,
            pending_turns: VecDeque::with_capacity(MAX_QUEUED_TURNS),
            retime: None,
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();
        let mut tick_timer = sim_timer(self.screens.selected().tick_interval());
        let mut render_timer = interval(FRAME_INTERVAL);

        loop {
            tokio::select! {
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event),
                        Some(Err(e)) => return Err(e).context("Failed to read terminal event"),
                        None => self.should_quit = true,
                    }
                }

                _ = tick_timer.tick() => {
                    self.on_tick();
                }

                _ = render_timer.tick() => {
                    let size = terminal.size().context("Failed to read terminal size")?;
                    self.on_frame(size.width, size.height);
                    let view = self.view();
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &view);
                    }).context("Failed to draw frame")?;
                }

                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if let Some(period) = self.retime.take() {
                tick_timer = sim_timer(period);
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind == KeyEventKind::Press {
                self.handle_key(key);
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        let action = self.input_handler.handle_key_event(key);

        match self.screens.handle(action) {
            Effect::None => {}
            Effect::Quit => self.should_quit = true,
            Effect::StartRound(difficulty) => self.start_round(difficulty),
            Effect::Steer(direction) => {
                if self.pending_turns.len() < MAX_QUEUED_TURNS {
                    self.pending_turns.push_back(direction);
                }
            }
            Effect::Paused => self.metrics.pause(),
            Effect::Resumed => self.metrics.resume(),
            Effect::Abandoned => {
                log!("Round abandoned");
                self.round = None;
                self.pending_turns.clear();
                self.particles.clear();
                self.metrics.pause();
                self.audio.play(Sound::MenuSelect);
            }
            Effect::ToggleAudio => {
                self.audio.toggle();
            }
            Effect::SelectionMoved => self.audio.play(Sound::MenuMove),
        }
    }

    fn start_round(&mut self, difficulty: Difficulty) {
        log!("Round started on {}", difficulty);
        self.round = Some(self.engine.reset(difficulty));
        self.pending_turns.clear();
        self.particles.clear();
        self.metrics.on_game_start();
        self.retime = Some(difficulty.tick_interval());
        self.audio.play(Sound::GameStart);
    }

    /// One simulation step; does nothing unless a round is being played
    fn on_tick(&mut self) {
        if !self.screens.is_simulating() {
            return;
        }
        let Some(state) = self.round.as_mut() else {
            return;
        };

        let action = self
            .pending_turns
            .pop_front()
            .map(Action::Move)
            .unwrap_or(Action::Continue);

        let result = self.engine.step(state, action);

        if result.info.turned {
            self.audio.play(Sound::Turn);
        }
        if let Some(pos) = result.info.eaten_at {
            self.particles
                .spawn_food_burst(pos.x as f32 + 0.5, pos.y as f32 + 0.5);
            self.audio.play(Sound::Eat);
        }

        if result.terminated {
            self.finish_round();
        }
    }

    fn finish_round(&mut self) {
        let Some(state) = self.round.as_ref() else {
            return;
        };

        let player = self.engine.config().player_name.clone();
        let final_score = state.final_score();
        let rank = self.scores.record(&player, final_score, state.difficulty);

        log!(
            "Round over on {}: raw {}, final {}, rank {:?}",
            state.difficulty,
            state.score,
            final_score,
            rank
        );

        if !state.board_full {
            let head = state.snake.head();
            self.particles.spawn_explosion(
                head.x as f32 + 0.5,
                head.y as f32 + 0.5,
                SNAKE_HEAD,
                EXPLOSION_PARTICLES,
            );
        }

        self.last_round = Some(RoundSummary {
            difficulty: state.difficulty,
            raw_score: state.score,
            final_score,
            foods_eaten: state.foods_eaten,
            rank,
            board_full: state.board_full,
        });

        self.metrics.on_game_over(final_score);
        self.audio.play(if rank.is_some() {
            Sound::HighScore
        } else {
            Sound::GameOver
        });
        self.pending_turns.clear();
        self.screens.round_over();
    }

    /// Per-frame housekeeping before drawing
    fn on_frame(&mut self, width: u16, height: u16) {
        self.metrics.update();

        match self.screens.screen() {
            Screen::Menu | Screen::Leaderboard => {
                self.particles.spawn_ambient(width, height);
                self.particles.update();
            }
            Screen::Playing => {
                if let Some(state) = self.round.as_ref().filter(|r| !r.board_full) {
                    self.particles.spawn_food_sparkle(
                        state.food.x as f32 + 0.5,
                        state.food.y as f32 + 0.5,
                    );
                }
                self.particles.update();
            }
            Screen::GameOver => self.particles.update(),
            Screen::Paused => {}
        }
    }

    fn view(&self) -> View<'_> {
        View {
            screens: &self.screens,
            round: self.round.as_ref(),
            last_round: self.last_round.as_ref(),
            metrics: &self.metrics,
            leaderboard: self.scores.leaderboard(),
            particles: &self.particles,
            audio_on: self.audio.is_enabled(),
            player: &self.engine.config().player_name,
        }
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

/// Simulation timer whose first tick is one full period away
fn sim_timer(period: Duration) -> Interval {
    let mut timer = interval_at(Instant::now() + period, period);
    timer.set_missed_tick_behavior(MissedTickBehavior::Skip);
    timer
}

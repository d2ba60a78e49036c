//! Screen flow
//!
//! ```text
//! Menu        --Enter-->  Playing      Menu      --L-->      Leaderboard
//! Playing     --P-->      Paused       Paused    --P-->      Playing
//! Playing     --crash-->  GameOver     GameOver  --Enter-->  Playing
//! GameOver    --L-->      Leaderboard  any       --Esc-->    Menu
//! ```
//!
//! Key presses are the only thing that moves between screens, apart from the
//! engine ending a round, which the app reports through [`ScreenState::round_over`].

use crate::game::{Difficulty, Direction};
use crate::input::KeyAction;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Menu,
    Playing,
    Paused,
    GameOver,
    Leaderboard,
}

/// What the app has to do in response to a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    Quit,
    /// Begin a fresh round at this difficulty
    StartRound(Difficulty),
    Steer(Direction),
    Paused,
    Resumed,
    /// Round dropped without recording a score
    Abandoned,
    ToggleAudio,
    /// A menu or tab selection changed
    SelectionMoved,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenState {
    screen: Screen,
    /// Difficulty highlighted on the menu, used for the next round
    selected: Difficulty,
    /// Table shown on the leaderboard
    tab: Difficulty,
}

impl ScreenState {
    pub fn new(selected: Difficulty) -> Self {
        Self {
            screen: Screen::Menu,
            selected,
            tab: selected,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn selected(&self) -> Difficulty {
        self.selected
    }

    pub fn tab(&self) -> Difficulty {
        self.tab
    }

    /// Whether the simulation should advance
    pub fn is_simulating(&self) -> bool {
        self.screen == Screen::Playing
    }

    /// The engine reported the end of the round
    pub fn round_over(&mut self) {
        if self.screen == Screen::Playing {
            self.screen = Screen::GameOver;
            self.tab = self.selected;
        }
    }

    pub fn handle(&mut self, action: KeyAction) -> Effect {
        if action == KeyAction::Quit {
            return Effect::Quit;
        }

        match self.screen {
            Screen::Menu => self.handle_menu(action),
            Screen::Playing => self.handle_playing(action),
            Screen::Paused => self.handle_paused(action),
            Screen::GameOver => self.handle_game_over(action),
            Screen::Leaderboard => self.handle_leaderboard(action),
        }
    }

    fn handle_menu(&mut self, action: KeyAction) -> Effect {
        match action {
            KeyAction::Confirm => self.start(),
            KeyAction::Digit(d) => match Difficulty::from_digit(d) {
                Some(tier) => self.select(tier),
                None => Effect::None,
            },
            KeyAction::Steer(Direction::Left) | KeyAction::Steer(Direction::Up) => {
                self.select(self.selected.previous())
            }
            KeyAction::Steer(Direction::Right) | KeyAction::Steer(Direction::Down) => {
                self.select(self.selected.next())
            }
            KeyAction::Leaderboard => {
                self.tab = self.selected;
                self.screen = Screen::Leaderboard;
                Effect::SelectionMoved
            }
            KeyAction::ToggleAudio => Effect::ToggleAudio,
            KeyAction::Back => Effect::Quit,
            _ => Effect::None,
        }
    }

    fn handle_playing(&mut self, action: KeyAction) -> Effect {
        match action {
            KeyAction::Steer(dir) => Effect::Steer(dir),
            KeyAction::Pause | KeyAction::Confirm => {
                self.screen = Screen::Paused;
                Effect::Paused
            }
            KeyAction::ToggleAudio => Effect::ToggleAudio,
            KeyAction::Back => {
                self.screen = Screen::Menu;
                Effect::Abandoned
            }
            _ => Effect::None,
        }
    }

    fn handle_paused(&mut self, action: KeyAction) -> Effect {
        match action {
            KeyAction::Pause | KeyAction::Confirm => {
                self.screen = Screen::Playing;
                Effect::Resumed
            }
            KeyAction::ToggleAudio => Effect::ToggleAudio,
            KeyAction::Back => {
                self.screen = Screen::Menu;
                Effect::Abandoned
            }
            _ => Effect::None,
        }
    }

    fn handle_game_over(&mut self, action: KeyAction) -> Effect {
        match action {
            KeyAction::Confirm => self.start(),
            KeyAction::Leaderboard => {
                self.tab = self.selected;
                self.screen = Screen::Leaderboard;
                Effect::SelectionMoved
            }
            KeyAction::ToggleAudio => Effect::ToggleAudio,
            KeyAction::Back => {
                self.screen = Screen::Menu;
                Effect::SelectionMoved
            }
            _ => Effect::None,
        }
    }

    fn handle_leaderboard(&mut self, action: KeyAction) -> Effect {
        match action {
            KeyAction::Digit(d) => match Difficulty::from_digit(d) {
                Some(tier) => {
                    self.tab = tier;
                    Effect::SelectionMoved
                }
                None => Effect::None,
            },
            KeyAction::Steer(Direction::Left) => {
                self.tab = self.tab.previous();
                Effect::SelectionMoved
            }
            KeyAction::Steer(Direction::Right) => {
                self.tab = self.tab.next();
                Effect::SelectionMoved
            }
            KeyAction::Back | KeyAction::Confirm | KeyAction::Leaderboard => {
                self.screen = Screen::Menu;
                Effect::SelectionMoved
            }
            KeyAction::ToggleAudio => Effect::ToggleAudio,
            _ => Effect::None,
        }
    }

    fn start(&mut self) -> Effect {
        self.screen = Screen::Playing;
        Effect::StartRound(self.selected)
    }

    fn select(&mut self, tier: Difficulty) -> Effect {
        if tier == self.selected {
            return Effect::None;
        }
        self.selected = tier;
        Effect::SelectionMoved
    }
}

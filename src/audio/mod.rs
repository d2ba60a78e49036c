//! Optional sound effects and background music
//!
//! Every sound has a fixed file name inside the audio directory. Whatever is
//! missing is simply skipped, and without an output device (or without the
//! `audio` feature) the whole manager degrades to silence.

pub mod backend;
#[cfg(feature = "audio")]
pub mod rodio_backend;

pub use backend::{AudioBackend, NullBackend};

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::log;

pub const DEFAULT_AUDIO_DIR: &str = "audio";
pub const MUSIC_FILE: &str = "background_music.ogg";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sound {
    Eat,
    Turn,
    GameOver,
    GameStart,
    HighScore,
    MenuMove,
    MenuSelect,
}

impl Sound {
    pub const ALL: [Sound; 7] = [
        Sound::Eat,
        Sound::Turn,
        Sound::GameOver,
        Sound::GameStart,
        Sound::HighScore,
        Sound::MenuMove,
        Sound::MenuSelect,
    ];

    pub fn file_name(&self) -> &'static str {
        match self {
            Sound::Eat => "eat_food.wav",
            Sound::Turn => "turn.wav",
            Sound::GameOver => "game_over.wav",
            Sound::GameStart => "game_start.wav",
            Sound::HighScore => "high_score.wav",
            Sound::MenuMove => "button_hover.wav",
            Sound::MenuSelect => "button_click.wav",
        }
    }
}

pub struct AudioManager {
    backend: Box<dyn AudioBackend>,
    sounds: HashMap<Sound, PathBuf>,
    music: Option<PathBuf>,
    enabled: bool,
}

impl AudioManager {
    /// Discover the audio files in `dir` and open the default output device
    pub fn new(dir: &Path, enabled: bool) -> Self {
        let sounds = discover_sounds(dir);
        let music = Some(dir.join(MUSIC_FILE)).filter(|p| p.is_file());

        let backend: Box<dyn AudioBackend> = if sounds.is_empty() && music.is_none() {
            log!("No audio files in {:?}, sound disabled", dir);
            Box::new(NullBackend)
        } else {
            open_device()
        };

        Self::with_backend(backend, sounds, music, enabled)
    }

    /// Manager that never makes a sound
    pub fn silent() -> Self {
        Self::with_backend(Box::new(NullBackend), HashMap::new(), None, false)
    }

    pub fn with_backend(
        mut backend: Box<dyn AudioBackend>,
        sounds: HashMap<Sound, PathBuf>,
        music: Option<PathBuf>,
        enabled: bool,
    ) -> Self {
        if let Some(path) = &music {
            if let Err(e) = backend.start_music(path) {
                log!("Could not start background music: {:#}", e);
            } else {
                backend.set_music_paused(!enabled);
            }
        }

        Self {
            backend,
            sounds,
            music,
            enabled,
        }
    }

    /// Play a sound effect if it was found and audio is on
    pub fn play(&mut self, sound: Sound) {
        if !self.enabled {
            return;
        }
        let Some(path) = self.sounds.get(&sound) else {
            return;
        };
        if let Err(e) = self.backend.play(path) {
            log!("Could not play {:?}: {:#}", sound, e);
        }
    }

    /// Flip audio on or off; returns the new state
    pub fn toggle(&mut self) -> bool {
        self.enabled = !self.enabled;
        if self.music.is_some() {
            self.backend.set_music_paused(!self.enabled);
        }
        log!("Audio {}", if self.enabled { "on" } else { "off" });
        self.enabled
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Sounds whose files were found
    pub fn available(&self) -> impl Iterator<Item = Sound> + '_ {
        Sound::ALL.into_iter().filter(|s| self.sounds.contains_key(s))
    }

    pub fn has_music(&self) -> bool {
        self.music.is_some()
    }
}

fn discover_sounds(dir: &Path) -> HashMap<Sound, PathBuf> {
    Sound::ALL
        .into_iter()
        .map(|sound| (sound, dir.join(sound.file_name())))
        .filter(|(_, path)| path.is_file())
        .collect()
}

#[cfg(feature = "audio")]
fn open_device() -> Box<dyn AudioBackend> {
    match rodio_backend::RodioBackend::new() {
        Ok(backend) => {
            log!("Audio output opened");
            Box::new(backend)
        }
        Err(e) => {
            log!("No audio output, sound disabled: {:#}", e);
            Box::new(NullBackend)
        }
    }
}

#[cfg(not(feature = "audio"))]
fn open_device() -> Box<dyn AudioBackend> {
    log!("Built without the audio feature, sound disabled");
    Box::new(NullBackend)
}

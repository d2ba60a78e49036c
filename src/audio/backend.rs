use anyhow::Result;
use std::path::Path;

/// Something that can turn audio files into sound
pub trait AudioBackend {
    /// Fire-and-forget playback of a sound effect
    fn play(&mut self, path: &Path) -> Result<()>;

    /// Start looping background music
    fn start_music(&mut self, path: &Path) -> Result<()>;

    fn set_music_paused(&mut self, paused: bool);
}

/// Backend used when there is no device or no audio support compiled in
pub struct NullBackend;

impl AudioBackend for NullBackend {
    fn play(&mut self, _path: &Path) -> Result<()> {
        Ok(())
    }

    fn start_music(&mut self, _path: &Path) -> Result<()> {
        Ok(())
    }

    fn set_music_paused(&mut self, _paused: bool) {}
}

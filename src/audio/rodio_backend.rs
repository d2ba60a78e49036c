//! rodio output, compiled with the `audio` feature

use anyhow::{Context, Result};
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use super::backend::AudioBackend;

const SFX_VOLUME: f32 = 0.7;
const MUSIC_VOLUME: f32 = 0.3;

pub struct RodioBackend {
    // Dropping the stream stops all output.
    _stream: OutputStream,
    handle: OutputStreamHandle,
    music: Option<Sink>,
}

impl RodioBackend {
    pub fn new() -> Result<Self> {
        let (stream, handle) =
            OutputStream::try_default().context("Failed to open default audio output")?;
        Ok(Self {
            _stream: stream,
            handle,
            music: None,
        })
    }
}

impl AudioBackend for RodioBackend {
    fn play(&mut self, path: &Path) -> Result<()> {
        let file = File::open(path).with_context(|| format!("Failed to open {:?}", path))?;
        let source = Decoder::new(BufReader::new(file))
            .with_context(|| format!("Failed to decode {:?}", path))?;
        self.handle
            .play_raw(source.amplify(SFX_VOLUME).convert_samples())
            .context("Failed to play sound")?;
        Ok(())
    }

    fn start_music(&mut self, path: &Path) -> Result<()> {
        let file = File::open(path).with_context(|| format!("Failed to open {:?}", path))?;
        let source = Decoder::new_looped(BufReader::new(file))
            .with_context(|| format!("Failed to decode {:?}", path))?;
        let sink = Sink::try_new(&self.handle).context("Failed to create music sink")?;
        sink.set_volume(MUSIC_VOLUME);
        sink.append(source);
        self.music = Some(sink);
        Ok(())
    }

    fn set_music_paused(&mut self, paused: bool) {
        if let Some(sink) = &self.music {
            if paused {
                sink.pause();
            } else {
                sink.play();
            }
        }
    }
}

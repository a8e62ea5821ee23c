use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

use rodio::source::{Amplify, Buffered, SineWave, Source, TakeDuration};
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};
use thiserror::Error;
use tracing::warn;

/// Short interface sounds. Synthesized, so no sound files need to ship.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cue {
    KeyPress,
    Error,
    Success,
}

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("no audio output device: {0}")]
    Device(#[from] rodio::StreamError),
    #[error("cannot open clip {path}: {source}")]
    ClipIo {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot decode clip {path}: {source}")]
    ClipDecode {
        path: String,
        #[source]
        source: rodio::decoder::DecoderError,
    },
    #[error("playback failed: {0}")]
    Play(#[from] rodio::PlayError),
}

/// A word clip decoded up front, so replays come from memory and a broken
/// file is caught while the word loads rather than mid-drill.
pub type LoadedClip = Buffered<Decoder<BufReader<File>>>;

pub struct Player {
    // The stream must outlive every sink; dropping it silences the app.
    _stream: OutputStream,
    handle: OutputStreamHandle,
    current: Option<Sink>,
}

impl Player {
    /// Fails when the host has no usable output device. The caller is
    /// expected to keep running without sound.
    pub fn new() -> Result<Self, AudioError> {
        let (stream, handle) = OutputStream::try_default()?;
        Ok(Self {
            _stream: stream,
            handle,
            current: None,
        })
    }

    pub fn load_clip(&self, path: &Path) -> Result<LoadedClip, AudioError> {
        let file = File::open(path).map_err(|source| AudioError::ClipIo {
            path: path.display().to_string(),
            source,
        })?;
        let decoder = Decoder::new(BufReader::new(file)).map_err(|source| AudioError::ClipDecode {
            path: path.display().to_string(),
            source,
        })?;
        Ok(decoder.buffered())
    }

    /// Play the word clip from the start, cutting off a replay in flight.
    pub fn play_clip(&mut self, clip: &LoadedClip) -> Result<(), AudioError> {
        if let Some(prev) = self.current.take() {
            prev.stop();
        }
        let sink = Sink::try_new(&self.handle)?;
        sink.append(clip.clone());
        self.current = Some(sink);
        Ok(())
    }

    /// Cues are fire-and-forget; a failed sink is logged and dropped.
    pub fn play_cue(&self, cue: Cue) {
        let sink = match Sink::try_new(&self.handle) {
            Ok(sink) => sink,
            Err(err) => {
                warn!("cue playback failed: {err}");
                return;
            }
        };

        match cue {
            Cue::KeyPress => {
                sink.append(tone(1318.5, 40, 0.10));
            }
            Cue::Error => {
                sink.append(tone(196.0, 140, 0.18));
                sink.append(tone(146.8, 180, 0.18));
            }
            Cue::Success => {
                // Ascending major arpeggio, C5 E5 G5
                sink.append(tone(523.25, 110, 0.16));
                sink.append(tone(659.25, 110, 0.16));
                sink.append(tone(783.99, 200, 0.16));
            }
        }
        sink.detach();
    }
}

fn tone(freq: f32, millis: u64, volume: f32) -> Amplify<TakeDuration<SineWave>> {
    let mut note = SineWave::new(freq).take_duration(Duration::from_millis(millis));
    note.set_filter_fadeout(true);
    note.amplify(volume)
}

use std::path::{Path, PathBuf};

use crate::error::{MediaError, Result};
use crate::media::MediaInfo;

/// Handle to a soundtrack that replaces a timeline's own audio
#[derive(Debug, Clone, PartialEq)]
pub struct AudioTrack {
    path: PathBuf,
    duration: f64,
    sample_rate: u32,
    channels: u32,
}

impl AudioTrack {
    pub fn new<P: Into<PathBuf>>(path: P, duration: f64, sample_rate: u32, channels: u32) -> Self {
        Self {
            path: path.into(),
            duration,
            sample_rate,
            channels,
        }
    }

    /// Build a track from probe results; fails if the file has no audio stream
    pub fn from_media_info(info: MediaInfo) -> Result<Self> {
        let audio = info.audio.ok_or_else(|| MediaError::LoadFailed {
            path: info.path.display().to_string(),
            reason: "no audio stream".to_string(),
        })?;
        Ok(Self::new(info.path, info.duration, audio.sample_rate, audio.channels))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Duration in seconds
    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn channels(&self) -> u32 {
        self.channels
    }
}

use std::path::Path;

use tracing::{debug, info};

use crate::audio::{AudioLoader, AudioTrack};
use crate::error::{ClipStitchError, Result};
use crate::media::MediaProbe;
use crate::video::{TargetSize, VideoClip};

/// Which sound ends up in the output
#[derive(Debug, PartialEq)]
pub enum TimelineAudio {
    /// Whatever audio the clips carry; silent gaps for clips without any
    Original,
    /// A soundtrack replacing the clips' audio
    Replaced(AudioTrack),
}

/// Clips played back-to-back, all at one size
#[derive(Debug)]
pub struct Timeline {
    clips: Vec<VideoClip>,
    size: TargetSize,
    fps: f64,
    duration: f64,
    audio: TimelineAudio,
}

impl Timeline {
    pub fn clips(&self) -> &[VideoClip] {
        &self.clips
    }

    pub fn size(&self) -> TargetSize {
        self.size
    }

    /// Output frame rate, taken from the first clip
    pub fn fps(&self) -> f64 {
        self.fps
    }

    /// Total duration in seconds
    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn audio(&self) -> &TimelineAudio {
        &self.audio
    }

    /// The replacement soundtrack, if one is attached
    pub fn soundtrack(&self) -> Option<&AudioTrack> {
        match &self.audio {
            TimelineAudio::Replaced(track) => Some(track),
            TimelineAudio::Original => None,
        }
    }

    /// Whether the output will carry an audio stream
    pub fn has_audio(&self) -> bool {
        match self.audio {
            TimelineAudio::Replaced(_) => true,
            TimelineAudio::Original => self.clips.iter().any(|c| c.has_audio()),
        }
    }

    /// Swap the timeline's audio for `track`
    pub fn set_audio(mut self, track: AudioTrack) -> Self {
        self.audio = TimelineAudio::Replaced(track);
        self
    }
}

/// Join clips into one timeline in the given order, with no transitions.
///
/// Every clip must already be at the first clip's size.
pub fn concatenate(clips: Vec<VideoClip>) -> Result<Timeline> {
    let first = clips
        .first()
        .ok_or_else(|| ClipStitchError::invalid_input("no video clips to concatenate"))?;
    let size = first.size();
    let fps = first.fps();

    if let Some(odd) = clips.iter().find(|c| c.size() != size) {
        return Err(ClipStitchError::invalid_input(format!(
            "clip {} is {} but the timeline is {}",
            odd.display_name(),
            odd.size(),
            size
        )));
    }

    let duration = clips.iter().map(|c| c.duration()).sum();
    debug!("Concatenated {} clips: {:.2}s at {}", clips.len(), duration, size);

    Ok(Timeline {
        clips,
        size,
        fps,
        duration,
        audio: TimelineAudio::Original,
    })
}

/// Replace the timeline's audio with the file at `audio_path`, if given
pub async fn attach_audio<M: MediaProbe>(
    timeline: Timeline,
    audio_path: Option<&Path>,
    probe: &M,
) -> Result<Timeline> {
    let Some(audio_path) = audio_path else {
        return Ok(timeline);
    };

    let track = AudioLoader::load(probe, audio_path).await?;
    info!(
        "Attaching audio {:?} ({:.2}s) to {:.2}s timeline",
        audio_path,
        track.duration(),
        timeline.duration()
    );
    Ok(timeline.set_audio(track))
}

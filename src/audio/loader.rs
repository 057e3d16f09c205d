use std::path::Path;

use tracing::debug;

use crate::audio::types::AudioTrack;
use crate::error::Result;
use crate::media::MediaProbe;

/// Opens soundtrack files as [`AudioTrack`] handles
pub struct AudioLoader;

impl AudioLoader {
    /// Probe `path` and return a track handle for its first audio stream
    pub async fn load<M: MediaProbe, P: AsRef<Path>>(probe: &M, path: P) -> Result<AudioTrack> {
        let path = path.as_ref();
        let info = probe.probe(path).await?;
        let track = AudioTrack::from_media_info(info)?;

        debug!(
            "Loaded audio {:?}: {:.2}s, {} Hz, {} channels",
            path,
            track.duration(),
            track.sample_rate(),
            track.channels()
        );
        Ok(track)
    }
}

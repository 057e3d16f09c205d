use std::path::Path;

use tracing::debug;

use crate::error::Result;
use crate::media::MediaProbe;
use crate::video::types::VideoClip;

/// Opens source files as [`VideoClip`] handles
pub struct VideoLoader;

impl VideoLoader {
    /// Probe `path` and return a clip handle for it.
    ///
    /// Missing, unreadable, or undecodable files fail with
    /// [`MediaError::LoadFailed`](crate::error::MediaError::LoadFailed).
    pub async fn load<M: MediaProbe, P: AsRef<Path>>(probe: &M, path: P) -> Result<VideoClip> {
        let path = path.as_ref();
        let info = probe.probe(path).await?;
        let clip = VideoClip::from_media_info(info)?;

        debug!(
            "Loaded clip {}: {}, {:.2}s at {:.2} fps{}",
            clip.display_name(),
            clip.size(),
            clip.duration(),
            clip.fps(),
            if clip.has_audio() { ", with audio" } else { "" }
        );
        Ok(clip)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ClipStitchError, MediaError};
    use crate::media::testing::StaticProbe;
    use crate::video::TargetSize;

    #[tokio::test]
    async fn test_load_known_clip() {
        let probe = StaticProbe::new().with_video("in/a.mp4", 640, 480, 2.0, true);
        let clip = VideoLoader::load(&probe, "in/a.mp4").await.unwrap();
        assert_eq!(clip.size(), TargetSize::new(640, 480));
        assert_eq!(clip.duration(), 2.0);
    }

    #[tokio::test]
    async fn test_load_missing_clip() {
        let probe = StaticProbe::new();
        let err = VideoLoader::load(&probe, "in/missing.mp4").await.unwrap_err();
        assert!(matches!(err, ClipStitchError::Media(MediaError::LoadFailed { .. })));
    }

    #[tokio::test]
    async fn test_load_audio_only_file_fails() {
        let probe = StaticProbe::new().with_audio("in/voice.mp4", 4.0);
        assert!(VideoLoader::load(&probe, "in/voice.mp4").await.is_err());
    }
}

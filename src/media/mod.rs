//! # Media Probing Module
//!
//! Thin layer over the external FFmpeg toolchain. Everything that touches a
//! media file's contents goes through here: [`MediaProbe`] reads stream
//! metadata, and [`process`] runs `ffprobe`/`ffmpeg` as child processes.

pub mod probe;
pub mod process;

pub use probe::{AudioStreamInfo, FfprobeProbe, MediaInfo, MediaProbe, VideoStreamInfo};
pub use process::tool_available;

#[cfg(test)]
pub(crate) mod testing {
    use std::collections::HashMap;
    use std::path::{Path, PathBuf};

    use super::{AudioStreamInfo, MediaInfo, MediaProbe, VideoStreamInfo};
    use crate::error::{MediaError, Result};

    /// In-memory probe answering from a fixed table of files
    #[derive(Default)]
    pub struct StaticProbe {
        entries: HashMap<PathBuf, MediaInfo>,
    }

    impl StaticProbe {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_video(mut self, path: &str, width: u32, height: u32, duration: f64, with_audio: bool) -> Self {
            let audio = with_audio.then_some(AudioStreamInfo { sample_rate: 44100, channels: 2 });
            self.entries.insert(PathBuf::from(path), MediaInfo {
                path: PathBuf::from(path),
                duration,
                video: Some(VideoStreamInfo { width, height, fps: 30.0 }),
                audio,
            });
            self
        }

        pub fn with_audio(mut self, path: &str, duration: f64) -> Self {
            self.entries.insert(PathBuf::from(path), MediaInfo {
                path: PathBuf::from(path),
                duration,
                video: None,
                audio: Some(AudioStreamInfo { sample_rate: 48000, channels: 2 }),
            });
            self
        }
    }

    impl MediaProbe for StaticProbe {
        async fn probe(&self, path: &Path) -> Result<MediaInfo> {
            self.entries.get(path).cloned().ok_or_else(|| {
                MediaError::LoadFailed {
                    path: path.display().to_string(),
                    reason: "No such file or directory".to_string(),
                }
                .into()
            })
        }
    }
}

use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{MediaError, Result};
use crate::media::MediaInfo;

/// Pixel dimensions every clip of a run is forced to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TargetSize {
    pub width: u32,
    pub height: u32,
}

impl TargetSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl fmt::Display for TargetSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// A transform recorded on a clip, replayed by the encoder
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClipTransform {
    /// Playback speed multiplier (<1 slows down)
    Speed(f64),
    /// Plain resize to exact dimensions
    Scale(TargetSize),
}

/// Handle to one source video and the transforms applied to it.
///
/// Frames are not decoded here; the encoder replays [`ClipTransform`]s as
/// filters. Transforms take the clip by value and hand back the new one,
/// so a clip is only ever owned by the pipeline step working on it.
#[derive(Debug, PartialEq)]
pub struct VideoClip {
    path: PathBuf,
    native_size: TargetSize,
    size: TargetSize,
    source_duration: f64,
    duration: f64,
    fps: f64,
    has_audio: bool,
    transforms: Vec<ClipTransform>,
}

impl VideoClip {
    /// Create a clip handle from known stream properties
    pub fn new<P: Into<PathBuf>>(
        path: P,
        size: TargetSize,
        duration: f64,
        fps: f64,
        has_audio: bool,
    ) -> Self {
        Self {
            path: path.into(),
            native_size: size,
            size,
            source_duration: duration,
            duration,
            fps,
            has_audio,
            transforms: Vec::new(),
        }
    }

    /// Build a clip from probe results; fails if the file has no video stream
    pub fn from_media_info(info: MediaInfo) -> Result<Self> {
        let video = info.video.ok_or_else(|| MediaError::LoadFailed {
            path: info.path.display().to_string(),
            reason: "no video stream".to_string(),
        })?;

        Ok(Self::new(
            info.path,
            TargetSize::new(video.width, video.height),
            info.duration,
            video.fps,
            info.audio.is_some(),
        ))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current output dimensions
    pub fn size(&self) -> TargetSize {
        self.size
    }

    /// Dimensions of the source file
    pub fn native_size(&self) -> TargetSize {
        self.native_size
    }

    /// Playback duration in seconds after transforms
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Duration of the source file in seconds
    pub fn source_duration(&self) -> f64 {
        self.source_duration
    }

    pub fn fps(&self) -> f64 {
        self.fps
    }

    pub fn has_audio(&self) -> bool {
        self.has_audio
    }

    pub fn transforms(&self) -> &[ClipTransform] {
        &self.transforms
    }

    /// Combined speed multiplier of all recorded speed transforms
    pub fn speed_factor(&self) -> f64 {
        self.transforms
            .iter()
            .filter_map(|t| match t {
                ClipTransform::Speed(f) => Some(*f),
                ClipTransform::Scale(_) => None,
            })
            .product()
    }

    /// Whether a resize was recorded
    pub fn is_scaled(&self) -> bool {
        self.transforms
            .iter()
            .any(|t| matches!(t, ClipTransform::Scale(_)))
    }

    pub(crate) fn push_speed(mut self, factor: f64) -> Self {
        self.duration /= factor;
        self.transforms.push(ClipTransform::Speed(factor));
        self
    }

    pub(crate) fn push_scale(mut self, size: TargetSize) -> Self {
        self.size = size;
        self.transforms.push(ClipTransform::Scale(size));
        self
    }

    /// File name for log messages
    pub fn display_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

//! # Video Processing Module
//!
//! Discovery of input files, clip loading, and the per-clip transforms
//! (slow motion and scaling) plus the encoder that renders the result.

pub mod discovery;
pub mod encoder;
pub mod loader;
pub mod transform;
pub mod types;

pub use discovery::{get_video_files, is_supported, SUPPORTED_EXTENSIONS};
pub use encoder::{EncodedVideo, VideoEncoder};
pub use loader::VideoLoader;
pub use transform::{apply_slow_motion, atempo_chain, scale_video};
pub use types::{ClipTransform, TargetSize, VideoClip};

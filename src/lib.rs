//! # clipstitch
//!
//! Concatenate a folder of video clips into one MP4, optionally in slow
//! motion and optionally over a single soundtrack.
//!
//! Decoding, scaling, retiming and encoding are done by the FFmpeg command
//! line tools; this crate decides what to ask them for.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::path::PathBuf;
//! use clipstitch::{ConcatenationEngine, Config, InputSource};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> clipstitch::Result<()> {
//! let config = Config {
//!     input_source: InputSource::Directory(PathBuf::from("clips")),
//!     slow_motion_factor: Some(0.7),
//!     audio_path: Some(PathBuf::from("music/track.mp3")),
//!     ..Config::default()
//! };
//!
//! let encoded = ConcatenationEngine::new(config).run().await?;
//! println!("wrote {:?}", encoded.path);
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - [`video`] - File discovery, clip loading, slow motion and scale transforms, encoding
//! - [`audio`] - Soundtrack loading
//! - [`composition`] - Concatenation, audio attachment, output naming, the pipeline engine
//! - [`media`] - `ffprobe`/`ffmpeg` process plumbing
//! - [`config`] - Configuration management

pub mod audio;
pub mod composition;
pub mod config;
pub mod error;
pub mod media;
pub mod video;

// Re-export commonly used types for convenience
pub use crate::{
    composition::{ConcatenationEngine, Timeline},
    config::{Config, EncodingConfig, InputSource},
    error::{ClipStitchError, Result},
    video::{EncodedVideo, TargetSize, VideoClip},
};

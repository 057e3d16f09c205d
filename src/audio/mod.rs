//! # Audio Module
//!
//! Soundtrack handling: loading an external audio file as an [`AudioTrack`]
//! that the audio attacher swaps in for the timeline's own sound.

pub mod loader;
pub mod types;

pub use loader::AudioLoader;
pub use types::AudioTrack;

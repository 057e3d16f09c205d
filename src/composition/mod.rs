//! # Composition
//!
//! The concatenation pipeline: joining clips into a [`Timeline`], attaching
//! a soundtrack, naming the output, and the [`ConcatenationEngine`] that
//! runs those steps in order.

pub mod engine;
pub mod output;
pub mod timeline;

// Re-exports for convenience
pub use engine::ConcatenationEngine;
pub use output::{generate_output_path, DEFAULT_PREFIX};
pub use timeline::{attach_audio, concatenate, Timeline, TimelineAudio};

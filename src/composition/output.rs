use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

/// Prefix used when none is configured
pub const DEFAULT_PREFIX: &str = "final_video";

/// Output file `<base_dir>/<prefix>_<YYYYMMDD_HHMMSS>.mp4` for the current local time.
///
/// Unique only at one-second granularity: two calls within the same second
/// return the same path.
pub fn generate_output_path<P: AsRef<Path>>(base_dir: P, prefix: &str) -> PathBuf {
    output_path_at(base_dir, prefix, Local::now())
}

/// Output file name for a given instant
pub fn output_path_at<P: AsRef<Path>>(base_dir: P, prefix: &str, at: DateTime<Local>) -> PathBuf {
    let filename = format!("{}_{}.mp4", prefix, at.format("%Y%m%d_%H%M%S"));
    base_dir.as_ref().join(filename)
}

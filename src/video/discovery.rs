use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

/// Extensions accepted as video input, compared case-insensitively
pub const SUPPORTED_EXTENSIONS: [&str; 5] = ["mp4", "avi", "mov", "mkv", "flv"];

/// Check if a path has a supported video extension
pub fn is_supported<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref()
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_lowercase();
            SUPPORTED_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

/// List the video files directly inside `directory`.
///
/// Subdirectories are not descended into. Entries come back in
/// `read_dir` order, which the platform does not specify, unless `sort` is
/// set. A missing or unreadable directory is logged and yields an empty
/// list; the caller decides whether that is fatal.
pub fn get_video_files<P: AsRef<Path>>(directory: P, sort: bool) -> Vec<PathBuf> {
    let directory = directory.as_ref();

    let entries = match std::fs::read_dir(directory) {
        Ok(entries) => entries,
        Err(e) => {
            warn!("Cannot read input directory {:?}: {}", directory, e);
            return Vec::new();
        }
    };

    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry.path()),
            Err(e) => {
                debug!("Skipping unreadable entry in {:?}: {}", directory, e);
                None
            }
        })
        .filter(|path| path.is_file() && is_supported(path))
        .collect();

    if sort {
        files.sort();
    }

    info!("Found {} video files in {:?}", files.len(), directory);
    files
}

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::error::{MediaError, Result};
use crate::media::process::{run_tool, stderr_tail};

/// Stream metadata for one media file
#[derive(Debug, Clone, PartialEq)]
pub struct MediaInfo {
    pub path: PathBuf,
    /// Duration in seconds
    pub duration: f64,
    pub video: Option<VideoStreamInfo>,
    pub audio: Option<AudioStreamInfo>,
}

/// First video stream of a file
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VideoStreamInfo {
    pub width: u32,
    pub height: u32,
    pub fps: f64,
}

/// First audio stream of a file
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AudioStreamInfo {
    pub sample_rate: u32,
    pub channels: u32,
}

/// Reads stream metadata from a media file without decoding it
#[allow(async_fn_in_trait)]
pub trait MediaProbe {
    async fn probe(&self, path: &Path) -> Result<MediaInfo>;
}

/// [`MediaProbe`] backed by the `ffprobe` binary
#[derive(Debug, Clone)]
pub struct FfprobeProbe {
    program: PathBuf,
}

impl FfprobeProbe {
    pub fn new<P: Into<PathBuf>>(program: P) -> Self {
        Self { program: program.into() }
    }
}

impl Default for FfprobeProbe {
    fn default() -> Self {
        Self::new("ffprobe")
    }
}

impl MediaProbe for FfprobeProbe {
    async fn probe(&self, path: &Path) -> Result<MediaInfo> {
        let load_failed = |reason: String| MediaError::LoadFailed {
            path: path.display().to_string(),
            reason,
        };

        if !path.is_file() {
            return Err(load_failed("No such file".to_string()).into());
        }

        let output = run_tool(
            &self.program,
            [
                OsStr::new("-v"),
                OsStr::new("error"),
                OsStr::new("-print_format"),
                OsStr::new("json"),
                OsStr::new("-show_format"),
                OsStr::new("-show_streams"),
                path.as_os_str(),
            ],
        )
        .await
        .map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => MediaError::ToolNotFound {
                tool: self.program.display().to_string(),
            },
            _ => load_failed(format!("could not run ffprobe: {}", e)),
        })?;

        if !output.status.success() {
            return Err(load_failed(stderr_tail(&output)).into());
        }

        let json = String::from_utf8_lossy(&output.stdout);
        let info = parse_probe_output(path, &json)?;
        debug!(
            "Probed {:?}: {:.2}s, video {:?}, audio {:?}",
            path, info.duration, info.video, info.audio
        );
        Ok(info)
    }
}

#[derive(Debug, Deserialize)]
struct ProbeOutput {
    #[serde(default)]
    streams: Vec<ProbeStream>,
    format: Option<ProbeFormat>,
}

#[derive(Debug, Deserialize)]
struct ProbeStream {
    codec_type: Option<String>,
    width: Option<u32>,
    height: Option<u32>,
    avg_frame_rate: Option<String>,
    r_frame_rate: Option<String>,
    duration: Option<String>,
    sample_rate: Option<String>,
    channels: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct ProbeFormat {
    duration: Option<String>,
}

/// Parse `ffprobe -print_format json -show_format -show_streams` output
pub(crate) fn parse_probe_output(path: &Path, json: &str) -> Result<MediaInfo> {
    let load_failed = |reason: &str| MediaError::LoadFailed {
        path: path.display().to_string(),
        reason: reason.to_string(),
    };

    let parsed: ProbeOutput = serde_json::from_str(json)
        .map_err(|e| load_failed(&format!("unreadable ffprobe output: {}", e)))?;

    let video_stream = parsed
        .streams
        .iter()
        .find(|s| s.codec_type.as_deref() == Some("video"));
    let audio_stream = parsed
        .streams
        .iter()
        .find(|s| s.codec_type.as_deref() == Some("audio"));

    let video = match video_stream {
        Some(stream) => {
            let (width, height) = match (stream.width, stream.height) {
                (Some(w), Some(h)) if w > 0 && h > 0 => (w, h),
                _ => return Err(load_failed("video stream has no dimensions").into()),
            };
            let fps = stream
                .avg_frame_rate
                .as_deref()
                .and_then(parse_rate)
                .or_else(|| stream.r_frame_rate.as_deref().and_then(parse_rate))
                .ok_or_else(|| load_failed("video stream has no frame rate"))?;
            Some(VideoStreamInfo { width, height, fps })
        }
        None => None,
    };

    let audio = audio_stream.map(|stream| AudioStreamInfo {
        sample_rate: stream
            .sample_rate
            .as_deref()
            .and_then(|s| s.parse().ok())
            .unwrap_or(48000),
        channels: stream.channels.unwrap_or(2),
    });

    if video.is_none() && audio.is_none() {
        return Err(load_failed("no audio or video stream").into());
    }

    let duration = parsed
        .format
        .as_ref()
        .and_then(|f| f.duration.as_deref())
        .and_then(parse_seconds)
        .or_else(|| video_stream.and_then(|s| s.duration.as_deref()).and_then(parse_seconds))
        .or_else(|| audio_stream.and_then(|s| s.duration.as_deref()).and_then(parse_seconds))
        .ok_or_else(|| load_failed("unknown duration"))?;

    Ok(MediaInfo {
        path: path.to_path_buf(),
        duration,
        video,
        audio,
    })
}

/// Parse an ffprobe rational such as `30000/1001`; `0/0` means unknown
fn parse_rate(rate: &str) -> Option<f64> {
    let value = match rate.split_once('/') {
        Some((num, den)) => {
            let num: f64 = num.trim().parse().ok()?;
            let den: f64 = den.trim().parse().ok()?;
            if den == 0.0 {
                return None;
            }
            num / den
        }
        None => rate.trim().parse().ok()?,
    };
    (value.is_finite() && value > 0.0).then_some(value)
}

fn parse_seconds(value: &str) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|d| d.is_finite() && *d > 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CLIP_JSON: &str = r#"{
        "streams": [
            {
                "index": 0,
                "codec_name": "h264",
                "codec_type": "video",
                "width": 1280,
                "height": 720,
                "r_frame_rate": "30000/1001",
                "avg_frame_rate": "30000/1001",
                "duration": "3.003000"
            },
            {
                "index": 1,
                "codec_name": "aac",
                "codec_type": "audio",
                "sample_rate": "44100",
                "channels": 2,
                "duration": "2.995000"
            }
        ],
        "format": {
            "filename": "b.mov",
            "duration": "3.003000"
        }
    }"#;

    #[test]
    fn test_parse_video_with_audio() {
        let info = parse_probe_output(Path::new("b.mov"), CLIP_JSON).unwrap();
        let video = info.video.unwrap();
        assert_eq!((video.width, video.height), (1280, 720));
        assert!((video.fps - 29.97).abs() < 0.01);
        assert!((info.duration - 3.003).abs() < 1e-9);
        assert_eq!(info.audio, Some(AudioStreamInfo { sample_rate: 44100, channels: 2 }));
    }

    #[test]
    fn test_parse_audio_only() {
        let json = r#"{"streams":[{"codec_type":"audio","sample_rate":"48000","channels":1}],
                       "format":{"duration":"12.5"}}"#;
        let info = parse_probe_output(Path::new("song.mp3"), json).unwrap();
        assert!(info.video.is_none());
        assert_eq!(info.audio.unwrap().channels, 1);
        assert_eq!(info.duration, 12.5);
    }

    #[test]
    fn test_duration_falls_back_to_stream() {
        let json = r#"{"streams":[{"codec_type":"video","width":640,"height":480,
                       "avg_frame_rate":"0/0","r_frame_rate":"25/1","duration":"2.0"}],
                       "format":{}}"#;
        let info = parse_probe_output(Path::new("a.mkv"), json).unwrap();
        assert_eq!(info.duration, 2.0);
        assert_eq!(info.video.unwrap().fps, 25.0);
    }

    #[test]
    fn test_rejects_streamless_file() {
        let json = r#"{"streams":[],"format":{"duration":"1.0"}}"#;
        let err = parse_probe_output(Path::new("empty.mp4"), json).unwrap_err();
        assert!(err.to_string().contains("no audio or video stream"));
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(parse_probe_output(Path::new("x.mp4"), "not json").is_err());
    }

    #[test]
    fn test_parse_rate() {
        assert_eq!(parse_rate("25/1"), Some(25.0));
        assert_eq!(parse_rate("0/0"), None);
        assert_eq!(parse_rate("24"), Some(24.0));
        assert_eq!(parse_rate("abc"), None);
    }

    #[tokio::test]
    async fn test_probe_missing_file_fails_before_spawning() {
        let probe = FfprobeProbe::new("clipstitch-no-such-tool");
        let err = probe.probe(Path::new("/no/such/clip.mp4")).await.unwrap_err();
        assert!(matches!(err, crate::error::ClipStitchError::Media(MediaError::LoadFailed { .. })));
    }
}

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::composition::timeline::{Timeline, TimelineAudio};
use crate::config::EncodingConfig;
use crate::error::{EncodeError, Result};
use crate::media::process::{run_tool, stderr_tail};
use crate::video::transform::atempo_chain;
use crate::video::types::{ClipTransform, TargetSize, VideoClip};

/// Sample rate every audio segment is resampled to before concatenation
const AUDIO_SAMPLE_RATE: u32 = 48000;
const AUDIO_FORMAT: &str = "aformat=sample_fmts=fltp:channel_layouts=stereo";

/// Represents an encoded video output
#[derive(Debug, Clone)]
pub struct EncodedVideo {
    pub path: PathBuf,
    pub duration: f64,
    pub size: TargetSize,
    pub has_audio: bool,
    pub file_size: u64,
}

/// Renders a [`Timeline`] to an MP4 file with a single ffmpeg run
pub struct VideoEncoder {
    config: EncodingConfig,
}

impl VideoEncoder {
    pub fn new(config: EncodingConfig) -> Self {
        Self { config }
    }

    /// Encode `timeline` into `output_path`. The parent directory must exist.
    pub async fn write<P: AsRef<Path>>(&self, timeline: &Timeline, output_path: P) -> Result<EncodedVideo> {
        let output_path = output_path.as_ref();
        info!(
            "Encoding {} clips ({:.2}s, {}) with {} to {:?}",
            timeline.clips().len(),
            timeline.duration(),
            timeline.size(),
            self.config.video_codec,
            output_path
        );

        let args = self.build_args(timeline, output_path);
        let output = run_tool(&self.config.ffmpeg, &args)
            .await
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => EncodeError::ToolNotFound {
                    tool: self.config.ffmpeg.display().to_string(),
                },
                _ => EncodeError::EncodingFailed {
                    reason: format!("FFmpeg execution failed: {}", e),
                },
            })?;

        if !output.status.success() {
            return Err(EncodeError::EncodingFailed {
                reason: format!("FFmpeg failed ({}): {}", output.status, stderr_tail(&output)),
            }.into());
        }

        let metadata = tokio::fs::metadata(output_path).await?;
        info!("Wrote {:?} ({} KiB)", output_path, metadata.len() / 1024);

        Ok(EncodedVideo {
            path: output_path.to_path_buf(),
            duration: timeline.duration(),
            size: timeline.size(),
            has_audio: timeline.has_audio(),
            file_size: metadata.len(),
        })
    }

    /// Full ffmpeg argument list for encoding `timeline` into `output_path`
    pub fn build_args(&self, timeline: &Timeline, output_path: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = ["-hide_banner", "-nostdin", "-loglevel", "error", "-y"]
            .into_iter()
            .map(OsString::from)
            .collect();

        for clip in timeline.clips() {
            args.push("-i".into());
            args.push(clip.path().into());
        }
        if let Some(track) = timeline.soundtrack() {
            args.push("-i".into());
            args.push(track.path().into());
        }

        args.push("-filter_complex".into());
        args.push(self.filter_graph(timeline).into());

        args.push("-map".into());
        args.push("[vout]".into());
        match timeline.audio() {
            TimelineAudio::Replaced(_) => {
                args.push("-map".into());
                args.push(format!("{}:a:0", timeline.clips().len()).into());
            }
            TimelineAudio::Original if timeline.has_audio() => {
                args.push("-map".into());
                args.push("[aout]".into());
            }
            TimelineAudio::Original => {}
        }

        let video_opts = [
            ("-c:v", self.config.video_codec.clone()),
            ("-preset", self.config.preset.clone()),
            ("-crf", self.config.crf.to_string()),
            ("-pix_fmt", self.config.pixel_format.clone()),
        ];
        for (flag, value) in video_opts {
            args.push(flag.into());
            args.push(value.into());
        }

        if timeline.has_audio() {
            args.push("-c:a".into());
            args.push(self.config.audio_codec.clone().into());
        }
        if timeline.soundtrack().is_some() {
            // Soundtrack is cut at the end of the picture, never the reverse.
            args.push("-t".into());
            args.push(format!("{:.3}", timeline.duration()).into());
        }

        args.push("-movflags".into());
        args.push("+faststart".into());
        args.push(output_path.into());
        args
    }

    /// The `-filter_complex` graph: per-clip chains feeding one concat
    pub fn filter_graph(&self, timeline: &Timeline) -> String {
        let keep_original_audio =
            matches!(timeline.audio(), TimelineAudio::Original) && timeline.has_audio();

        let mut chains = Vec::with_capacity(timeline.clips().len() * 2 + 1);
        let mut concat_inputs = String::new();

        for (i, clip) in timeline.clips().iter().enumerate() {
            chains.push(self.video_chain(i, clip, timeline.fps()));
            concat_inputs.push_str(&format!("[v{}]", i));

            if keep_original_audio {
                chains.push(audio_chain(i, clip));
                concat_inputs.push_str(&format!("[a{}]", i));
            }
        }

        let audio_streams = usize::from(keep_original_audio);
        let outputs = if keep_original_audio { "[vout][aout]" } else { "[vout]" };
        chains.push(format!(
            "{}concat=n={}:v=1:a={}{}",
            concat_inputs,
            timeline.clips().len(),
            audio_streams,
            outputs
        ));

        let graph = chains.join(";");
        debug!("Filter graph: {}", graph);
        graph
    }

    fn video_chain(&self, index: usize, clip: &VideoClip, fps: f64) -> String {
        let mut filters = vec!["setpts=PTS-STARTPTS".to_string()];
        for transform in clip.transforms() {
            match transform {
                ClipTransform::Speed(factor) => filters.push(format!("setpts=PTS/{}", factor)),
                ClipTransform::Scale(size) => filters.push(format!("scale={}:{}", size.width, size.height)),
            }
        }
        filters.push("setsar=1".to_string());
        filters.push(format!("fps={}", fps));
        filters.push(format!("format={}", self.config.pixel_format));

        format!("[{}:v:0]{}[v{}]", index, filters.join(","), index)
    }

    /// Render the command line for display
    pub fn command_line(&self, timeline: &Timeline, output_path: &Path) -> String {
        let mut parts = vec![self.config.ffmpeg.display().to_string()];
        parts.extend(
            self.build_args(timeline, output_path)
                .iter()
                .map(|a| shell_quote(&a.to_string_lossy())),
        );
        parts.join(" ")
    }
}

/// Audio for one segment: the clip's own sound at its new tempo, or silence
fn audio_chain(index: usize, clip: &VideoClip) -> String {
    if !clip.has_audio() {
        return format!(
            "anullsrc=r={}:cl=stereo,atrim=duration={},asetpts=PTS-STARTPTS,{}[a{}]",
            AUDIO_SAMPLE_RATE,
            clip.duration(),
            AUDIO_FORMAT,
            index
        );
    }

    let mut filters = vec!["asetpts=PTS-STARTPTS".to_string()];
    let factor = clip.speed_factor();
    if factor != 1.0 {
        filters.extend(atempo_chain(factor).into_iter().map(|s| format!("atempo={}", s)));
    }
    filters.push(format!("aresample={}", AUDIO_SAMPLE_RATE));
    filters.push(AUDIO_FORMAT.to_string());

    format!("[{}:a:0]{}[a{}]", index, filters.join(","), index)
}

fn shell_quote(arg: &str) -> String {
    let plain = !arg.is_empty()
        && arg
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./:+=,@".contains(c));
    if plain {
        arg.to_string()
    } else {
        format!("'{}'", arg.replace('\'', r"'\''"))
    }
}

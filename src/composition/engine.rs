use std::path::PathBuf;
use tracing::{debug, info};

use crate::{
    composition::{
        output::generate_output_path,
        timeline::{attach_audio, concatenate, Timeline},
    },
    config::{Config, InputSource},
    error::{ClipStitchError, Result},
    media::{FfprobeProbe, MediaProbe},
    video::{apply_slow_motion, get_video_files, scale_video, EncodedVideo, VideoClip, VideoEncoder, VideoLoader},
};

/// Runs the concatenation pipeline for one configuration
///
/// The pipeline is strictly linear, each step finishing before the next:
/// 1. Input Resolution - Scan the input directory or take the explicit list
/// 2. Clip Loading - Probe each file, apply slow motion, scale to the first clip's size
/// 3. Concatenation - Join the clips back-to-back
/// 4. Audio - Optionally swap in a soundtrack
/// 5. Output - Encode to `<output_dir>/<prefix>_<timestamp>.mp4`
pub struct ConcatenationEngine<M = FfprobeProbe> {
    config: Config,
    probe: M,
}

impl ConcatenationEngine<FfprobeProbe> {
    /// Create an engine that probes files with the configured `ffprobe`
    pub fn new(config: Config) -> Self {
        let probe = FfprobeProbe::new(config.encoding.ffprobe.clone());
        Self { config, probe }
    }
}

impl<M: MediaProbe> ConcatenationEngine<M> {
    /// Create an engine with a custom media probe
    pub fn with_probe(config: Config, probe: M) -> Self {
        Self { config, probe }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run the whole pipeline and write the output file
    pub async fn run(&self) -> Result<EncodedVideo> {
        let video_paths = self.validated_inputs()?;

        info!("🎬 Concatenating {} videos", video_paths.len());
        let timeline = self.concatenate_videos(&video_paths).await?;

        tokio::fs::create_dir_all(&self.config.output_dir).await?;
        let output_path = generate_output_path(&self.config.output_dir, &self.config.output_prefix);

        let encoded = VideoEncoder::new(self.config.encoding.clone())
            .write(&timeline, &output_path)
            .await?;

        info!("🎉 Done: {:?} ({:.2}s, {})", encoded.path, encoded.duration, encoded.size);
        Ok(encoded)
    }

    /// Build the timeline and report the output path and ffmpeg command without encoding
    pub async fn plan(&self) -> Result<(Timeline, PathBuf, String)> {
        let video_paths = self.validated_inputs()?;
        let timeline = self.concatenate_videos(&video_paths).await?;
        let output_path = generate_output_path(&self.config.output_dir, &self.config.output_prefix);
        let command = VideoEncoder::new(self.config.encoding.clone()).command_line(&timeline, &output_path);
        Ok((timeline, output_path, command))
    }

    // ==========================================
    // PIPELINE STEP 1: INPUT RESOLUTION
    // ==========================================

    /// Validate the configuration and resolve a non-empty input list.
    ///
    /// Runs before any media or output I/O.
    fn validated_inputs(&self) -> Result<Vec<PathBuf>> {
        self.config.validate()?;

        let video_paths = self.resolve_inputs();
        if video_paths.is_empty() {
            return Err(ClipStitchError::invalid_input("no video paths provided"));
        }
        Ok(video_paths)
    }

    /// The input paths in processing order
    pub fn resolve_inputs(&self) -> Vec<PathBuf> {
        match &self.config.input_source {
            InputSource::Directory(dir) => {
                info!("📂 Step 1: Scanning {:?}", dir);
                get_video_files(dir, self.config.sort_inputs)
            }
            InputSource::Files(files) => {
                info!("📂 Step 1: Using {} listed files", files.len());
                files.clone()
            }
        }
    }

    // ==========================================
    // PIPELINE STEPS 2-4: LOAD, CONCATENATE, AUDIO
    // ==========================================

    /// Load, transform, and join `video_paths`, then attach the configured audio.
    ///
    /// The first clip fixes the target size; every later clip is resized to it.
    pub async fn concatenate_videos(&self, video_paths: &[PathBuf]) -> Result<Timeline> {
        let Some((first_path, rest)) = video_paths.split_first() else {
            return Err(ClipStitchError::invalid_input("no video paths provided"));
        };

        info!("📹 Step 2: Loading clips...");
        let factor = self.config.slow_motion_factor;

        let first = VideoLoader::load(&self.probe, first_path).await?;
        let target_size = first.size();
        debug!("Target size {} from {:?}", target_size, first_path);

        let mut clips = Vec::with_capacity(video_paths.len());
        clips.push(self.slow_down(first, factor));

        for path in rest {
            let clip = VideoLoader::load(&self.probe, path).await?;
            let clip = self.slow_down(clip, factor);
            clips.push(scale_video(clip, target_size));
        }

        info!("🔗 Step 3: Concatenating {} clips", clips.len());
        let timeline = concatenate(clips)?;
        info!("   Timeline: {:.2}s at {}", timeline.duration(), timeline.size());

        info!("🎵 Step 4: Audio");
        let audio_path = self.config.audio_path.as_deref();
        if audio_path.is_none() {
            info!("   Keeping original audio");
        }
        attach_audio(timeline, audio_path, &self.probe).await
    }

    fn slow_down(&self, clip: VideoClip, factor: Option<f64>) -> VideoClip {
        match factor {
            Some(f) => apply_slow_motion(clip, f),
            None => clip,
        }
    }
}

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use clipstitch::{
    composition::ConcatenationEngine,
    config::{Config, InputSource},
};

#[derive(Parser)]
#[command(
    name = "clipstitch",
    version,
    about = "Concatenate video clips into one timestamped MP4",
    long_about = "clipstitch joins every video in a directory (or an explicit list) back-to-back, resizing each clip to the first one's size, with optional slow motion and an optional replacement soundtrack."
)]
struct Cli {
    /// Video files to join, in order (instead of --input-dir)
    #[arg(conflicts_with = "input_dir")]
    files: Vec<PathBuf>,

    /// Directory to scan for .mp4/.avi/.mov/.mkv/.flv files
    #[arg(short, long)]
    input_dir: Option<PathBuf>,

    /// Directory the output file is written into
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output file name prefix
    #[arg(long)]
    prefix: Option<String>,

    /// Soundtrack replacing the clips' own audio
    #[arg(short, long)]
    audio: Option<PathBuf>,

    /// Playback speed factor for every clip (0.5 = half speed)
    #[arg(short, long)]
    slow_motion: Option<f64>,

    /// Sort scanned files by name
    #[arg(long)]
    sort: bool,

    /// Configuration file (optional)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the ffmpeg command instead of running it
    #[arg(long)]
    dry_run: bool,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    print_config: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    /// Layer command line flags over the loaded configuration
    fn apply_to(&self, config: &mut Config) {
        if let Some(dir) = &self.input_dir {
            config.input_source = InputSource::Directory(dir.clone());
        } else if !self.files.is_empty() {
            config.input_source = InputSource::Files(self.files.clone());
        }
        if let Some(dir) = &self.output_dir {
            config.output_dir = dir.clone();
        }
        if let Some(prefix) = &self.prefix {
            config.output_prefix = prefix.clone();
        }
        if let Some(audio) = &self.audio {
            config.audio_path = Some(audio.clone());
        }
        if let Some(factor) = self.slow_motion {
            config.slow_motion_factor = Some(factor);
        }
        if self.sort {
            config.sort_inputs = true;
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    // Load configuration
    let mut config = match &cli.config {
        Some(config_path) => {
            info!("Loading configuration from {:?}", config_path);
            Config::from_file(config_path)?
        }
        None => Config::default(),
    };
    cli.apply_to(&mut config);

    if cli.print_config {
        print!("{}", config.to_toml()?);
        return Ok(());
    }

    info!("Starting clipstitch v{}", env!("CARGO_PKG_VERSION"));
    let engine = ConcatenationEngine::new(config);
    info!("Input: {:?}", engine.config().input_source);
    info!("Output directory: {:?}", engine.config().output_dir);

    if cli.dry_run {
        let (timeline, output_path, command) = engine
            .plan()
            .await
            .map_err(|e| anyhow::anyhow!(e.user_message()))?;
        info!(
            "Would write {:?}: {} clips, {:.2}s at {}",
            output_path,
            timeline.clips().len(),
            timeline.duration(),
            timeline.size()
        );
        println!("{}", command);
        return Ok(());
    }

    let encoded = engine
        .run()
        .await
        .map_err(|e| {
            let message = e.user_message();
            anyhow::Error::new(e).context(message)
        })?;

    println!("{}", encoded.path.display());
    Ok(())
}

use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};

use crate::composition::DEFAULT_PREFIX;
use crate::error::{ConfigError, Result};

/// Main configuration for a concatenation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory the output file is written into (created if missing)
    pub output_dir: PathBuf,

    /// File name prefix; the output is `<prefix>_<YYYYMMDD_HHMMSS>.mp4`
    pub output_prefix: String,

    /// Soundtrack replacing the clips' own audio
    pub audio_path: Option<PathBuf>,

    /// Playback speed multiplier applied to every clip (<1 slows down)
    pub slow_motion_factor: Option<f64>,

    /// Sort discovered files by name instead of keeping directory order
    pub sort_inputs: bool,

    /// Where the input clips come from
    pub input_source: InputSource,

    /// Encoder settings
    pub encoding: EncodingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("output"),
            output_prefix: DEFAULT_PREFIX.to_string(),
            audio_path: None,
            slow_motion_factor: None,
            sort_inputs: false,
            input_source: InputSource::default(),
            encoding: EncodingConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|_| ConfigError::FileNotFound { path: path.display().to_string() })?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| ConfigError::ParseFailed {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;
        Ok(config)
    }

    /// Serialize the configuration as pretty TOML
    pub fn to_toml(&self) -> Result<String> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::InvalidValue {
                key: "config".to_string(),
                value: e.to_string()
            })?;
        Ok(content)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        std::fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if let Some(factor) = self.slow_motion_factor {
            if !factor.is_finite() || factor <= 0.0 {
                return Err(ConfigError::InvalidValue {
                    key: "slow_motion_factor".to_string(),
                    value: factor.to_string(),
                }.into());
            }
        }

        if self.output_prefix.is_empty()
            || self.output_prefix.contains(['/', '\\'])
        {
            return Err(ConfigError::InvalidValue {
                key: "output_prefix".to_string(),
                value: self.output_prefix.clone(),
            }.into());
        }

        self.encoding.validate()?;
        Ok(())
    }
}

/// Input clips: either every supported file in a directory, or a fixed list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputSource {
    Directory(PathBuf),
    Files(Vec<PathBuf>),
}

impl Default for InputSource {
    fn default() -> Self {
        Self::Directory(PathBuf::from("input_dir"))
    }
}

/// Encoder and external tool settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncodingConfig {
    /// ffmpeg binary name or path
    pub ffmpeg: PathBuf,

    /// ffprobe binary name or path
    pub ffprobe: PathBuf,

    /// Video codec passed to `-c:v`
    pub video_codec: String,

    /// Audio codec passed to `-c:a`
    pub audio_codec: String,

    /// x264 preset
    pub preset: String,

    /// Constant rate factor (0-51, lower is better)
    pub crf: u8,

    /// Output pixel format
    pub pixel_format: String,
}

impl Default for EncodingConfig {
    fn default() -> Self {
        Self {
            ffmpeg: PathBuf::from("ffmpeg"),
            ffprobe: PathBuf::from("ffprobe"),
            video_codec: "libx264".to_string(),
            audio_codec: "aac".to_string(),
            preset: "medium".to_string(),
            crf: 23,
            pixel_format: "yuv420p".to_string(),
        }
    }
}

impl EncodingConfig {
    fn validate(&self) -> Result<()> {
        if self.crf > 51 {
            return Err(ConfigError::InvalidValue {
                key: "encoding.crf".to_string(),
                value: self.crf.to_string()
            }.into());
        }

        for (key, value) in [
            ("encoding.video_codec", &self.video_codec),
            ("encoding.audio_codec", &self.audio_codec),
            ("encoding.pixel_format", &self.pixel_format),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    key: key.to_string(),
                    value: value.clone()
                }.into());
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.output_prefix, "final_video");
        assert_eq!(config.encoding.video_codec, "libx264");
    }

    #[test]
    fn test_config_roundtrip() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("clipstitch.toml");

        let mut original_config = Config::default();
        original_config.input_source = InputSource::Files(vec![
            PathBuf::from("clips/one.mp4"),
            PathBuf::from("clips/two.mov"),
        ]);
        original_config.audio_path = Some(PathBuf::from("music/track.mp3"));
        original_config.slow_motion_factor = Some(0.7);

        original_config.save_to_file(&file_path).unwrap();
        let loaded_config = Config::from_file(&file_path).unwrap();

        assert_eq!(original_config, loaded_config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("partial.toml");
        std::fs::write(
            &file_path,
            "slow_motion_factor = 0.5\n\n[input_source]\ndirectory = \"shots\"\n",
        )
        .unwrap();

        let config = Config::from_file(&file_path).unwrap();
        assert_eq!(config.slow_motion_factor, Some(0.5));
        assert_eq!(config.input_source, InputSource::Directory(PathBuf::from("shots")));
        assert_eq!(config.output_dir, PathBuf::from("output"));
        assert_eq!(config.encoding.crf, 23);
    }

    #[test]
    fn test_missing_file() {
        let err = Config::from_file("/definitely/not/here.toml").unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_invalid_slow_motion_factor() {
        let mut config = Config::default();
        for bad in [0.0, -0.5, f64::NAN, f64::INFINITY] {
            config.slow_motion_factor = Some(bad);
            assert!(config.validate().is_err(), "factor {} should be rejected", bad);
        }
        config.slow_motion_factor = Some(2.5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_prefix_and_crf() {
        let mut config = Config::default();
        config.output_prefix = "nested/name".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.encoding.crf = 60;
        assert!(config.validate().is_err());
    }
}

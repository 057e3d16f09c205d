use thiserror::Error;

/// Main error type for the clipstitch library
#[derive(Error, Debug)]
pub enum ClipStitchError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Media error: {0}")]
    Media(#[from] MediaError),

    #[error("Encoding error: {0}")]
    Encode(#[from] EncodeError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors, raised before any media work starts
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid input: {details}")]
    InvalidInput { details: String },

    #[error("Invalid configuration value: {key} = {value}")]
    InvalidValue { key: String, value: String },

    #[error("Failed to parse configuration file: {path} ({reason})")]
    ParseFailed { path: String, reason: String },

    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },
}

/// Errors raised while probing or loading a source file
#[derive(Error, Debug)]
pub enum MediaError {
    #[error("Failed to load media file: {path} ({reason})")]
    LoadFailed { path: String, reason: String },

    #[error("Required tool not found: {tool}")]
    ToolNotFound { tool: String },
}

/// Errors raised while encoding and writing the output file
#[derive(Error, Debug)]
pub enum EncodeError {
    #[error("Video encoding failed: {reason}")]
    EncodingFailed { reason: String },

    #[error("Required tool not found: {tool}")]
    ToolNotFound { tool: String },
}

/// Convenience type alias for Results using ClipStitchError
pub type Result<T> = std::result::Result<T, ClipStitchError>;

impl ClipStitchError {
    /// Shorthand for the empty-input validation failure
    pub fn invalid_input<S: Into<String>>(details: S) -> Self {
        ConfigError::InvalidInput { details: details.into() }.into()
    }

    /// True for the "invalid input" configuration failure
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::Config(ConfigError::InvalidInput { .. }))
    }

    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            Self::Config(ConfigError::InvalidInput { details }) => {
                format!("Nothing to concatenate: {}. Check the input directory or file list.", details)
            }
            Self::Media(MediaError::LoadFailed { path, .. }) => {
                format!("Could not load '{}'. Please check the file exists and is a supported format.", path)
            }
            Self::Media(MediaError::ToolNotFound { tool })
            | Self::Encode(EncodeError::ToolNotFound { tool }) => {
                format!("'{}' was not found. Please install FFmpeg or set its path in the [encoding] config.", tool)
            }
            Self::Config(ConfigError::FileNotFound { path }) => {
                format!("Configuration file '{}' not found.", path)
            }
            _ => self.to_string(),
        }
    }
}

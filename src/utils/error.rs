use thiserror::Error;

#[derive(Error, Debug)]
pub enum PullerError {
    #[error("API request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Invalid API response: {0}")]
    InvalidResponse(#[from] serde_json::Error),

    /// API 回報的失敗 (status 不是 REQUEST_SUCCEEDED)
    #[error("{message}")]
    Remote { message: String },

    #[error("{message}")]
    ValidationError { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Remote,
    Config,
    Io,
}

impl PullerError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ValidationError { .. } => ErrorCategory::Validation,
            Self::Transport(_) | Self::InvalidResponse(_) | Self::Remote { .. } => {
                ErrorCategory::Remote
            }
            Self::ConfigError { .. } | Self::InvalidConfigValueError { .. } => {
                ErrorCategory::Config
            }
            Self::IoError(_) => ErrorCategory::Io,
        }
    }
}

pub type Result<T> = std::result::Result<T, PullerError>;

/// CLI error types
use harmonic_core::HarmonicError;
use harmonic_playback::PlaybackError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unknown command: {0} (try `help`)")]
    UnknownCommand(String),

    #[error("Invalid argument for `{command}`: {reason}")]
    InvalidArgument {
        command: &'static str,
        reason: String,
    },

    #[error("Catalog error: {0}")]
    Catalog(#[from] HarmonicError),

    #[error("Playback error: {0}")]
    Playback(#[from] PlaybackError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub fn invalid_argument(command: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            command,
            reason: reason.into(),
        }
    }
}

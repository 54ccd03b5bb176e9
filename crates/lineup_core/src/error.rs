use thiserror::Error;

#[derive(Error, Debug)]
pub enum LineupError {
    #[error("Slot {index} out of range (lineup has {len} slots)")]
    SlotOutOfRange { index: usize, len: usize },

    #[error("Unknown player: {0}")]
    UnknownPlayer(String),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Provider {provider} failed: {message}")]
    Provider { provider: String, message: String },
}

impl LineupError {
    /// External data failures can fall back to the embedded defaults.
    pub fn is_recoverable(&self) -> bool {
        match self {
            LineupError::Io(_) => true,
            LineupError::Parse(_) => true,
            LineupError::Provider { .. } => true,
            LineupError::SlotOutOfRange { .. } => false,
            LineupError::UnknownPlayer(_) => false,
            LineupError::InvalidConfig(_) => false,
        }
    }

    pub fn provider(provider: &str, message: impl std::fmt::Display) -> Self {
        LineupError::Provider { provider: provider.to_string(), message: message.to_string() }
    }
}

pub type Result<T> = std::result::Result<T, LineupError>;

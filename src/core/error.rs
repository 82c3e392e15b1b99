use thiserror::Error;

#[derive(Error, Debug)]
pub enum HiveError {
    #[error("invalid snapshot: {0}")]
    InvalidSnapshot(String),

    #[error("planning failed for agent {0}: {1}")]
    Planning(crate::core::types::AgentId, String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("config parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, HiveError>;

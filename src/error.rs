use thiserror::Error;

/// Unified error type for release-kit operations
#[derive(Error, Debug)]
pub enum ReleaseError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid version: {0}")]
    InvalidVersion(String),

    #[error("Usage error: {0}")]
    Usage(String),

    #[error("Manifest error: {0}")]
    Manifest(String),

    #[error("Not in a git repository")]
    NotARepository,

    #[error("Remote probe failed: {0}")]
    Probe(String),

    #[error("Git operation failed: {0}")]
    Git(String),

    #[error("Content export failed: {0}")]
    Export(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Convenience type alias for Results in release-kit
pub type Result<T> = std::result::Result<T, ReleaseError>;

impl ReleaseError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ReleaseError::Config(msg.into())
    }

    /// Create a version error with context
    pub fn invalid_version(msg: impl Into<String>) -> Self {
        ReleaseError::InvalidVersion(msg.into())
    }

    /// Create a usage error for arguments clap accepted but the command cannot
    pub fn usage(msg: impl Into<String>) -> Self {
        ReleaseError::Usage(msg.into())
    }

    /// Create a manifest error with context
    pub fn manifest(msg: impl Into<String>) -> Self {
        ReleaseError::Manifest(msg.into())
    }

    /// Create a probe error with context
    pub fn probe(msg: impl Into<String>) -> Self {
        ReleaseError::Probe(msg.into())
    }

    /// Create a git mutation error with context
    pub fn git(msg: impl Into<String>) -> Self {
        ReleaseError::Git(msg.into())
    }

    /// Create an export error with context
    pub fn export(msg: impl Into<String>) -> Self {
        ReleaseError::Export(msg.into())
    }
}

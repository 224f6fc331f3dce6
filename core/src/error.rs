use thiserror::Error;

#[derive(Debug, Error)]
pub enum VolstatError {
    #[error("Volume provider unavailable: {0}")]
    ProviderUnavailable(String),

    #[error("Platform not supported: {0}")]
    PlatformNotSupported(String),

    #[error("Path not found: {0}")]
    PathNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Other error: {0}")]
    Other(String),
}

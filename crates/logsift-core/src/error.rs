/// Logsift error types
#[derive(Debug, thiserror::Error)]
pub enum SiftError {
    #[error("input file not found: {0}")]
    InputNotFound(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("serialization error: {0}")]
    Serialize(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

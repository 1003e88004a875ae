use thiserror::Error;

#[derive(Error, Debug)]
pub enum NiveshError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid port '{0}'")]
    InvalidPort(String),

    #[error("Invalid plan payload: {0}")]
    InvalidPayload(String),
}

pub type Result<T> = std::result::Result<T, NiveshError>;

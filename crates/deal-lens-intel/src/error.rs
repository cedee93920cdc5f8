use thiserror::Error;

#[derive(Debug, Error)]
pub enum IntelError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("collaborator returned invalid data: {0}")]
    InvalidResponse(String),
}

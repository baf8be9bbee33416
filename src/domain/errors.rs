use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{source_label} responded with {status}")]
    Upstream { source_label: String, status: u16 },

    #[error("TVMaze request timed out")]
    Timeout,

    #[error("failed to decode TVMaze response: {0}")]
    Decode(String),

    #[error("TVMaze request failed: {0}")]
    Network(String),
}

pub type Result<T> = std::result::Result<T, DomainError>;

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

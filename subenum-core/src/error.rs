use thiserror::Error;

#[derive(Error, Debug)]
pub enum SubenumError {
    #[error("Invalid domain name: {0}")]
    InvalidDomain(String),

    #[error("Unknown source: {0}")]
    UnknownSource(String),

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Unexpected status {status} from {source_name}")]
    ProviderStatus { source_name: String, status: u16 },

    #[error("{source_name} reported no results")]
    NoResults { source_name: String },

    #[error("JSON parsing failed: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Operation cancelled")]
    Cancelled,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SubenumError>;

use thiserror::Error;

/// Failures writing to the report cache. Reads never fail.
#[derive(Error, Debug)]
pub enum CacheError {
    #[error("Report has no patient id and can't be cached")]
    MissingPatientId,

    #[error("Key can't be stored: {0}")]
    InvalidKey(String),

    #[error("Can't serialize report: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Failures talking to the analysis service or the assistant.
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Request failed: {0}")]
    Transport(String),

    #[error("HTTP error! status: {status}, details: {details}")]
    Status { status: u16, details: String },

    #[error("Can't decode service response: {0}")]
    Decode(String),

    #[error("Service not configured: {0}")]
    NotConfigured(String),
}

impl From<reqwest::Error> for ServiceError {
    fn from(value: reqwest::Error) -> Self {
        if value.is_decode() {
            ServiceError::Decode(value.to_string())
        } else {
            ServiceError::Transport(value.to_string())
        }
    }
}

use thiserror::Error;

#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("upstream returned {status}: {reason}")]
    Status { status: u16, reason: String },
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("feed decoding error: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("invalid feed endpoint: {0}")]
    InvalidEndpoint(#[from] url::ParseError),
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("store serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("hosted store returned {status}: {reason}")]
    Remote { status: u16, reason: String },
    #[error("hosted store network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl UpstreamError {
    pub(crate) fn from_status(status: reqwest::StatusCode) -> Self {
        Self::Status {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("Unknown").to_owned(),
        }
    }
}

impl StoreError {
    pub(crate) fn from_status(status: reqwest::StatusCode) -> Self {
        Self::Remote {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("Unknown").to_owned(),
        }
    }
}

use thiserror::Error;

/// Everything that can go wrong while talking to the schedule backend.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid backend URL: {0}")]
    Url(#[from] url::ParseError),
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: ureq::Error,
    },
    #[error("backend returned status {status}")]
    Status { status: u16, detail: Option<String> },
    #[error("failed to read response body: {0}")]
    Body(String),
    #[error("unexpected response shape: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("background fetch did not complete: {0}")]
    Task(String),
}

impl FetchError {
    /// The single message shown to the user for this failure.
    ///
    /// A non-OK response shows the server's `detail` verbatim, or `fallback` when it sent none.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            FetchError::Status { detail: Some(detail), .. } if !detail.is_empty() => detail.clone(),
            FetchError::Status { .. } => fallback.to_string(),
            other => other.to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var} has invalid value {value:?}: {reason}")]
    Invalid { var: &'static str, value: String, reason: String },
}

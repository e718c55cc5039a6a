use thiserror::Error;

/// Failure modes for a single scenario. Any variant fails that scenario
/// only; the runner always continues with the remaining scenarios.
#[derive(Debug, Error)]
pub enum CheckError {
    #[error("invalid url `{0}`")]
    InvalidUrl(String),

    #[error("invalid header `{name}`: {reason}")]
    Header { name: String, reason: String },

    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("response is not valid JSON: {0}")]
    Parse(#[source] serde_json::Error),
}

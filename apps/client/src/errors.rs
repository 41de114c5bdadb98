use thiserror::Error;

/// Failure talking to the resume server.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-2xx response. `body` is the response text, used as the error detail.
    #[error("{}", status_message(.status, .body))]
    Status { status: u16, body: String },

    #[error("JSON parse error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid server URL: {0}")]
    InvalidUrl(String),
}

fn status_message(status: &u16, body: &str) -> String {
    if body.is_empty() {
        format!("API error {status}")
    } else {
        format!("Server error {status}: {body}")
    }
}

/// Failure writing a downloaded file to disk.
#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("Failed to stage download: {0}")]
    Stage(#[source] std::io::Error),

    #[error("Failed to save {filename}: {source}")]
    Persist {
        filename: String,
        #[source]
        source: std::io::Error,
    },
}

/// Everything that can go wrong inside a builder action. Converted into a
/// user-facing notice at the action boundary.
#[derive(Debug, Error)]
pub enum ActionError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("Empty PDF payload received.")]
    EmptyPayload,

    #[error(transparent)]
    Delivery(#[from] DeliveryError),
}

use thiserror::Error;

/// Failures surfaced by a [`DesignApi`](super::DesignApi) call.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server answered with a non-success status. `body` holds whatever
    /// text came back so it can be logged next to the status.
    #[error("Figma API error: {status} {status_text}")]
    Http {
        status: u16,
        status_text: String,
        body: String,
    },

    #[error("request to {endpoint} failed: {message}")]
    Transport { endpoint: String, message: String },

    #[error("failed to decode response from {endpoint}: {message}")]
    Decode { endpoint: String, message: String },
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

use thiserror::Error;

/// Text shown in the error pane when the backend could not be reached or
/// answered with something that is not JSON.
pub const GENERIC_NETWORK_MESSAGE: &str =
    "Could not reach the server. Please check your connection and try again.";

/// Text shown when the backend reports a failure without an `error` field.
pub const UNKNOWN_REMOTE_MESSAGE: &str = "An unknown error occurred.";

/// Client-level error type.
///
/// Every variant renders the same way in the output pane; the variant only
/// decides which text the user sees (see [`ClientError::user_message`]).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// Required input missing. Raised before any request leaves the client.
    #[error("{0}")]
    Validation(String),

    /// Transport failure or a response body that is not the expected JSON.
    #[error("Network error: {0}")]
    Network(String),

    /// Failure reported by the backend, via status code or `error` field.
    #[error("{0}")]
    Remote(String),

    #[error("Export error: {0}")]
    Export(String),

    #[error("Clipboard error: {0}")]
    Clipboard(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        ClientError::Network(err.to_string())
    }
}

impl ClientError {
    pub fn validation(message: impl Into<String>) -> Self {
        ClientError::Validation(message.into())
    }

    /// Stable machine-readable code, mirrored in log lines.
    pub fn code(&self) -> &'static str {
        match self {
            ClientError::Validation(_) => "VALIDATION_ERROR",
            ClientError::Network(_) => "NETWORK_ERROR",
            ClientError::Remote(_) => "REMOTE_ERROR",
            ClientError::Export(_) => "EXPORT_ERROR",
            ClientError::Clipboard(_) => "CLIPBOARD_ERROR",
            ClientError::NotFound(_) => "NOT_FOUND",
        }
    }

    /// The message rendered in the error pane.
    ///
    /// Validation and remote messages pass through verbatim. Transport
    /// details are logged and replaced with a generic message.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Validation(msg) | ClientError::Remote(msg) => msg.clone(),
            ClientError::Network(detail) => {
                tracing::error!("Network error: {detail}");
                GENERIC_NETWORK_MESSAGE.to_string()
            }
            ClientError::Export(detail) => {
                tracing::error!("Export error: {detail}");
                "The document could not be converted for download.".to_string()
            }
            ClientError::Clipboard(detail) => {
                tracing::warn!("Clipboard error: {detail}");
                "Could not copy to the clipboard.".to_string()
            }
            ClientError::NotFound(msg) => msg.clone(),
        }
    }
}

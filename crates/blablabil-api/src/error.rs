use thiserror::Error;

/// Error returned by every API call.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Network-level failure: connection refused, DNS, timeout.
    #[error("request failed: {0}")]
    Transport(String),

    /// Non-success HTTP status. `message` carries the server-supplied
    /// message when the error body had one.
    #[error("request failed with status {status}")]
    Status { status: u16, message: Option<String> },

    /// The server rejected the bearer token. Stored credentials have
    /// already been purged by the time this is returned.
    #[error("session expired or invalid")]
    Unauthorized,

    /// The request's cancellation token fired before completion.
    #[error("request was cancelled")]
    Cancelled,

    /// A success response whose body did not match the expected shape.
    #[error("failed to decode response: {0}")]
    Decode(String),
}

impl ApiError {
    /// The message the server attached to a failure response, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Status {
                message: Some(message),
                ..
            } => Some(message),
            _ => None,
        }
    }

    /// Message fit for direct display: the server's own message when
    /// present, the given fallback otherwise.
    pub fn human_message(&self, fallback: &str) -> String {
        self.server_message().unwrap_or(fallback).to_string()
    }

    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Unauthorized => Some(401),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

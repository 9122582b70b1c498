use thiserror::Error;

/// Failure of a single call against the remote portfolio API.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ApiError {
    #[error("Config error: {0}")]
    Config(String),
    #[error("Network error: {0}")]
    Network(String),
    #[error("Timeout: {0}")]
    Timeout(String),
    #[error("Not authenticated")]
    Unauthorized,
    #[error("Request failed ({status}): {}", .message.as_deref().unwrap_or("no details"))]
    Request { status: u16, message: Option<String> },
    #[error("Response error: {0}")]
    Parse(String),
}

/// Coarse error class used to pick the user-facing reaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Session missing or expired; the caller must log in again.
    Auth,
    /// The API answered with a non-2xx status.
    Request,
    /// The API could not be reached.
    Network,
    /// Rejected before any request was sent.
    Local,
}

impl ApiError {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Unauthorized => ErrorKind::Auth,
            Self::Request { .. } | Self::Parse(_) => ErrorKind::Request,
            Self::Network(_) | Self::Timeout(_) => ErrorKind::Network,
            Self::Config(_) => ErrorKind::Local,
        }
    }

    /// Message supplied by the API itself, when it sent one.
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Request {
                message: Some(message),
                ..
            } => Some(message.as_str()),
            _ => None,
        }
    }

    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Request { status, .. } => Some(*status),
            Self::Unauthorized => Some(401),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::Request { status: 404, .. })
    }
}

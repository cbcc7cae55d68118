use thiserror::Error;

/// Failures surfaced by the gateway, the admin endpoints and the session store.
///
/// Views convert every variant into a one-line notification; none of them is
/// fatal to the console and nothing is retried automatically.
#[derive(Debug, Error)]
pub enum Error {
    /// Non-2xx response, carrying the best message found in the body.
    #[error("Request failed ({status}): {message}")]
    Request { status: u16, message: String },
    /// Body present but not decodable as the envelope or the raw payload.
    #[error("Response error: {0}")]
    Decode(String),
    /// Rejected credentials or a command that needs a session without one.
    #[error("Authentication error: {0}")]
    Auth(String),
    #[error("Network error: {0}")]
    Network(String),
    #[error("Timeout: {0}")]
    Timeout(String),
    #[error("Config error: {0}")]
    Config(String),
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Request error: {0}")]
    Serialization(String),
}

impl Error {
    /// HTTP status for request failures, `None` for everything else.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Request { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout("Request timed out. Please try again.".to_string())
        } else if err.is_builder() {
            Self::Serialization(format!("Failed to build request: {err}"))
        } else {
            Self::Network(format!("Unable to reach the server: {err}"))
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_error_display_includes_status() {
        let err = Error::Request {
            status: 404,
            message: "nope".to_string(),
        };
        assert_eq!(err.to_string(), "Request failed (404): nope");
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn non_request_errors_have_no_status() {
        assert_eq!(Error::Decode("bad".to_string()).status(), None);
        assert_eq!(Error::Auth("denied".to_string()).status(), None);
    }
}

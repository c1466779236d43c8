use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChannelError {
    #[error("Connection failed: {0}")]
    Connect(String),

    #[error("Socket error: {0}")]
    Socket(#[from] tokio_tungstenite::tungstenite::Error),

    #[error("Network error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Rate limited")]
    RateLimited { retry_after: Option<Duration> },

    #[error("Server answered {0}")]
    Status(u16),

    #[error("Malformed frame: {0}")]
    Malformed(String),

    #[error("Channel closed")]
    Closed,

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl ChannelError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ChannelError::Connect(_) => "Could not reach the presentation server.",
            ChannelError::Socket(_) => "The connection to the presentation was interrupted.",
            ChannelError::Http(e) if e.is_decode() => {
                "The presentation server sent an unexpected response."
            }
            ChannelError::Http(_) => "Network error. Check your connection.",
            ChannelError::RateLimited { .. } => "The presentation server is busy. Try again shortly.",
            ChannelError::Status(_) => "The presentation server refused the request.",
            ChannelError::Malformed(_) => "Received an unexpected message from the presentation.",
            ChannelError::Closed => "The connection to the presentation is closed.",
            ChannelError::InvalidUrl(_) => "The server address is invalid. Check your settings.",
        }
    }

    /// Whether the same request may succeed if sent again.
    pub fn is_retryable(&self) -> bool {
        match self {
            ChannelError::Connect(_) | ChannelError::RateLimited { .. } => true,
            ChannelError::Http(e) => e.is_connect() || e.is_timeout() || e.is_request(),
            _ => false,
        }
    }
}

impl From<serde_json::Error> for ChannelError {
    fn from(e: serde_json::Error) -> Self {
        ChannelError::Malformed(e.to_string())
    }
}

pub type ChannelResult<T> = Result<T, ChannelError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_errors_become_malformed_frames() {
        let err: ChannelError = serde_json::from_str::<serde_json::Value>("{nope")
            .unwrap_err()
            .into();
        assert!(matches!(err, ChannelError::Malformed(_)));
        assert!(!err.is_retryable());
    }

    #[test]
    fn only_transient_failures_are_retryable() {
        assert!(ChannelError::Connect("refused".to_string()).is_retryable());
        assert!(ChannelError::RateLimited { retry_after: None }.is_retryable());
        assert!(!ChannelError::Status(503).is_retryable());
        assert!(!ChannelError::Closed.is_retryable());
    }
}

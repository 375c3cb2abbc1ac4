//! Error types for archive runs

use letterbox_config::ConfigError;
use thiserror::Error;

/// Result type for archive operations
pub type Result<T> = std::result::Result<T, ArchiveError>;

/// Errors raised by collaborators or the orchestrator
#[derive(Error, Debug)]
pub enum ArchiveError {
    /// Non-success HTTP response
    #[error("HTTP error {status}: {message}")]
    Http { status: u16, message: String },

    /// Transport failure before a response arrived
    #[error("Network error: {0}")]
    Network(String),

    /// Message body could not be decoded
    #[error("Decode error: {0}")]
    Decode(String),

    /// Message is missing data the archive needs
    #[error("Invalid message {id}: {reason}")]
    InvalidMessage { id: String, reason: String },

    /// Configuration problem
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Failure while processing one newsletter target
    #[error("Newsletter '{name}' failed: {source}")]
    Target {
        name: String,
        #[source]
        source: Box<ArchiveError>,
    },
}

impl From<reqwest::Error> for ArchiveError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            ArchiveError::Http {
                status: status.as_u16(),
                message: err.to_string(),
            }
        } else {
            ArchiveError::Network(err.to_string())
        }
    }
}

/// Turn a non-2xx response into [`ArchiveError::Http`] carrying the body
pub(crate) async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response
        .text()
        .await
        .unwrap_or_else(|_| status.to_string());
    Err(ArchiveError::Http {
        status: status.as_u16(),
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_target_error_keeps_source() {
        let err = ArchiveError::Target {
            name: "Weekly".to_string(),
            source: Box::new(ArchiveError::Http {
                status: 403,
                message: "forbidden".to_string(),
            }),
        };
        assert_eq!(err.to_string(), "Newsletter 'Weekly' failed: HTTP error 403: forbidden");
        assert!(err.source().is_some());
    }

    #[test]
    fn test_config_error_is_transparent() {
        let err: ArchiveError = ConfigError::MissingEnv("DISCORD_WEBHOOK_URL").into();
        assert_eq!(
            err.to_string(),
            "Required environment variable DISCORD_WEBHOOK_URL is not set"
        );
    }
}

//! Shared Error Types
//!
//! One taxonomy covers the whole engine:
//!
//! - `Transport` - push-channel failures (connect, read, half-open
//!   timeout). Recovered locally by reconnecting; never surfaced.
//! - `Api` - the confirming persistence call was rejected. The caller
//!   rolls the board back and shows the message.
//! - `Serialization` - malformed JSON on either path.
//! - `Config` - invalid client configuration.
//!
//! No error here is fatal; the worst outcome is a stale board until the
//! next full reload.

use thiserror::Error;

/// Errors produced by the synchronization engine
#[derive(Debug, Error, Clone)]
pub enum SyncError {
    /// Push-channel or HTTP transport failure
    #[error("transport error: {message}")]
    Transport {
        /// Human-readable error message
        message: String,
    },

    /// The server rejected a persistence call
    #[error("api error ({status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body or status text
        message: String,
    },

    /// JSON serialization or deserialization error
    #[error("serialization error: {message}")]
    Serialization {
        /// Human-readable error message
        message: String,
    },

    /// Invalid client configuration
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message
        message: String,
    },
}

impl SyncError {
    /// Create a new transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Create a new API error
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Create a new serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }

    /// Create a new configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for SyncError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(format!("JSON error: {}", err))
    }
}

impl From<reqwest::Error> for SyncError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => Self::api(status.as_u16(), err.to_string()),
            None => Self::transport(err.to_string()),
        }
    }
}

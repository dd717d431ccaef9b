//! Error types for the kiosk engine.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    // Remote source errors
    #[error("Request to {url} failed: {message}")]
    Transport { url: String, message: String },

    #[error("Failed to decode response from {url}: {message}")]
    Decode { url: String, message: String },

    // Selection errors
    #[error("No suitable image found for {query}. Max retries reached.")]
    NoSuitableAsset { query: String },

    // Configuration errors
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn transport(url: impl Into<String>, message: impl ToString) -> Self {
        Error::Transport {
            url: url.into(),
            message: message.to_string(),
        }
    }

    pub fn decode(url: impl Into<String>, message: impl ToString) -> Self {
        Error::Decode {
            url: url.into(),
            message: message.to_string(),
        }
    }

    /// True for failures of the remote round trip, including undecodable bodies.
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Transport { .. } | Error::Decode { .. })
    }

    /// True when the selection loop ran out of attempts.
    pub fn is_exhaustion(&self) -> bool {
        matches!(self, Error::NoSuitableAsset { .. })
    }
}

//! Audio server error types.

use thiserror::Error;

/// Errors surfaced by the audio server connection.
#[derive(Debug, Error)]
pub enum PulseError {
    #[error("Connection to audio server failed: {0}")]
    Connection(String),

    #[error("Server request failed: {0}")]
    Request(String),

    #[error("Notification subscription lost")]
    SubscriptionLost,
}

/// Result type for audio server operations.
pub type PulseResult<T> = Result<T, PulseError>;

//! Bridge error types.

use thiserror::Error;

use pulsebridge_pulse::PulseError;

use crate::bus::BusError;
use crate::command::CommandError;

/// Error type for bridge operations.
#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("Audio server error: {0}")]
    Pulse(#[from] PulseError),

    #[error("Message bus error: {0}")]
    Bus(#[from] BusError),

    #[error("Command error: {0}")]
    Command(#[from] CommandError),

    #[error("No default sink known yet")]
    NoDefaultSink,
}

/// Result type alias for bridge operations.
pub type BridgeResult<T> = Result<T, BridgeError>;

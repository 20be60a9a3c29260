//! Pulsebridge Pulse - async seam to the remote audio server.
//!
//! This crate defines the boundary the bridge engine talks through: the
//! [`PulseServer`] trait covering queries, control requests and the
//! notification subscription, the raw descriptor types as the wire protocol
//! delivers them, and the single-slot notification channels.

pub mod error;
pub mod events;
pub mod server;
pub mod types;

pub use error::{PulseError, PulseResult};
pub use events::{
    EventBroadcaster, EventClass, EventReceivers, Facility, ServerEvent, event_channels,
};
pub use server::PulseServer;
pub use types::{CardInfo, ClientInfo, PortInfo, ProfileInfo, SinkInfo, SinkInputInfo, SourceInfo};

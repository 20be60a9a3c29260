//! Pulsebridge - audio server state mirroring and command dispatch.
//!
//! The bridge keeps a typed mirror of the audio server's mixing topology,
//! listens for change notifications, refreshes exactly the categories a
//! notification invalidates, and publishes the minimal set of outward state
//! topics. Inbound control commands are applied to the server under a
//! single serialization point.
//!
//! The two external collaborators are behind traits: the server connection
//! ([`pulsebridge_pulse::PulseServer`]) and the outward pub/sub transport
//! ([`MessageBus`]).

pub mod bridge;
pub mod bus;
pub mod command;
pub mod config;
pub mod error;
pub mod mirror;
pub mod publisher;

#[cfg(test)]
mod testutil;

pub use bridge::Bridge;
pub use bus::{BusError, MessageBus, prefixify, topic};
pub use command::{Command, CommandError};
pub use config::{Config, load_config};
pub use error::{BridgeError, BridgeResult};
pub use mirror::StateMirror;
pub use publisher::Publisher;

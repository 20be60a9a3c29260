//! The seam to the remote audio server.

use async_trait::async_trait;

use crate::error::PulseResult;
use crate::events::EventReceivers;
use crate::types::{CardInfo, ClientInfo, SinkInfo, SinkInputInfo, SourceInfo};

/// Connection to the remote audio server.
///
/// The bridge engine only ever talks to the server through this trait; the
/// concrete protocol client lives outside the engine, which keeps the
/// refresh and command paths testable against an in-memory server. Failing
/// to establish the concrete connection is fatal to bridge construction.
#[async_trait]
pub trait PulseServer: Send + Sync {
    /// The current list of sinks.
    async fn list_sinks(&self) -> PulseResult<Vec<SinkInfo>>;

    /// The current list of sources.
    async fn list_sources(&self) -> PulseResult<Vec<SourceInfo>>;

    /// The current list of sink inputs.
    async fn list_sink_inputs(&self) -> PulseResult<Vec<SinkInputInfo>>;

    /// The current list of connected clients.
    async fn list_clients(&self) -> PulseResult<Vec<ClientInfo>>;

    /// The current list of hardware cards with their profiles and ports.
    async fn list_cards(&self) -> PulseResult<Vec<CardInfo>>;

    /// The sink currently marked default.
    async fn default_sink(&self) -> PulseResult<SinkInfo>;

    /// The source currently marked default.
    async fn default_source(&self) -> PulseResult<SourceInfo>;

    /// Make the named sink the default.
    async fn set_default_sink(&self, name: &str) -> PulseResult<()>;

    /// Mute or unmute a sink.
    async fn set_sink_mute(&self, sink_index: u32, mute: bool) -> PulseResult<()>;

    /// Set a sink's per-channel volume levels.
    async fn set_sink_volume(&self, sink_index: u32, channel_volumes: Vec<u32>) -> PulseResult<()>;

    /// Switch a card to the named profile.
    async fn set_card_profile(&self, card_index: u32, profile: &str) -> PulseResult<()>;

    /// Move a sink input to the named sink.
    async fn move_sink_input(&self, sink_input_index: u32, sink_name: &str) -> PulseResult<()>;

    /// Subscribe to the server's notification stream.
    ///
    /// The returned channels hold one slot per notification class; the
    /// connection overwrites an undrained slot rather than queueing.
    async fn subscribe(&self) -> PulseResult<EventReceivers>;

    /// Close the underlying connection. Safe to call more than once.
    async fn close(&self);
}

//! Outward message-bus boundary and topic layout.

use async_trait::async_trait;
use thiserror::Error;

/// Errors from the outward pub/sub transport.
#[derive(Debug, Error)]
pub enum BusError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Connection closed")]
    ConnectionClosed,

    #[error("Publish failed: {0}")]
    Publish(String),
}

/// Outward pub/sub channel the bridge publishes to.
///
/// The concrete transport (an MQTT client in the reference deployment) is an
/// external collaborator; the bridge only needs topic/payload publishing
/// with a retain flag. Retained topics keep their last value for late
/// subscribers; acknowledgements are transient.
#[async_trait]
pub trait MessageBus: Send + Sync {
    async fn publish(&self, topic: &str, payload: Vec<u8>, retain: bool) -> Result<(), BusError>;
}

/// Join an installation-specific prefix and a topic suffix.
#[must_use]
pub fn prefixify(prefix: &str, suffix: &str) -> String {
    if prefix.trim().is_empty() { suffix.to_string() } else { format!("{prefix}/{suffix}") }
}

/// Topic suffixes used by the bridge, under the installation prefix.
pub mod topic {
    // Inbound command topics
    pub const SET_DEFAULT_SINK: &str = "pulseaudio/sink/default/set";
    pub const SET_MUTE: &str = "pulseaudio/mute/set";
    pub const SET_VOLUME: &str = "pulseaudio/volume/set";
    pub const CHANGE_VOLUME: &str = "pulseaudio/volume/change";
    pub const SINK_INPUT_REQ: &str = "pulseaudio/sinkinput/req";
    pub const INITIALIZE: &str = "pulseaudio/initialize";
    /// Card profile topics carry the card index between prefix and suffix:
    /// `pulseaudio/cardprofile/{cardIndex}/set`.
    pub const CARD_PROFILE_PREFIX: &str = "pulseaudio/cardprofile/";
    pub const CARD_PROFILE_SUFFIX: &str = "/set";

    // Outbound state topics, all retained
    pub const STATE: &str = "pulseaudio/state";
    pub const DEFAULT_SINK: &str = "pulseaudio/defaultsink";
    pub const DEFAULT_SOURCE: &str = "pulseaudio/defaultsource";
    pub const ACTIVE_PROFILE_PER_CARD: &str = "pulseaudio/activeprofilepercard";
    pub const CLIENTS: &str = "pulseaudio/clients";
    pub const SINK_INPUTS: &str = "pulseaudio/sinkinputs";
    pub const SINKS: &str = "pulseaudio/sinks";
    pub const SOURCES: &str = "pulseaudio/sources";
    pub const CARDS: &str = "pulseaudio/cards";
}

//! Mirrored entity model for the audio server topology.
//!
//! All types are plain values with structural equality: two snapshots of the
//! same category compare equal exactly when nothing observable changed.
//! Indices are assigned by the server and are only unique within one
//! connection's lifetime.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

/// Run state of a playback or capture device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DeviceState {
    /// Actively moving audio
    Running,
    /// Open but not moving audio
    Idle,
    /// Suspended by the server
    #[default]
    Suspended,
    /// Unrecognized wire value
    Invalid,
}

impl From<u32> for DeviceState {
    fn from(raw: u32) -> Self {
        match raw {
            0 => Self::Running,
            1 => Self::Idle,
            2 => Self::Suspended,
            _ => Self::Invalid,
        }
    }
}

/// A playback device endpoint (the server's "sink").
///
/// The index is stable for the life of the device; the name need not be.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Sink {
    pub name: String,
    pub id: String,
    pub index: u32,
    pub state: DeviceState,
    pub mute: bool,
    /// Volume level corresponding to the device's reference output
    pub base_volume: u32,
    /// Per-channel volume levels, in channel order
    pub channel_volumes: Vec<u32>,
}

/// A capture device endpoint (the server's "source").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Source {
    pub name: String,
    pub id: String,
    pub state: DeviceState,
    pub mute: bool,
}

/// A process connected to the audio server (the server's "client").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub index: u32,
    pub application: String,
    /// Free-form property map; values are decoded with trailing NULs stripped
    pub properties: BTreeMap<String, String>,
}

/// One application's active playback stream routed to a sink
/// (the server's "sink input").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct SinkInput {
    pub media_name: String,
    pub index: u32,
    /// Index of the owning client
    pub client_index: u32,
    /// Index of the sink this stream currently plays to
    pub sink_index: u32,
    pub mute: bool,
    pub properties: BTreeMap<String, String>,
}

/// A hardware card exposing selectable profiles and ports.
///
/// Profiles and ports are owned by value; they have no identity outside
/// their card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub name: String,
    pub index: u32,
    pub active_profile: String,
    pub profiles: Vec<CardProfile>,
    pub ports: Vec<CardPort>,
}

/// A selectable card profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CardProfile {
    pub name: String,
    pub description: String,
}

/// A physical port on a card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CardPort {
    pub name: String,
    pub description: String,
}

/// Decode a raw property map as delivered by the wire protocol.
///
/// Values arrive as byte blobs that are usually NUL-terminated strings;
/// trailing NUL bytes are stripped and invalid UTF-8 is replaced.
#[must_use]
pub fn decode_properties(raw: &HashMap<String, Vec<u8>>) -> BTreeMap<String, String> {
    raw.iter()
        .map(|(key, value)| {
            let text = String::from_utf8_lossy(value);
            (key.clone(), text.trim_end_matches('\0').to_string())
        })
        .collect()
}

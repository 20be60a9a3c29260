//! Raw descriptors as delivered by the audio server wire protocol.
//!
//! These carry wire-level representations (integer device states, property
//! values as byte blobs); conversion into the mirrored entity model decodes
//! them.

use std::collections::HashMap;

use pulsebridge_core::entity::{
    Card, CardPort, CardProfile, Client, DeviceState, Sink, SinkInput, Source, decode_properties,
};

/// Raw sink descriptor.
#[derive(Debug, Clone, Default)]
pub struct SinkInfo {
    pub name: String,
    pub id: String,
    pub index: u32,
    pub state: u32,
    pub mute: bool,
    pub base_volume: u32,
    pub channel_volumes: Vec<u32>,
}

impl From<SinkInfo> for Sink {
    fn from(info: SinkInfo) -> Self {
        Self {
            name: info.name,
            id: info.id,
            index: info.index,
            state: DeviceState::from(info.state),
            mute: info.mute,
            base_volume: info.base_volume,
            channel_volumes: info.channel_volumes,
        }
    }
}

/// Raw source descriptor.
#[derive(Debug, Clone, Default)]
pub struct SourceInfo {
    pub name: String,
    pub id: String,
    pub state: u32,
    pub mute: bool,
}

impl From<SourceInfo> for Source {
    fn from(info: SourceInfo) -> Self {
        Self {
            name: info.name,
            id: info.id,
            state: DeviceState::from(info.state),
            mute: info.mute,
        }
    }
}

/// Raw client descriptor. Property values are undecoded byte blobs.
#[derive(Debug, Clone, Default)]
pub struct ClientInfo {
    pub index: u32,
    pub application: String,
    pub properties: HashMap<String, Vec<u8>>,
}

impl From<ClientInfo> for Client {
    fn from(info: ClientInfo) -> Self {
        Self {
            index: info.index,
            application: info.application,
            properties: decode_properties(&info.properties),
        }
    }
}

/// Raw sink-input descriptor.
#[derive(Debug, Clone, Default)]
pub struct SinkInputInfo {
    pub media_name: String,
    pub index: u32,
    pub client_index: u32,
    pub sink_index: u32,
    pub mute: bool,
    pub properties: HashMap<String, Vec<u8>>,
}

impl From<SinkInputInfo> for SinkInput {
    fn from(info: SinkInputInfo) -> Self {
        Self {
            media_name: info.media_name,
            index: info.index,
            client_index: info.client_index,
            sink_index: info.sink_index,
            mute: info.mute,
            properties: decode_properties(&info.properties),
        }
    }
}

/// Raw card descriptor.
#[derive(Debug, Clone, Default)]
pub struct CardInfo {
    pub name: String,
    pub index: u32,
    pub active_profile: String,
    pub profiles: Vec<ProfileInfo>,
    pub ports: Vec<PortInfo>,
}

/// Raw card profile descriptor.
#[derive(Debug, Clone, Default)]
pub struct ProfileInfo {
    pub name: String,
    pub description: String,
}

/// Raw card port descriptor.
#[derive(Debug, Clone, Default)]
pub struct PortInfo {
    pub name: String,
    pub description: String,
}

impl From<CardInfo> for Card {
    fn from(info: CardInfo) -> Self {
        Self {
            name: info.name,
            index: info.index,
            active_profile: info.active_profile,
            profiles: info
                .profiles
                .into_iter()
                .map(|p| CardProfile { name: p.name, description: p.description })
                .collect(),
            ports: info
                .ports
                .into_iter()
                .map(|p| CardPort { name: p.name, description: p.description })
                .collect(),
        }
    }
}

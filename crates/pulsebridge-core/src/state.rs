//! Full snapshot of the mirrored server topology.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::entity::{Card, Client, Sink, SinkInput, Source};

/// Last-known-good snapshot of everything mirrored from the audio server.
///
/// Each list is replaced wholesale on every successful refresh of its
/// category; the defaults are direct copies of the corresponding sink and
/// source values, not references into the lists. The per-card profile map is
/// retained across refreshes so that profile-only changes can be detected
/// without comparing full card descriptors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct AudioState {
    pub default_sink: Sink,
    pub default_source: Source,
    pub sinks: Vec<Sink>,
    pub sink_inputs: Vec<SinkInput>,
    pub clients: Vec<Client>,
    pub sources: Vec<Source>,
    pub cards: Vec<Card>,
    /// Active profile name per card index. Never pruned when a card
    /// disappears without a removal notification.
    pub active_profile_per_card: BTreeMap<u32, String>,
}

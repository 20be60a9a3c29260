//! Outward state publishing.

use std::sync::Arc;

use serde::Serialize;
use tracing::error;

use pulsebridge_core::{AudioState, DetectedChanges};

use crate::bus::{MessageBus, prefixify, topic};

/// Renders snapshot categories to the outward bus.
///
/// State topics are retained so a late subscriber immediately receives the
/// last known value; acknowledgements are transient. A failed publish is
/// logged and does not abort the remaining topics of a pass.
pub struct Publisher {
    bus: Arc<dyn MessageBus>,
    prefix: String,
}

impl Publisher {
    pub fn new(bus: Arc<dyn MessageBus>, prefix: impl Into<String>) -> Self {
        Self { bus, prefix: prefix.into() }
    }

    /// Publish the full snapshot and every category topic.
    pub async fn publish_state(&self, state: &AudioState) {
        self.publish_granular(state, DetectedChanges::all()).await;
    }

    /// Publish the snapshot topic plus each category whose flag is set.
    pub async fn publish_granular(&self, state: &AudioState, changes: DetectedChanges) {
        self.publish_json(topic::STATE, state).await;

        if changes.default_sink || changes.sink_inputs {
            self.publish_json(topic::DEFAULT_SINK, &state.default_sink).await;
        }
        if changes.default_source {
            self.publish_json(topic::DEFAULT_SOURCE, &state.default_source).await;
        }
        if changes.active_profile {
            self.publish_json(topic::ACTIVE_PROFILE_PER_CARD, &state.active_profile_per_card)
                .await;
        }
        if changes.clients {
            self.publish_json(topic::CLIENTS, &state.clients).await;
        }
        if changes.sink_inputs {
            self.publish_json(topic::SINK_INPUTS, &state.sink_inputs).await;
        }
        if changes.sinks {
            self.publish_json(topic::SINKS, &state.sinks).await;
        }
        if changes.sources {
            self.publish_json(topic::SOURCES, &state.sources).await;
        }
        if changes.cards {
            self.publish_json(topic::CARDS, &state.cards).await;
        }
    }

    /// Empty, non-retained acknowledgement on a command's own inbound topic.
    pub async fn publish_ack(&self, suffix: &str) {
        let full_topic = prefixify(&self.prefix, suffix);
        if let Err(e) = self.bus.publish(&full_topic, Vec::new(), false).await {
            error!(topic = %full_topic, error = %e, "Failed to publish command ack");
        }
    }

    async fn publish_json<T: Serialize>(&self, suffix: &str, value: &T) {
        let payload = match serde_json::to_vec(value) {
            Ok(payload) => payload,
            Err(e) => {
                error!(topic = suffix, error = %e, "Failed to serialize state for publishing");
                return;
            }
        };
        let full_topic = prefixify(&self.prefix, suffix);
        if let Err(e) = self.bus.publish(&full_topic, payload, true).await {
            error!(topic = %full_topic, error = %e, "Failed to publish state topic");
        }
    }
}

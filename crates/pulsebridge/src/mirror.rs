//! Last-known-good snapshot of the audio server topology.

use std::sync::Arc;

use tokio::sync::Mutex;

use pulsebridge_core::entity::{Card, Client, Sink, SinkInput, Source};
use pulsebridge_core::{AudioState, DetectedChanges};
use pulsebridge_pulse::{PulseResult, PulseServer};

/// Owns the mirrored snapshot and the per-category refresh operations.
///
/// One mutex covers every read and write: the reactor's refresh operations
/// and the command path's default-sink resolution go through the same
/// guard, so a command never observes a half-replaced category.
///
/// Every refresh has the same contract: query the server, build the typed
/// values, compare against the stored value, replace it wholesale, and
/// report whether it differed. On a query error the stored value is left
/// untouched. Lists compare positionally; a reordering with no other change
/// is reported as changed.
pub struct StateMirror {
    server: Arc<dyn PulseServer>,
    state: Mutex<AudioState>,
}

impl StateMirror {
    #[must_use]
    pub fn new(server: Arc<dyn PulseServer>) -> Self {
        Self { server, state: Mutex::new(AudioState::default()) }
    }

    /// Clone of the full snapshot.
    pub async fn snapshot(&self) -> AudioState {
        self.state.lock().await.clone()
    }

    /// Copy of the current default sink, if one has been observed yet.
    pub async fn default_sink(&self) -> Option<Sink> {
        let state = self.state.lock().await;
        if state.default_sink.name.is_empty() {
            None
        } else {
            Some(state.default_sink.clone())
        }
    }

    /// Refresh every category in one pass. Flags report what differed.
    pub async fn refresh_all(&self) -> PulseResult<DetectedChanges> {
        let sources = self.refresh_sources().await?;
        let sinks = self.refresh_sinks().await?;
        let sink_inputs = self.refresh_sink_inputs().await?;
        let clients = self.refresh_clients().await?;
        let default_sink = self.refresh_default_sink().await?;
        let default_source = self.refresh_default_source().await?;
        let active_profile = self.refresh_active_profile().await?;
        Ok(DetectedChanges {
            default_sink,
            default_source,
            active_profile,
            sinks,
            sink_inputs,
            clients,
            cards: active_profile,
            sources,
        })
    }

    pub async fn refresh_sinks(&self) -> PulseResult<bool> {
        let mut state = self.state.lock().await;
        let sinks: Vec<Sink> =
            self.server.list_sinks().await?.into_iter().map(Sink::from).collect();
        let changed = sinks != state.sinks;
        state.sinks = sinks;
        Ok(changed)
    }

    pub async fn refresh_sources(&self) -> PulseResult<bool> {
        let mut state = self.state.lock().await;
        let sources: Vec<Source> =
            self.server.list_sources().await?.into_iter().map(Source::from).collect();
        let changed = sources != state.sources;
        state.sources = sources;
        Ok(changed)
    }

    pub async fn refresh_sink_inputs(&self) -> PulseResult<bool> {
        let mut state = self.state.lock().await;
        let sink_inputs: Vec<SinkInput> =
            self.server.list_sink_inputs().await?.into_iter().map(SinkInput::from).collect();
        let changed = sink_inputs != state.sink_inputs;
        state.sink_inputs = sink_inputs;
        Ok(changed)
    }

    pub async fn refresh_clients(&self) -> PulseResult<bool> {
        let mut state = self.state.lock().await;
        let clients: Vec<Client> =
            self.server.list_clients().await?.into_iter().map(Client::from).collect();
        let changed = clients != state.clients;
        state.clients = clients;
        Ok(changed)
    }

    pub async fn refresh_default_sink(&self) -> PulseResult<bool> {
        let mut state = self.state.lock().await;
        let sink = Sink::from(self.server.default_sink().await?);
        let changed = sink != state.default_sink;
        state.default_sink = sink;
        Ok(changed)
    }

    pub async fn refresh_default_source(&self) -> PulseResult<bool> {
        let mut state = self.state.lock().await;
        let source = Source::from(self.server.default_source().await?);
        let changed = source != state.default_source;
        state.default_source = source;
        Ok(changed)
    }

    /// Refresh the card list and diff active profile names per card index.
    ///
    /// A change is detected for every card whose stored profile name differs
    /// from the observed one; a card index seen for the first time counts as
    /// changed. Card descriptors are always replaced wholesale.
    pub async fn refresh_active_profile(&self) -> PulseResult<bool> {
        let mut state = self.state.lock().await;
        let infos = self.server.list_cards().await?;
        let mut changed = false;
        let mut cards = Vec::with_capacity(infos.len());
        for info in infos {
            let card = Card::from(info);
            match state.active_profile_per_card.get(&card.index) {
                Some(profile) if *profile == card.active_profile => {}
                _ => {
                    state
                        .active_profile_per_card
                        .insert(card.index, card.active_profile.clone());
                    changed = true;
                }
            }
            cards.push(card);
        }
        state.cards = cards;
        // TODO prune profile entries for cards the server no longer reports
        Ok(changed)
    }
}

//! The bridge engine: reactor loop and command execution.

use std::sync::Arc;

use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use pulsebridge_core::{DetectedChanges, bounded_increment};
use pulsebridge_pulse::{Facility, PulseError, PulseServer, ServerEvent};

use crate::bus::MessageBus;
use crate::command::Command;
use crate::error::{BridgeError, BridgeResult};
use crate::mirror::StateMirror;
use crate::publisher::Publisher;

/// Reference level used when a sink reports no base volume.
const VOLUME_NORM: u32 = 0x10000;

/// Mirrors the audio server's state outward and applies inbound commands.
///
/// Two independent execution paths touch the mirror: the reactor task (the
/// sole notification consumer) and concurrently delivered command handlers.
/// The mirror's own mutex keeps both coherent; the command gate additionally
/// serializes commands against each other without ever blocking the reactor.
pub struct Bridge {
    server: Arc<dyn PulseServer>,
    mirror: StateMirror,
    publisher: Publisher,
    topic_prefix: String,
    command_gate: Mutex<()>,
}

impl Bridge {
    /// Construct the bridge: a full refresh of every category followed by a
    /// full-state publish.
    ///
    /// A server failure during the initial refresh is fatal to construction.
    pub async fn new(
        server: Arc<dyn PulseServer>,
        bus: Arc<dyn MessageBus>,
        topic_prefix: impl Into<String>,
    ) -> BridgeResult<Arc<Self>> {
        let topic_prefix = topic_prefix.into();
        let bridge = Arc::new(Self {
            mirror: StateMirror::new(Arc::clone(&server)),
            publisher: Publisher::new(bus, topic_prefix.clone()),
            server,
            topic_prefix,
            command_gate: Mutex::new(()),
        });
        bridge.initialize().await?;
        info!("Bridge initialized with full server state");
        Ok(bridge)
    }

    /// Refresh every category and publish the full state unconditionally.
    /// Any refresh failure is fatal; used at construction only.
    pub async fn initialize(&self) -> BridgeResult<()> {
        self.mirror.refresh_all().await?;
        let snapshot = self.mirror.snapshot().await;
        self.publisher.publish_state(&snapshot).await;
        Ok(())
    }

    /// Re-run every refresh for the initialize command. A failing category
    /// is logged and skipped; the remaining categories still refresh and the
    /// full state is published regardless.
    async fn reinitialize(&self) {
        for (category, result) in [
            ("sources", self.mirror.refresh_sources().await),
            ("sinks", self.mirror.refresh_sinks().await),
            ("sink inputs", self.mirror.refresh_sink_inputs().await),
            ("clients", self.mirror.refresh_clients().await),
            ("default sink", self.mirror.refresh_default_sink().await),
            ("default source", self.mirror.refresh_default_source().await),
            ("card profiles", self.mirror.refresh_active_profile().await),
        ] {
            if let Err(e) = result {
                error!(category, error = %e, "Refresh failed during reinitialize");
            }
        }
        let snapshot = self.mirror.snapshot().await;
        self.publisher.publish_state(&snapshot).await;
    }

    /// Run the notification reactor until cancellation or subscription loss.
    ///
    /// Failing to establish the subscription is fatal: the loop exits
    /// without resubscribing. Whatever the exit path, the server connection
    /// is closed exactly once on the way out.
    pub async fn run(&self, cancel: CancellationToken) -> BridgeResult<()> {
        let result = self.event_loop(&cancel).await;
        self.server.close().await;
        result
    }

    async fn event_loop(&self, cancel: &CancellationToken) -> BridgeResult<()> {
        let mut events = match self.server.subscribe().await {
            Ok(events) => events,
            Err(e) => {
                error!(error = %e, "Failed to subscribe to server notifications");
                return Err(e.into());
            }
        };

        loop {
            tokio::select! {
                () = cancel.cancelled() => {
                    info!("Closing down bridge event loop");
                    return Ok(());
                }
                result = events.created.changed() => {
                    if result.is_err() {
                        warn!("Notification stream closed");
                        return Err(PulseError::SubscriptionLost.into());
                    }
                    if let Some(event) = *events.created.borrow_and_update() {
                        debug!(?event, "Entity created");
                    }
                }
                result = events.removed.changed() => {
                    if result.is_err() {
                        warn!("Notification stream closed");
                        return Err(PulseError::SubscriptionLost.into());
                    }
                    if let Some(event) = *events.removed.borrow_and_update() {
                        debug!(?event, "Entity removed");
                    }
                }
                result = events.changed.changed() => {
                    if result.is_err() {
                        warn!("Notification stream closed");
                        return Err(PulseError::SubscriptionLost.into());
                    }
                    let event = *events.changed.borrow_and_update();
                    if let Some(event) = event {
                        if let Err(e) = self.handle_change(event).await {
                            error!(error = %e, ?event, "Error refreshing after notification");
                        }
                    }
                }
            }
        }
    }

    /// Map a change notification to its refresh operations, then gate a
    /// granular publish on the detected changes.
    ///
    /// An error aborts this iteration's aggregation; refreshes that already
    /// ran keep their effect on the mirror.
    async fn handle_change(&self, event: ServerEvent) -> BridgeResult<()> {
        info!(facility = ?event.facility, index = event.index, "Entity change notification");
        let mut changes = DetectedChanges::default();

        match event.facility {
            Facility::Sink => {
                changes.default_sink = self.mirror.refresh_default_sink().await?;
                changes.sinks = self.mirror.refresh_sinks().await?;
            }
            Facility::Source => {
                changes.default_source = self.mirror.refresh_default_source().await?;
                changes.active_profile = self.mirror.refresh_active_profile().await?;
                changes.sources = self.mirror.refresh_sources().await?;
            }
            Facility::SinkInput => {
                changes.default_sink = self.mirror.refresh_default_sink().await?;
                changes.sink_inputs = self.mirror.refresh_sink_inputs().await?;
            }
            Facility::Client => {
                changes.clients = self.mirror.refresh_clients().await?;
            }
            Facility::Card => {
                changes.cards = self.mirror.refresh_active_profile().await?;
            }
            Facility::SourceOutput
            | Facility::Module
            | Facility::Server
            | Facility::Unknown(_) => {}
        }

        debug!(?changes, "Change detection outcome");
        if changes.any_changed() {
            info!("State change detected");
            let snapshot = self.mirror.snapshot().await;
            self.publisher.publish_granular(&snapshot, changes).await;
        }
        Ok(())
    }

    /// Handle one inbound bus message addressed to this bridge.
    ///
    /// Malformed payloads are logged and dropped without side effects. The
    /// consumed acknowledgement goes out once the payload has parsed, before
    /// the command is applied.
    pub async fn handle_message(&self, full_topic: &str, payload: &[u8]) {
        let Some(suffix) = self.strip_topic_prefix(full_topic) else {
            warn!(topic = full_topic, "Message outside installation prefix");
            return;
        };

        let command = match Command::parse(suffix, payload) {
            Ok(Some(command)) => command,
            Ok(None) => return,
            Err(e) => {
                error!(topic = suffix, error = %e, "Dropping malformed command");
                return;
            }
        };

        self.publisher.publish_ack(&command.ack_topic()).await;

        let _gate = self.command_gate.lock().await;
        if let Err(e) = self.execute(&command).await {
            error!(?command, error = %e, "Command failed");
        }
    }

    async fn execute(&self, command: &Command) -> BridgeResult<()> {
        match command {
            Command::SetDefaultSink { sink } => {
                self.server.set_default_sink(sink).await?;
            }
            Command::SetMute { mute } => {
                let sink = self.default_sink().await?;
                self.server.set_sink_mute(sink.index, *mute).await?;
            }
            Command::SetVolume { percent } => {
                let sink = self.default_sink().await?;
                let scale = volume_scale(sink.base_volume);
                let percent = percent.clamp(0.0, 100.0);
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                let target = (f64::from(scale) * percent / 100.0).round() as u32;
                let channels = sink.channel_volumes.len().max(1);
                self.server.set_sink_volume(sink.index, vec![target; channels]).await?;
            }
            Command::ChangeVolume { percent } => {
                let sink = self.default_sink().await?;
                let scale = volume_scale(sink.base_volume);
                #[allow(clippy::cast_possible_truncation)]
                let mut step = percent.round() as i32;
                if step == 0 && *percent != 0.0 {
                    // A fractional percentage still moves by the minimum step.
                    step = if percent.is_sign_positive() { 1 } else { -1 };
                }
                let volumes = sink
                    .channel_volumes
                    .iter()
                    .map(|&current| bounded_increment(current, step, 0, scale))
                    .collect();
                self.server.set_sink_volume(sink.index, volumes).await?;
            }
            Command::SetCardProfile { card_index, profile } => {
                self.server.set_card_profile(*card_index, profile).await?;
            }
            Command::MoveSinkInput { sink_input_index, sink } => {
                self.server.move_sink_input(*sink_input_index, sink).await?;
            }
            Command::Initialize => {
                self.reinitialize().await;
            }
        }
        Ok(())
    }

    async fn default_sink(&self) -> BridgeResult<pulsebridge_core::entity::Sink> {
        self.mirror.default_sink().await.ok_or(BridgeError::NoDefaultSink)
    }

    fn strip_topic_prefix<'a>(&self, full_topic: &'a str) -> Option<&'a str> {
        if self.topic_prefix.trim().is_empty() {
            Some(full_topic)
        } else {
            full_topic
                .strip_prefix(self.topic_prefix.as_str())
                .and_then(|rest| rest.strip_prefix('/'))
        }
    }
}

fn volume_scale(base_volume: u32) -> u32 {
    if base_volume == 0 { VOLUME_NORM } else { base_volume }
}

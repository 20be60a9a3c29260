//! In-memory fakes for the two external collaborators.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use pulsebridge_pulse::{
    CardInfo, ClientInfo, EventBroadcaster, EventReceivers, PulseError, PulseResult, PulseServer,
    ServerEvent, SinkInfo, SinkInputInfo, SourceInfo, event_channels,
};

use crate::bus::{BusError, MessageBus};

/// In-memory audio server with programmable inventory.
#[derive(Default)]
pub struct FakeServer {
    sinks: Mutex<Vec<SinkInfo>>,
    sources: Mutex<Vec<SourceInfo>>,
    sink_inputs: Mutex<Vec<SinkInputInfo>>,
    clients: Mutex<Vec<ClientInfo>>,
    cards: Mutex<Vec<CardInfo>>,
    default_sink: Mutex<SinkInfo>,
    default_source: Mutex<SourceInfo>,
    fail_queries: AtomicBool,
    fail_sink_queries: AtomicBool,
    fail_subscribe: AtomicBool,
    requests: Mutex<Vec<String>>,
    close_calls: AtomicU32,
    broadcaster: Mutex<Option<EventBroadcaster>>,
}

impl FakeServer {
    pub fn set_sinks(&self, sinks: Vec<SinkInfo>) {
        *self.sinks.lock().unwrap() = sinks;
    }

    pub fn set_sources(&self, sources: Vec<SourceInfo>) {
        *self.sources.lock().unwrap() = sources;
    }

    pub fn set_sink_inputs(&self, sink_inputs: Vec<SinkInputInfo>) {
        *self.sink_inputs.lock().unwrap() = sink_inputs;
    }

    pub fn set_clients(&self, clients: Vec<ClientInfo>) {
        *self.clients.lock().unwrap() = clients;
    }

    pub fn set_cards(&self, cards: Vec<CardInfo>) {
        *self.cards.lock().unwrap() = cards;
    }

    pub fn set_default_sink(&self, sink: SinkInfo) {
        *self.default_sink.lock().unwrap() = sink;
    }

    pub fn set_default_source(&self, source: SourceInfo) {
        *self.default_source.lock().unwrap() = source;
    }

    pub fn fail_queries(&self, fail: bool) {
        self.fail_queries.store(fail, Ordering::SeqCst);
    }

    /// Fail only the sink list query, leaving the other categories healthy.
    pub fn fail_sink_queries(&self, fail: bool) {
        self.fail_sink_queries.store(fail, Ordering::SeqCst);
    }

    pub fn fail_subscribe(&self, fail: bool) {
        self.fail_subscribe.store(fail, Ordering::SeqCst);
    }

    /// Control requests received so far, in order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    pub fn close_calls(&self) -> u32 {
        self.close_calls.load(Ordering::SeqCst)
    }

    /// Deliver a notification through the channels handed out by `subscribe`.
    pub fn dispatch_event(&self, event: ServerEvent) {
        if let Some(broadcaster) = self.broadcaster.lock().unwrap().as_ref() {
            broadcaster.dispatch(event);
        }
    }

    fn check(&self) -> PulseResult<()> {
        if self.fail_queries.load(Ordering::SeqCst) {
            Err(PulseError::Request("injected failure".to_string()))
        } else {
            Ok(())
        }
    }

    fn record(&self, request: String) {
        self.requests.lock().unwrap().push(request);
    }
}

#[async_trait]
impl PulseServer for FakeServer {
    async fn list_sinks(&self) -> PulseResult<Vec<SinkInfo>> {
        self.check()?;
        if self.fail_sink_queries.load(Ordering::SeqCst) {
            return Err(PulseError::Request("injected sink query failure".to_string()));
        }
        Ok(self.sinks.lock().unwrap().clone())
    }

    async fn list_sources(&self) -> PulseResult<Vec<SourceInfo>> {
        self.check()?;
        Ok(self.sources.lock().unwrap().clone())
    }

    async fn list_sink_inputs(&self) -> PulseResult<Vec<SinkInputInfo>> {
        self.check()?;
        Ok(self.sink_inputs.lock().unwrap().clone())
    }

    async fn list_clients(&self) -> PulseResult<Vec<ClientInfo>> {
        self.check()?;
        Ok(self.clients.lock().unwrap().clone())
    }

    async fn list_cards(&self) -> PulseResult<Vec<CardInfo>> {
        self.check()?;
        Ok(self.cards.lock().unwrap().clone())
    }

    async fn default_sink(&self) -> PulseResult<SinkInfo> {
        self.check()?;
        Ok(self.default_sink.lock().unwrap().clone())
    }

    async fn default_source(&self) -> PulseResult<SourceInfo> {
        self.check()?;
        Ok(self.default_source.lock().unwrap().clone())
    }

    async fn set_default_sink(&self, name: &str) -> PulseResult<()> {
        self.check()?;
        self.record(format!("set_default_sink {name}"));
        Ok(())
    }

    async fn set_sink_mute(&self, sink_index: u32, mute: bool) -> PulseResult<()> {
        self.check()?;
        self.record(format!("set_sink_mute {sink_index} {mute}"));
        Ok(())
    }

    async fn set_sink_volume(&self, sink_index: u32, channel_volumes: Vec<u32>) -> PulseResult<()> {
        self.check()?;
        self.record(format!("set_sink_volume {sink_index} {channel_volumes:?}"));
        Ok(())
    }

    async fn set_card_profile(&self, card_index: u32, profile: &str) -> PulseResult<()> {
        self.check()?;
        self.record(format!("set_card_profile {card_index} {profile}"));
        Ok(())
    }

    async fn move_sink_input(&self, sink_input_index: u32, sink_name: &str) -> PulseResult<()> {
        self.check()?;
        self.record(format!("move_sink_input {sink_input_index} {sink_name}"));
        Ok(())
    }

    async fn subscribe(&self) -> PulseResult<EventReceivers> {
        if self.fail_subscribe.load(Ordering::SeqCst) {
            return Err(PulseError::Connection("injected subscribe failure".to_string()));
        }
        let (broadcaster, receivers) = event_channels();
        *self.broadcaster.lock().unwrap() = Some(broadcaster);
        Ok(receivers)
    }

    async fn close(&self) {
        self.close_calls.fetch_add(1, Ordering::SeqCst);
        // Dropping the broadcaster closes the notification channels.
        *self.broadcaster.lock().unwrap() = None;
    }
}

/// A published message captured by [`RecordingBus`].
#[derive(Debug, Clone)]
pub struct PublishedMessage {
    pub topic: String,
    pub payload: Vec<u8>,
    pub retain: bool,
}

/// Message bus that records everything published to it.
#[derive(Default)]
pub struct RecordingBus {
    published: Mutex<Vec<PublishedMessage>>,
}

impl RecordingBus {
    pub fn published(&self) -> Vec<PublishedMessage> {
        self.published.lock().unwrap().clone()
    }

    pub fn topics(&self) -> Vec<String> {
        self.published.lock().unwrap().iter().map(|m| m.topic.clone()).collect()
    }

    pub fn clear(&self) {
        self.published.lock().unwrap().clear();
    }
}

#[async_trait]
impl MessageBus for RecordingBus {
    async fn publish(&self, topic: &str, payload: Vec<u8>, retain: bool) -> Result<(), BusError> {
        self.published.lock().unwrap().push(PublishedMessage {
            topic: topic.to_string(),
            payload,
            retain,
        });
        Ok(())
    }
}

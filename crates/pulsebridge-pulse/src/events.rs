//! Server notification model and single-slot delivery channels.
//!
//! Notifications are delivered per class through single-slot channels: a
//! notification the reactor has not drained yet is overwritten by the next
//! one of the same class. Bursts coalesce, and the mirror converges after
//! the last delivered notification of a burst.

use tokio::sync::watch;

/// Notification class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventClass {
    /// An entity appeared on the server
    Created,
    /// An entity disappeared from the server
    Removed,
    /// An entity's observable state changed
    Changed,
}

/// Which kind of entity a notification concerns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facility {
    Sink,
    Source,
    SinkInput,
    SourceOutput,
    Module,
    Client,
    Server,
    Card,
    Unknown(u32),
}

impl Facility {
    /// Decode the wire facility code.
    #[must_use]
    pub fn from_raw(raw: u32) -> Self {
        match raw {
            0 => Self::Sink,
            1 => Self::Source,
            2 => Self::SinkInput,
            3 => Self::SourceOutput,
            4 => Self::Module,
            5 => Self::Client,
            7 => Self::Server,
            9 => Self::Card,
            other => Self::Unknown(other),
        }
    }
}

/// One asynchronous notification from the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerEvent {
    pub class: EventClass,
    pub facility: Facility,
    /// Index of the entity the notification concerns
    pub index: u32,
}

/// Receiving half of the per-class notification channels.
#[derive(Debug)]
pub struct EventReceivers {
    pub created: watch::Receiver<Option<ServerEvent>>,
    pub removed: watch::Receiver<Option<ServerEvent>>,
    pub changed: watch::Receiver<Option<ServerEvent>>,
}

/// Sending half, driven by the concrete server connection.
#[derive(Debug)]
pub struct EventBroadcaster {
    created: watch::Sender<Option<ServerEvent>>,
    removed: watch::Sender<Option<ServerEvent>>,
    changed: watch::Sender<Option<ServerEvent>>,
}

impl EventBroadcaster {
    /// Deliver a notification into its class slot, replacing any undrained
    /// notification of the same class.
    pub fn dispatch(&self, event: ServerEvent) {
        let slot = match event.class {
            EventClass::Created => &self.created,
            EventClass::Removed => &self.removed,
            EventClass::Changed => &self.changed,
        };
        slot.send_replace(Some(event));
    }
}

/// Create a connected broadcaster/receiver pair.
#[must_use]
pub fn event_channels() -> (EventBroadcaster, EventReceivers) {
    let (created_tx, created_rx) = watch::channel(None);
    let (removed_tx, removed_rx) = watch::channel(None);
    let (changed_tx, changed_rx) = watch::channel(None);
    (
        EventBroadcaster { created: created_tx, removed: removed_tx, changed: changed_tx },
        EventReceivers { created: created_rx, removed: removed_rx, changed: changed_rx },
    )
}

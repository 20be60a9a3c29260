//! Pulsebridge Core - mirrored entity model, change detection, and volume math.
//!
//! This crate contains the typed model of the audio server's mixing topology
//! that the bridge keeps as its local mirror, plus the pure logic shared by
//! the mirror and the command path.

pub mod changes;
pub mod entity;
pub mod state;
pub mod volume;

pub use changes::DetectedChanges;
pub use entity::{Card, CardPort, CardProfile, Client, DeviceState, Sink, SinkInput, Source};
pub use state::AudioState;
pub use volume::bounded_increment;

//! Per-category change flags produced by one refresh pass.

/// Which snapshot categories changed during one refresh pass.
///
/// Exactly one value is produced per reactor iteration; the publisher uses
/// it to gate the granular per-category topics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[allow(clippy::struct_excessive_bools)]
pub struct DetectedChanges {
    pub default_sink: bool,
    pub default_source: bool,
    pub active_profile: bool,
    pub sinks: bool,
    pub sink_inputs: bool,
    pub clients: bool,
    pub cards: bool,
    pub sources: bool,
}

impl DetectedChanges {
    /// Every flag forced true, for a full-state publish.
    #[must_use]
    pub fn all() -> Self {
        Self {
            default_sink: true,
            default_source: true,
            active_profile: true,
            sinks: true,
            sink_inputs: true,
            clients: true,
            cards: true,
            sources: true,
        }
    }

    /// Whether any category changed.
    #[must_use]
    pub fn any_changed(&self) -> bool {
        self.default_sink
            || self.default_source
            || self.active_profile
            || self.sinks
            || self.sink_inputs
            || self.clients
            || self.cards
            || self.sources
    }
}

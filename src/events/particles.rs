use bevy_ecs::prelude::*;

/// Event emitted when an emitter's last live particle dies.
///
/// Fires once per transition from a non-empty to an empty pool, so a one-shot
/// burst can be cleaned up when it has fully faded.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmitterDrainedEvent {
    /// The entity owning the emitter.
    pub entity: Entity,
}

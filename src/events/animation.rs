//! Animation completion events.
//!
//! When an [`Animation`](crate::components::animation::Animation) exhausts its
//! loop policy, the animation system triggers an [`AnimationFinishedEvent`]
//! for the owning entity. Static single-frame animations never trigger it.
//!
//! # Example
//!
//! ```ignore
//! world.add_observer(|trigger: On<AnimationFinishedEvent>, mut commands: Commands| {
//!     commands.entity(trigger.event().entity).despawn();
//! });
//! ```

use bevy_ecs::prelude::*;

/// Event emitted on the tick an animation becomes finished.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationFinishedEvent {
    /// The entity whose animation finished.
    pub entity: Entity,
}

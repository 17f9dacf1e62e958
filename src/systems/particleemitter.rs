//! Particle emitter system.
//!
//! Advances every [`ParticleEmitter`] pool by the scaled world delta.
//!
//! # Behavior
//!
//! - If the entity has a [`MapPosition`], the emitter origin follows it
//!   (plus the emitter's `offset`) before the pool is ticked
//! - Spawning, aging and movement happen inside the pool itself; particles are
//!   not entities
//! - An [`EmitterDrainedEvent`] is triggered when the live count drops to zero

use bevy_ecs::prelude::*;

use crate::components::mapposition::MapPosition;
use crate::components::particleemitter::ParticleEmitter;
use crate::events::particles::EmitterDrainedEvent;
use crate::resources::worldtime::WorldTime;

/// System that ticks particle pools.
pub fn particle_emitter_system(
    mut emitter_query: Query<(Entity, &mut ParticleEmitter, Option<&MapPosition>)>,
    time: Res<WorldTime>,
    mut commands: Commands,
) {
    let dt = time.delta; // delta is already scaled
    if dt <= 0.0 {
        return;
    }

    for (entity, mut emitter, maybe_pos) in emitter_query.iter_mut() {
        if let Some(owner_pos) = maybe_pos {
            let origin = owner_pos.pos + emitter.offset;
            emitter.set_origin(origin.x, origin.y);
        }

        let before = emitter.active_particles();
        emitter.update(dt);
        if before > 0 && emitter.active_particles() == 0 {
            commands.trigger(EmitterDrainedEvent { entity });
        }
    }
}

use bevy_ecs::prelude::*;

use crate::components::effects::Effects;
use crate::resources::worldtime::WorldTime;

/// Tick every entity's effects and drop the finished ones.
pub fn effects_system(mut query: Query<&mut Effects>, time: Res<WorldTime>) {
    for mut effects in query.iter_mut() {
        if !effects.is_empty() {
            effects.update(time.delta);
        }
    }
}

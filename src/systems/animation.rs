//! Animation system.
//!
//! # Animation Flow
//!
//! 1. Templates are loaded into [`AnimationStore`](crate::resources::animationstore::AnimationStore)
//! 2. Entities get an [`Animation`] instantiated from a template, plus usually a [`Sprite`]
//! 3. [`animation_system`] advances playback by the scaled world delta and
//!    copies the active frame into the sprite
//! 4. On the finishing tick an [`AnimationFinishedEvent`] is triggered
//!
//! # Related
//!
//! - [`crate::components::animation::Animation`] – per-entity playback state
//! - [`crate::events::animation::AnimationFinishedEvent`] – completion notification

use bevy_ecs::prelude::*;

use crate::components::animation::Animation;
use crate::components::sprite::Sprite;
use crate::events::animation::AnimationFinishedEvent;
use crate::resources::worldtime::WorldTime;

/// Advance animation playback and update the sprite frame.
///
/// Contract
/// - Reads [`WorldTime`] for the scaled delta.
/// - Mutates [`Animation`] state and, when present, the [`Sprite`] source rect.
/// - Triggers [`AnimationFinishedEvent`] once per completed playback.
pub fn animation_system(
    mut query: Query<(Entity, &mut Animation, Option<&mut Sprite>)>,
    time: Res<WorldTime>,
    mut commands: Commands,
) {
    for (entity, mut anim, maybe_sprite) in query.iter_mut() {
        if anim.update(time.delta) {
            commands.trigger(AnimationFinishedEvent { entity });
        }

        if let Some(mut sprite) = maybe_sprite {
            let rect = anim.current_rect();
            if sprite.source != rect || &*sprite.image_key != anim.image_key() {
                sprite.source = rect;
                sprite.image_key = anim.template().image_key().clone();
            }
        }
    }
}

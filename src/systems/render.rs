use bevy_ecs::prelude::*;

use crate::components::effects::Effects;
use crate::components::mapposition::MapPosition;
use crate::components::particleemitter::ParticleEmitter;
use crate::components::sprite::Sprite;
use crate::components::zindex::ZIndex;
use crate::render::{DrawTarget, DrawTransform};

/// Draw the world through a host-supplied target.
///
/// Sprites with a [`MapPosition`] are drawn first, sorted by [`ZIndex`], with
/// their [`Effects`] folded into the transform. Particle pools are drawn
/// afterwards so particles sit on top of sprites.
pub fn render_pass<T: DrawTarget + ?Sized>(world: &mut World, target: &mut T) {
    // Query: (Sprite, Position, ZIndex, Effects)
    // We'll build transforms, sort by z, then draw.
    let mut to_draw: Vec<(Sprite, DrawTransform, ZIndex)> = {
        let mut q =
            world.query::<(&Sprite, &MapPosition, Option<&ZIndex>, Option<&Effects>)>();
        q.iter(world)
            .map(|(s, p, z, fx)| {
                let mut transform = DrawTransform::at(p.pos)
                    .with_origin(s.origin)
                    .with_flip(s.flip_h, s.flip_v);
                if let Some(effects) = fx {
                    effects.contribute(&mut transform);
                }
                (s.clone(), transform, z.copied().unwrap_or_default())
            })
            .collect()
    };

    to_draw.sort_by_key(|(_, _, z)| *z);

    for (sprite, transform, _z) in to_draw.iter() {
        target.draw_region(&sprite.image_key, sprite.source, transform);
    }

    let mut emitters = world.query::<&ParticleEmitter>();
    for emitter in emitters.iter(world) {
        emitter.draw(target, &DrawTransform::default());
    }
}

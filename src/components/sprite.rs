use std::sync::Arc;

use bevy_ecs::prelude::Component;
use glam::Vec2;

use crate::components::animation::Animation;
use crate::resources::atlas::FrameRect;

/// Sprite is identified by an image key and the region of that image to draw.
/// When the entity also has an [`Animation`], the animation system rewrites
/// `source` with the active frame every tick.
/// The origin selects the pivot point (in pixels) relative to the region's
/// top-left used for placement/rotation/scaling when rendering.
#[derive(Component, Clone, Debug, PartialEq)]
pub struct Sprite {
    pub image_key: Arc<str>,
    pub source: FrameRect,
    pub origin: Vec2,
    pub flip_h: bool,
    pub flip_v: bool,
}

impl Sprite {
    pub fn new(image_key: impl Into<Arc<str>>, source: FrameRect) -> Self {
        Self {
            image_key: image_key.into(),
            source,
            origin: Vec2::ZERO,
            flip_h: false,
            flip_v: false,
        }
    }

    /// Sprite showing the animation's current frame, pivoted at its centre.
    pub fn from_animation(animation: &Animation) -> Self {
        let source = animation.current_rect();
        Self {
            image_key: animation.template().image_key().clone(),
            source,
            origin: Vec2::new(source.width as f32 / 2.0, source.height as f32 / 2.0),
            flip_h: false,
            flip_v: false,
        }
    }

    pub fn width(&self) -> u32 {
        self.source.width
    }

    pub fn height(&self) -> u32 {
        self.source.height
    }
}

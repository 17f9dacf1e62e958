//! Draw seam between the simulation and a host renderer.
//!
//! Components never touch a graphics API. They describe what to draw as an
//! image key plus a source [`FrameRect`] and a [`DrawTransform`], and hand
//! that to a [`DrawTarget`] supplied by the host. [`RecordingTarget`] is a
//! headless implementation that just keeps the calls.

use glam::Vec2;

use crate::resources::atlas::FrameRect;

/// Placement of one draw call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawTransform {
    /// World position of the pivot.
    pub position: Vec2,
    /// Extra displacement (screen shake and similar).
    pub offset: Vec2,
    pub scale: Vec2,
    /// Rotation in radians.
    pub rotation: f32,
    /// Pivot in pixels relative to the region's top-left.
    pub origin: Vec2,
    pub flip_h: bool,
    pub flip_v: bool,
    /// White overlay intensity in `[0, 1]`.
    pub flash: f32,
}

impl Default for DrawTransform {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            offset: Vec2::ZERO,
            scale: Vec2::ONE,
            rotation: 0.0,
            origin: Vec2::ZERO,
            flip_h: false,
            flip_v: false,
            flash: 0.0,
        }
    }
}

impl DrawTransform {
    pub fn at(position: Vec2) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    pub fn with_origin(mut self, origin: Vec2) -> Self {
        self.origin = origin;
        self
    }

    pub fn with_flip(mut self, flip_h: bool, flip_v: bool) -> Self {
        self.flip_h = flip_h;
        self.flip_v = flip_v;
        self
    }

    /// Final position after applying the offset.
    pub fn screen_position(&self) -> Vec2 {
        self.position + self.offset
    }
}

/// Host-side renderer.
pub trait DrawTarget {
    /// Draw `source` from the named image.
    fn draw_region(&mut self, image_key: &str, source: FrameRect, transform: &DrawTransform);

    /// Draw a visual-less particle. Ignored unless the host cares.
    fn draw_point(&mut self, _transform: &DrawTransform) {}
}

/// One recorded [`DrawTarget::draw_region`] call.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCall {
    pub image_key: String,
    pub source: FrameRect,
    pub transform: DrawTransform,
}

/// Headless target that records every call.
#[derive(Debug, Default, Clone)]
pub struct RecordingTarget {
    pub calls: Vec<DrawCall>,
    pub points: usize,
}

impl RecordingTarget {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.calls.clear();
        self.points = 0;
    }

    /// Region and point draws together.
    pub fn total(&self) -> usize {
        self.calls.len() + self.points
    }
}

impl DrawTarget for RecordingTarget {
    fn draw_region(&mut self, image_key: &str, source: FrameRect, transform: &DrawTransform) {
        self.calls.push(DrawCall {
            image_key: image_key.to_string(),
            source,
            transform: *transform,
        });
    }

    fn draw_point(&mut self, _transform: &DrawTransform) {
        self.points += 1;
    }
}

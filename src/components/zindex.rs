use bevy_ecs::prelude::Component;

/// Draw order for sprites in the render pass.
///
/// Higher values are drawn later (on top). Sprites without a `ZIndex` draw
/// at 0; ties keep query order.
#[derive(Component, Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ZIndex(pub i32);

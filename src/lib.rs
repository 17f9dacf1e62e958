//! Spriteflow library.
//!
//! Sprite-sheet animation playback and pooled particle emitters on top of
//! `bevy_ecs`. This module exposes the components, resources, systems and
//! events for use by host programs and integration tests.

pub mod components;
pub mod easing;
pub mod errors;
pub mod events;
pub mod render;
pub mod resources;
pub mod systems;

//! ECS components for entities.
//!
//! Submodules overview:
//! - [`animation`] – sprite-sheet playback state driven by an eased tween
//! - [`effects`] – shake and flash effects layered over a sprite
//! - [`mapposition`] – world-space position (pivot) for an entity
//! - [`particleemitter`] – fixed-capacity particle pool
//! - [`sprite`] – image region drawn for an entity
//! - [`tween`] – scalar tween and tween sequence drivers
//! - [`zindex`] – rendering order hint for 2D drawing

pub mod animation;
pub mod effects;
pub mod mapposition;
pub mod particleemitter;
pub mod sprite;
pub mod tween;
pub mod zindex;

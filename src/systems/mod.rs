//! Engine systems.
//!
//! This module groups the ECS systems that advance playback and draw the
//! result.
//!
//! Submodules overview
//! - [`animation`] – advance sprite animations and copy the active frame into sprites
//! - [`effects`] – tick shake and flash effects
//! - [`particleemitter`] – follow owners and tick particle pools
//! - [`render`] – draw sprites and particles through a [`DrawTarget`](crate::render::DrawTarget)
//! - [`time`] – update simulation time and delta

pub mod animation;
pub mod effects;
pub mod particleemitter;
pub mod render;
pub mod time;

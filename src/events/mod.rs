//! Event types triggered by the systems.
//!
//! Events let the host react to playback milestones without polling
//! components every tick. They are triggered through `Commands` and delivered
//! to observers registered with `World::add_observer`.
//!
//! Submodules:
//! - [`animation`] – an animation exhausted its loop policy
//! - [`particles`] – an emitter's pool became empty
pub mod animation;
pub mod particles;

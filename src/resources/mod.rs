//! ECS resources made available to systems.
//!
//! Long-lived data injected into the ECS world: timing, asset registries and
//! settings. Each submodule documents the semantics of its resource(s).
//!
//! Overview
//! - `animationstore` – shared animation templates and named sections
//! - `assetconfig` – JSON asset document and loader
//! - `atlas` – sprite-sheet slicing into frame rectangles
//! - `imagestore` – image sizes keyed by name, behind the `ImageProvider` seam
//! - `simconfig` – INI simulation settings
//! - `worldtime` – simulation time and delta
pub mod animationstore;
pub mod assetconfig;
pub mod atlas;
pub mod imagestore;
pub mod simconfig;
pub mod worldtime;

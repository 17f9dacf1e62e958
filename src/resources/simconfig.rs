//! Simulation settings resource.
//!
//! Settings for the fixed-step driver loaded from an INI file. Defaults are
//! safe to run with when the file is missing or incomplete.
//!
//! # Configuration File Format
//!
//! ```ini
//! [simulation]
//! tps = 60
//! time_scale = 1.0
//! ticks = 300
//! seed = 24301
//!
//! [assets]
//! config = ./assets/config.json
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::info;
use std::path::PathBuf;

use crate::errors::{Result, SpriteFlowError};

/// Default safe values for startup
const DEFAULT_TPS: u32 = 60;
const DEFAULT_TIME_SCALE: f32 = 1.0;
const DEFAULT_TICKS: u32 = 300;
const DEFAULT_SEED: u64 = 0x5eed;
const DEFAULT_ASSETS_PATH: &str = "./assets/config.json";
const DEFAULT_CONFIG_PATH: &str = "./config.ini";

/// Simulation configuration resource.
#[derive(Resource, Debug, Clone)]
pub struct SimConfig {
    /// Simulation ticks per second; each tick advances `1 / tps` seconds.
    pub tps: u32,
    /// Multiplier applied to every tick delta.
    pub time_scale: f32,
    /// Number of ticks the demo driver runs.
    pub ticks: u32,
    /// Seed for emitter and effect RNGs.
    pub seed: u64,
    /// Path to the JSON asset document.
    pub assets_path: PathBuf,
    /// Path to the INI file itself.
    pub config_path: PathBuf,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl SimConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            tps: DEFAULT_TPS,
            time_scale: DEFAULT_TIME_SCALE,
            ticks: DEFAULT_TICKS,
            seed: DEFAULT_SEED,
            assets_path: PathBuf::from(DEFAULT_ASSETS_PATH),
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current values. Returns an error if the
    /// file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<()> {
        let mut config = Ini::new();
        config.load(&self.config_path).map_err(|e| {
            SpriteFlowError::ConfigFile(format!("failed to load config file: {}", e))
        })?;

        // [simulation] section
        if let Some(tps) = config.getuint("simulation", "tps").ok().flatten() {
            self.tps = u32::try_from(tps).unwrap_or(u32::MAX).max(1);
        }
        if let Some(scale) = config.getfloat("simulation", "time_scale").ok().flatten() {
            self.time_scale = scale as f32;
        }
        if let Some(ticks) = config.getuint("simulation", "ticks").ok().flatten() {
            self.ticks = u32::try_from(ticks).unwrap_or(u32::MAX);
        }
        if let Some(seed) = config.getuint("simulation", "seed").ok().flatten() {
            self.seed = seed;
        }

        // [assets] section
        if let Some(path) = config.get("assets", "config") {
            self.assets_path = PathBuf::from(path);
        }

        info!(
            "Loaded config: tps={}, time_scale={}, ticks={}, seed={}, assets={:?}",
            self.tps, self.time_scale, self.ticks, self.seed, self.assets_path
        );

        Ok(())
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<()> {
        let mut config = Ini::new();

        config.set("simulation", "tps", Some(self.tps.to_string()));
        config.set("simulation", "time_scale", Some(self.time_scale.to_string()));
        config.set("simulation", "ticks", Some(self.ticks.to_string()));
        config.set("simulation", "seed", Some(self.seed.to_string()));
        config.set(
            "assets",
            "config",
            Some(self.assets_path.to_string_lossy().into_owned()),
        );

        config.write(&self.config_path).map_err(|e| {
            SpriteFlowError::ConfigFile(format!("failed to save config file: {}", e))
        })?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }

    /// Fixed tick length in seconds.
    pub fn tick_seconds(&self) -> f32 {
        1.0 / self.tps.max(1) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = SimConfig::new();
        assert_eq!(cfg.tps, 60);
        assert_eq!(cfg.ticks, 300);
        assert_eq!(cfg.seed, 0x5eed);
        assert!((cfg.tick_seconds() - 1.0 / 60.0).abs() < 1e-6);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let mut cfg = SimConfig::with_path("/nonexistent/spriteflow/config.ini");
        assert!(matches!(
            cfg.load_from_file(),
            Err(SpriteFlowError::ConfigFile(_))
        ));
        assert_eq!(cfg.tps, 60);
    }

    #[test]
    fn test_save_then_load_keeps_values() {
        let path = std::env::temp_dir().join(format!(
            "spriteflow_simconfig_{}.ini",
            std::process::id()
        ));
        let mut cfg = SimConfig::with_path(&path);
        cfg.tps = 30;
        cfg.ticks = 12;
        cfg.seed = 99;
        cfg.time_scale = 0.5;
        cfg.save_to_file().unwrap();

        let mut loaded = SimConfig::with_path(&path);
        loaded.load_from_file().unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(loaded.tps, 30);
        assert_eq!(loaded.ticks, 12);
        assert_eq!(loaded.seed, 99);
        assert!((loaded.time_scale - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_oversized_counts_saturate() {
        let path = std::env::temp_dir().join(format!(
            "spriteflow_simconfig_big_{}.ini",
            std::process::id()
        ));
        std::fs::write(&path, "[simulation]\ntps = 4294967297\nticks = 8589934592\n").unwrap();

        let mut cfg = SimConfig::with_path(&path);
        cfg.load_from_file().unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(cfg.tps, u32::MAX);
        assert_eq!(cfg.ticks, u32::MAX);
    }
}

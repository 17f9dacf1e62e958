//! JSON asset document.
//!
//! Describes images, scan sections, animations and particle emitters in one
//! camelCase JSON file:
//!
//! ```json
//! {
//!   "resourceRoot": "./assets",
//!   "images": { "knight": { "width": 256, "height": 64 } },
//!   "sections": { "knight_idle": { "left": 0, "top": 0, "width": 256, "height": 32 } },
//!   "animations": {
//!     "idle": {
//!       "image": "knight", "section": "knight_idle",
//!       "width": 32, "height": 32, "frames": [0, 1, 2, 3],
//!       "durationMs": 600, "easeFunc": "Linear", "loops": -1
//!     }
//!   },
//!   "emitters": { "sparks": { "capacity": 64, "rate": 40.0, "image": "spark" } },
//!   "defaultAnimation": "idle"
//! }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::components::animation::LoopPolicy;
use crate::errors::Result;
use crate::resources::atlas::Section;
use crate::resources::imagestore::ImageSize;

/// Duration used when an animation omits both `duration` and `durationMs`.
pub const DEFAULT_ANIMATION_DURATION: f32 = 1.0;

/// Top-level asset document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResourceConfig {
    pub resource_root: Option<String>,
    pub images: BTreeMap<String, ImageSize>,
    pub sections: BTreeMap<String, Section>,
    pub animations: BTreeMap<String, AnimationConfig>,
    pub emitters: BTreeMap<String, EmitterConfig>,
    pub default_animation: Option<String>,
}

/// One animation entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimationConfig {
    #[serde(alias = "imageName")]
    pub image: String,
    #[serde(alias = "sectionName")]
    pub section: String,
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    pub frames: Vec<usize>,
    /// Cycle length in seconds.
    pub duration: Option<f32>,
    /// Cycle length in milliseconds. Ignored when `duration` is present.
    pub duration_ms: Option<u64>,
    #[serde(default)]
    pub ease_func: String,
    pub looped: Option<bool>,
    /// Negative loops forever, 0 plays once, `n` plays `n` times. Wins over `looped`.
    pub loops: Option<i32>,
}

impl AnimationConfig {
    pub fn duration_secs(&self) -> f32 {
        match (self.duration, self.duration_ms) {
            (Some(secs), _) => secs,
            (None, Some(ms)) => ms as f32 / 1000.0,
            (None, None) => DEFAULT_ANIMATION_DURATION,
        }
    }

    pub fn loop_policy(&self) -> LoopPolicy {
        match (self.loops, self.looped) {
            (Some(loops), _) => LoopPolicy::from_count(loops),
            (None, Some(looped)) => LoopPolicy::from_looped(looped),
            (None, None) => LoopPolicy::None,
        }
    }
}

/// Particle emitter parameters.
///
/// The particle visual is `animation` when set, otherwise the whole of
/// `image`, otherwise an undrawn point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EmitterConfig {
    pub capacity: usize,
    /// Particles per second.
    pub rate: f32,
    /// Emission angle range in radians.
    pub angle: (f32, f32),
    pub speed: (f32, f32),
    /// Particle lifetime range in seconds.
    pub lifetime: (f32, f32),
    /// Offset from the owner's position.
    pub offset: (f32, f32),
    pub image: Option<String>,
    pub animation: Option<String>,
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self {
            capacity: 32,
            rate: 10.0,
            angle: (0.0, std::f32::consts::TAU),
            speed: (25.0, 75.0),
            lifetime: (0.5, 1.0),
            offset: (0.0, 0.0),
            image: None,
            animation: None,
        }
    }
}

/// Read and parse a JSON document.
pub fn load_config_data<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T> {
    let content = fs::read_to_string(path)?;
    let data = serde_json::from_str(&content)?;
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::SpriteFlowError;

    #[test]
    fn test_parses_camel_case_document() {
        let json = r#"{
            "resourceRoot": "./assets",
            "images": { "knight": { "width": 64, "height": 32 } },
            "sections": { "row": { "left": 0, "top": 0, "width": 64, "height": 32 } },
            "animations": {
                "walk": {
                    "imageName": "knight", "sectionName": "row",
                    "width": 32, "height": 32, "frames": [0, 1],
                    "durationMs": 250, "easeFunc": "InQuad", "looped": true
                }
            },
            "defaultAnimation": "walk"
        }"#;
        let cfg: ResourceConfig = serde_json::from_str(json).unwrap();
        assert_eq!(cfg.resource_root.as_deref(), Some("./assets"));
        assert_eq!(cfg.sections["row"].padding, 0);
        let walk = &cfg.animations["walk"];
        assert_eq!(walk.image, "knight");
        assert!((walk.duration_secs() - 0.25).abs() < 1e-6);
        assert_eq!(walk.loop_policy(), LoopPolicy::Infinite);
        assert!(cfg.emitters.is_empty());
    }

    #[test]
    fn test_loops_wins_over_looped() {
        let json = r#"{
            "image": "a", "section": "b", "width": 1, "height": 1,
            "frames": [0], "duration": 2.0, "durationMs": 10,
            "looped": true, "loops": 3
        }"#;
        let anim: AnimationConfig = serde_json::from_str(json).unwrap();
        assert_eq!(anim.loop_policy(), LoopPolicy::Count(3));
        assert!((anim.duration_secs() - 2.0).abs() < 1e-6);
        assert!(anim.ease_func.is_empty());
    }

    #[test]
    fn test_emitter_defaults_fill_missing_fields() {
        let cfg: EmitterConfig = serde_json::from_str(r#"{ "capacity": 8 }"#).unwrap();
        assert_eq!(cfg.capacity, 8);
        assert_eq!(cfg.speed, (25.0, 75.0));
        assert_eq!(cfg.lifetime, (0.5, 1.0));
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = load_config_data::<ResourceConfig>("/nonexistent/spriteflow.json").unwrap_err();
        assert!(matches!(err, SpriteFlowError::Io(_)));
    }
}

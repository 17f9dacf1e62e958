//! Animation template registry.
//!
//! Templates are built once from the asset document and shared through `Arc`
//! by every [`Animation`] instantiated from them. Templates that slice the same
//! image section at the same frame size also share one [`FrameAtlas`].

use std::sync::Arc;

use bevy_ecs::prelude::Resource;
use log::{debug, error, info, warn};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::components::animation::{Animation, LoopPolicy};
use crate::easing::Easing;
use crate::errors::{Result, SpriteFlowError};
use crate::resources::assetconfig::{DEFAULT_ANIMATION_DURATION, ResourceConfig};
use crate::resources::atlas::{FrameAtlas, Section};
use crate::resources::imagestore::ImageProvider;

/// Ordered frame indices; short lists stay inline.
pub type FrameList = SmallVec<[usize; 16]>;

/// Immutable description of an animation, shared by its instances.
///
/// Only [`AnimationTemplate::new`] builds one, so the frame list is never
/// empty and every index exists in the atlas.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationTemplate {
    image_key: Arc<str>,
    atlas: Arc<FrameAtlas>,
    frames: FrameList,
    duration: f32,
    easing: Easing,
    loop_policy: LoopPolicy,
}

impl AnimationTemplate {
    /// Create a linear, play-once template with the default duration.
    ///
    /// Fails if `frames` is empty or references a frame outside `atlas`.
    pub fn new(
        image_key: impl Into<Arc<str>>,
        atlas: Arc<FrameAtlas>,
        frames: &[usize],
    ) -> Result<Self> {
        atlas.check_frames(frames)?;
        Ok(Self {
            image_key: image_key.into(),
            atlas,
            frames: SmallVec::from_slice(frames),
            duration: DEFAULT_ANIMATION_DURATION,
            easing: Easing::Linear,
            loop_policy: LoopPolicy::None,
        })
    }

    pub fn with_duration(mut self, duration: f32) -> Self {
        self.duration = duration.max(0.0);
        self
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn with_loop_policy(mut self, loop_policy: LoopPolicy) -> Self {
        self.loop_policy = loop_policy;
        self
    }

    /// Image key the atlas slices.
    pub fn image_key(&self) -> &Arc<str> {
        &self.image_key
    }

    pub fn atlas(&self) -> &Arc<FrameAtlas> {
        &self.atlas
    }

    pub fn frames(&self) -> &[usize] {
        &self.frames
    }

    /// Cycle length in seconds.
    pub fn duration(&self) -> f32 {
        self.duration
    }

    pub fn easing(&self) -> Easing {
        self.easing
    }

    pub fn loop_policy(&self) -> LoopPolicy {
        self.loop_policy
    }
}

/// Named sections and animation templates.
#[derive(Resource, Debug, Default)]
pub struct AnimationStore {
    pub sections: FxHashMap<String, Section>,
    pub templates: FxHashMap<String, Arc<AnimationTemplate>>,
    /// Animation to use when none is requested by name.
    pub default_animation: Option<String>,
}

type AtlasKey = (String, String, u32, u32);

impl AnimationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build every section and template described by `cfg`.
    ///
    /// Nothing is inserted unless the whole document is valid.
    pub fn load_config(&mut self, cfg: &ResourceConfig, images: &impl ImageProvider) -> Result<()> {
        if cfg.animations.is_empty() {
            return Err(SpriteFlowError::NoAnimations);
        }
        if cfg.sections.is_empty() {
            return Err(SpriteFlowError::NoSections);
        }

        let mut atlases: FxHashMap<AtlasKey, Arc<FrameAtlas>> = FxHashMap::default();
        let mut templates = FxHashMap::default();

        for (name, anim) in &cfg.animations {
            let section = *cfg
                .sections
                .get(&anim.section)
                .ok_or_else(|| SpriteFlowError::UnknownSection(anim.section.clone()))?;
            let size = images
                .image_size(&anim.image)
                .ok_or_else(|| SpriteFlowError::ImageNotLoaded(anim.image.clone()))?;
            let easing: Easing = anim.ease_func.parse()?;

            let key = (anim.image.clone(), anim.section.clone(), anim.width, anim.height);
            let atlas = match atlases.get(&key) {
                Some(atlas) => atlas.clone(),
                None => {
                    let atlas = FrameAtlas::new(
                        size.width,
                        size.height,
                        section,
                        anim.width,
                        anim.height,
                    )
                    .map(Arc::new)
                    .inspect_err(|e| error!("Animation '{}': {}", name, e))?;
                    atlases.insert(key, atlas.clone());
                    atlas
                }
            };

            let template = AnimationTemplate::new(anim.image.as_str(), atlas, &anim.frames)
                .inspect_err(|e| error!("Animation '{}': {}", name, e))?
                .with_duration(anim.duration_secs())
                .with_easing(easing)
                .with_loop_policy(anim.loop_policy());

            debug!(
                "Animation '{}': {} frames, {:.3}s, {}, {:?}",
                name,
                template.frames().len(),
                template.duration(),
                template.easing(),
                template.loop_policy()
            );
            templates.insert(name.clone(), Arc::new(template));
        }

        for (name, section) in &cfg.sections {
            self.sections.insert(name.clone(), *section);
        }
        let count = templates.len();
        self.templates.extend(templates);
        if let Some(default) = &cfg.default_animation {
            if !self.templates.contains_key(default) {
                warn!("Default animation '{}' is not defined", default);
            }
            self.default_animation = Some(default.clone());
        }

        info!(
            "Loaded {} animations over {} atlases ({} sections)",
            count,
            atlases.len(),
            cfg.sections.len()
        );
        Ok(())
    }

    /// Register a template under `name`, replacing any previous one.
    pub fn insert(&mut self, name: impl Into<String>, template: AnimationTemplate) {
        self.templates.insert(name.into(), Arc::new(template));
    }

    pub fn get(&self, name: &str) -> Result<Arc<AnimationTemplate>> {
        self.templates
            .get(name)
            .cloned()
            .ok_or_else(|| SpriteFlowError::UnknownAnimation(name.to_string()))
    }

    /// Create a fresh, stopped playback instance of the named template.
    pub fn instantiate(&self, name: &str) -> Result<Animation> {
        self.get(name).map(Animation::new)
    }

    pub fn section(&self, name: &str) -> Result<Section> {
        self.sections
            .get(name)
            .copied()
            .ok_or_else(|| SpriteFlowError::UnknownSection(name.to_string()))
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::assetconfig::AnimationConfig;
    use crate::resources::imagestore::ImageStore;

    fn images() -> ImageStore {
        let mut store = ImageStore::new();
        store.insert("knight", 64, 32);
        store
    }

    fn anim(image: &str, section: &str, frames: Vec<usize>) -> AnimationConfig {
        AnimationConfig {
            image: image.to_string(),
            section: section.to_string(),
            width: 16,
            height: 16,
            frames,
            duration: Some(0.5),
            duration_ms: None,
            ease_func: String::new(),
            looped: Some(true),
            loops: None,
        }
    }

    fn config() -> ResourceConfig {
        let mut cfg = ResourceConfig::default();
        cfg.sections
            .insert("full".to_string(), Section::new(0, 0, 64, 32, 0));
        cfg.animations
            .insert("walk".to_string(), anim("knight", "full", vec![0, 1, 2, 3]));
        cfg.animations
            .insert("jump".to_string(), anim("knight", "full", vec![4, 5]));
        cfg
    }

    #[test]
    fn test_load_config_builds_templates_sharing_atlas() {
        let mut store = AnimationStore::new();
        store.load_config(&config(), &images()).unwrap();
        assert_eq!(store.len(), 2);

        let walk = store.get("walk").unwrap();
        let jump = store.get("jump").unwrap();
        assert!(Arc::ptr_eq(walk.atlas(), jump.atlas()));
        assert_eq!(walk.atlas().frame_count(), 8);
        assert_eq!(walk.loop_policy(), LoopPolicy::Infinite);
        assert_eq!(walk.easing(), Easing::Linear);
    }

    #[test]
    fn test_empty_animations() {
        let mut store = AnimationStore::new();
        let err = store
            .load_config(&ResourceConfig::default(), &images())
            .unwrap_err();
        assert!(matches!(err, SpriteFlowError::NoAnimations));
    }

    #[test]
    fn test_animations_without_sections() {
        let mut cfg = config();
        cfg.sections.clear();
        let err = AnimationStore::new().load_config(&cfg, &images()).unwrap_err();
        assert!(matches!(err, SpriteFlowError::NoSections));
    }

    #[test]
    fn test_unknown_references() {
        let mut cfg = config();
        cfg.animations
            .insert("ghost".to_string(), anim("ghost", "full", vec![0]));
        let err = AnimationStore::new().load_config(&cfg, &images()).unwrap_err();
        assert!(matches!(err, SpriteFlowError::ImageNotLoaded(ref n) if n == "ghost"));

        let mut cfg = config();
        cfg.animations
            .insert("lost".to_string(), anim("knight", "nowhere", vec![0]));
        let err = AnimationStore::new().load_config(&cfg, &images()).unwrap_err();
        assert!(matches!(err, SpriteFlowError::UnknownSection(_)));
    }

    #[test]
    fn test_unknown_ease_func() {
        let mut cfg = config();
        if let Some(walk) = cfg.animations.get_mut("walk") {
            walk.ease_func = "Wobble".to_string();
        }
        let err = AnimationStore::new().load_config(&cfg, &images()).unwrap_err();
        assert!(matches!(err, SpriteFlowError::UnknownEaseFunc(_)));
    }

    #[test]
    fn test_failed_load_leaves_store_untouched() {
        let mut cfg = config();
        cfg.animations
            .insert("broken".to_string(), anim("knight", "full", vec![99]));
        let mut store = AnimationStore::new();
        let err = store.load_config(&cfg, &images()).unwrap_err();
        assert!(matches!(err, SpriteFlowError::FrameIndexOutOfBounds { index: 99, .. }));
        assert!(store.is_empty());
        assert!(store.sections.is_empty());
    }

    #[test]
    fn test_template_requires_frames() {
        let atlas = Arc::new(FrameAtlas::new(64, 32, Section::new(0, 0, 64, 32, 0), 16, 16).unwrap());
        let err = AnimationTemplate::new("knight", atlas.clone(), &[]).unwrap_err();
        assert!(matches!(err, SpriteFlowError::EmptyFrames));

        let template = AnimationTemplate::new("knight", atlas, &[2, 5])
            .unwrap()
            .with_duration(-1.0);
        assert_eq!(template.frames(), &[2, 5]);
        assert_eq!(template.duration(), 0.0);
        assert_eq!(&**template.image_key(), "knight");
    }

    #[test]
    fn test_get_and_instantiate() {
        let mut store = AnimationStore::new();
        store.load_config(&config(), &images()).unwrap();
        assert!(matches!(
            store.get("run").unwrap_err(),
            SpriteFlowError::UnknownAnimation(_)
        ));
        let anim = store.instantiate("jump").unwrap();
        assert_eq!(anim.current_frame(), 4);
        assert_eq!(anim.image_key(), "knight");
    }
}

//! Image registry.
//!
//! The core never decodes pixels. It only needs to know how big a named image
//! is and to address immutable sub-rectangles of it; the host's renderer owns
//! the real textures. [`ImageProvider`] is that seam, and [`ImageStore`] is a
//! plain name to size registry implementing it.

use std::sync::Arc;

use bevy_ecs::prelude::Resource;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::resources::atlas::FrameRect;

/// Pixel dimensions of a registered image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
}

/// Read-only view of a rectangle inside a named image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubImage {
    pub image_key: Arc<str>,
    pub rect: FrameRect,
}

/// Something that knows image dimensions by name.
pub trait ImageProvider {
    /// Size of the named image, if it is loaded.
    fn image_size(&self, name: &str) -> Option<ImageSize>;

    /// Immutable view of `rect` inside the named image.
    ///
    /// Returns `None` if the image is unknown or the rectangle leaves it.
    fn sub_image(&self, name: &str, rect: FrameRect) -> Option<SubImage> {
        let size = self.image_size(name)?;
        if !FrameRect::new(0, 0, size.width, size.height).contains(&rect) {
            return None;
        }
        Some(SubImage {
            image_key: Arc::from(name),
            rect,
        })
    }
}

/// Loaded images keyed by name.
#[derive(Resource, Debug, Default, Clone)]
pub struct ImageStore {
    pub map: FxHashMap<String, ImageSize>,
}

impl ImageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) an image.
    pub fn insert(&mut self, name: impl Into<String>, width: u32, height: u32) {
        self.map.insert(name.into(), ImageSize { width, height });
    }

    pub fn contains(&self, name: &str) -> bool {
        self.map.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl ImageProvider for ImageStore {
    fn image_size(&self, name: &str) -> Option<ImageSize> {
        self.map.get(name).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_size_lookup() {
        let mut store = ImageStore::new();
        store.insert("knight", 128, 64);
        assert_eq!(
            store.image_size("knight"),
            Some(ImageSize {
                width: 128,
                height: 64
            })
        );
        assert_eq!(store.image_size("ghost"), None);
    }

    #[test]
    fn test_sub_image_inside_bounds() {
        let mut store = ImageStore::new();
        store.insert("knight", 128, 64);
        let view = store
            .sub_image("knight", FrameRect::new(96, 32, 32, 32))
            .unwrap();
        assert_eq!(&*view.image_key, "knight");
        assert_eq!(view.rect, FrameRect::new(96, 32, 32, 32));
    }

    #[test]
    fn test_sub_image_out_of_bounds() {
        let mut store = ImageStore::new();
        store.insert("knight", 128, 64);
        assert!(store.sub_image("knight", FrameRect::new(100, 0, 32, 32)).is_none());
        assert!(store.sub_image("ghost", FrameRect::new(0, 0, 1, 1)).is_none());
    }
}

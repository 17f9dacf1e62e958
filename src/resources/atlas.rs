//! Sprite-sheet frame atlas.
//!
//! A [`FrameAtlas`] slices a rectangular scan region ([`Section`]) of a larger
//! image into equally sized frames separated by a uniform padding. The
//! padding is also applied once before the first column and row, so a region
//! of width `W` holds `c` columns exactly when `W = c * (fw + p) + p`.
//!
//! ```text
//!  p  fw  p  fw  p
//! |--|####|--|####|--|
//! ```
//!
//! Frames are numbered row-major, left to right and top to bottom. The atlas
//! is immutable once built and is shared by every animation created from the
//! same template.
//!
//! Padding larger than the frame size is not supported: the tiling check
//! still runs but the resulting geometry is meaningless.

use serde::{Deserialize, Serialize};

use crate::errors::{Result, SpriteFlowError};

/// A scan region inside an image, with the padding used between its frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Section {
    pub left: u32,
    pub top: u32,
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub padding: u32,
}

impl Section {
    pub fn new(left: u32, top: u32, width: u32, height: u32, padding: u32) -> Self {
        Self {
            left,
            top,
            width,
            height,
            padding,
        }
    }

    /// Region bounds as a rectangle (padding not applied).
    pub fn bounds(&self) -> FrameRect {
        FrameRect::new(self.left, self.top, self.width, self.height)
    }
}

/// Integer pixel rectangle locating a frame inside an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FrameRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl FrameRect {
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge, widened so it cannot overflow.
    pub fn right(&self) -> u64 {
        u64::from(self.x) + u64::from(self.width)
    }

    pub fn bottom(&self) -> u64 {
        u64::from(self.y) + u64::from(self.height)
    }

    /// True if `other` lies entirely inside `self`.
    pub fn contains(&self, other: &FrameRect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }
}

/// Precomputed frame rectangles of a sprite sheet region.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameAtlas {
    section: Section,
    frame_width: u32,
    frame_height: u32,
    columns: u32,
    rows: u32,
    frames: Vec<FrameRect>,
}

impl FrameAtlas {
    /// Build an atlas for `section` of an image sized `image_width` x `image_height`.
    ///
    /// Fails if the region leaves the image, if the region does not tile
    /// exactly into `frame + padding` cells, or if no frame fits.
    pub fn new(
        image_width: u32,
        image_height: u32,
        section: Section,
        frame_width: u32,
        frame_height: u32,
    ) -> Result<Self> {
        let region = section.bounds();
        if !FrameRect::new(0, 0, image_width, image_height).contains(&region) {
            return Err(SpriteFlowError::RegionOutOfBounds {
                left: section.left,
                top: section.top,
                width: section.width,
                height: section.height,
                image_width,
                image_height,
            });
        }

        let p = section.padding;
        let cell_w = frame_width
            .checked_add(p)
            .ok_or(SpriteFlowError::GeometryOverflow("frame width plus padding"))?;
        let cell_h = frame_height
            .checked_add(p)
            .ok_or(SpriteFlowError::GeometryOverflow("frame height plus padding"))?;
        if cell_w == 0 || cell_h == 0 {
            return Err(SpriteFlowError::ZeroFrameSize);
        }

        if section.width % cell_w != p {
            return Err(SpriteFlowError::ColumnMismatch {
                region_width: section.width,
                frame_width,
                padding: p,
            });
        }
        if section.height % cell_h != p {
            return Err(SpriteFlowError::RowMismatch {
                region_height: section.height,
                frame_height,
                padding: p,
            });
        }

        let columns = section.width / cell_w;
        let rows = section.height / cell_h;
        let frame_count = columns
            .checked_mul(rows)
            .and_then(|n| usize::try_from(n).ok())
            .ok_or(SpriteFlowError::GeometryOverflow("frame count"))?;
        if frame_count == 0 {
            return Err(SpriteFlowError::FrameCountZero);
        }

        let mut frames = Vec::with_capacity(frame_count);
        for row in 0..rows {
            for col in 0..columns {
                frames.push(FrameRect {
                    x: section.left + (col + 1) * p + col * frame_width,
                    y: section.top + (row + 1) * p + row * frame_height,
                    width: frame_width,
                    height: frame_height,
                });
            }
        }

        Ok(Self {
            section,
            frame_width,
            frame_height,
            columns,
            rows,
            frames,
        })
    }

    /// Check that every index in `frames` exists in this atlas.
    pub fn check_frames(&self, frames: &[usize]) -> Result<()> {
        if frames.is_empty() {
            return Err(SpriteFlowError::EmptyFrames);
        }
        let frame_count = self.frame_count();
        match frames.iter().find(|&&f| f >= frame_count) {
            Some(&index) => Err(SpriteFlowError::FrameIndexOutOfBounds { index, frame_count }),
            None => Ok(()),
        }
    }

    pub fn frame(&self, index: usize) -> Option<FrameRect> {
        self.frames.get(index).copied()
    }

    pub fn frames(&self) -> &[FrameRect] {
        &self.frames
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn columns(&self) -> u32 {
        self.columns
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn frame_size(&self) -> (u32, u32) {
        (self.frame_width, self.frame_height)
    }

    pub fn section(&self) -> &Section {
        &self.section
    }
}

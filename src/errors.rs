//! Error types.
//!
//! Every fallible construction in the crate (atlas geometry, animation
//! templates, configuration documents) returns [`SpriteFlowError`]. Runtime
//! ticking never fails: a full particle pool or a finished animation are
//! ordinary states, not errors.
//!
//! ```rust,ignore
//! use spriteflow::errors::{Result, SpriteFlowError};
//!
//! fn build() -> Result<()> {
//!     Err(SpriteFlowError::FrameCountZero)
//! }
//! ```

use thiserror::Error;

/// The main error type for the crate.
#[derive(Error, Debug)]
pub enum SpriteFlowError {
    // ========================================================================
    // Sheet geometry
    // ========================================================================
    /// Region width does not tile into `frame_width + padding` cells.
    #[error(
        "columns do not match with frame width and padding (region width {region_width}, frame width {frame_width}, padding {padding})"
    )]
    ColumnMismatch {
        region_width: u32,
        frame_width: u32,
        padding: u32,
    },

    /// Region height does not tile into `frame_height + padding` cells.
    #[error(
        "rows do not match with frame height and padding (region height {region_height}, frame height {frame_height}, padding {padding})"
    )]
    RowMismatch {
        region_height: u32,
        frame_height: u32,
        padding: u32,
    },

    /// The calculated frame count is zero.
    #[error("the calculated frame count is zero")]
    FrameCountZero,

    /// A frame cell (frame size plus padding) has zero width or height.
    #[error("frame cell size is zero")]
    ZeroFrameSize,

    /// Frame or region geometry does not fit in 32-bit pixel coordinates.
    #[error("atlas geometry overflows: {0}")]
    GeometryOverflow(&'static str),

    /// A frame index does not exist in the atlas.
    #[error("frame index {index} exceeds section bounds ({frame_count} frames)")]
    FrameIndexOutOfBounds { index: usize, frame_count: usize },

    /// An animation was given an empty frame list.
    #[error("frame list is empty")]
    EmptyFrames,

    /// The scan region reaches outside the source image.
    #[error("region {left},{top} {width}x{height} exceeds image bounds {image_width}x{image_height}")]
    RegionOutOfBounds {
        left: u32,
        top: u32,
        width: u32,
        height: u32,
        image_width: u32,
        image_height: u32,
    },

    // ========================================================================
    // Name resolution
    // ========================================================================
    /// The easing function name is not part of the catalog.
    #[error("ease function name unknown: {0}")]
    UnknownEaseFunc(String),

    /// An animation references an image that is not registered.
    #[error("image not loaded: {0}")]
    ImageNotLoaded(String),

    /// An animation references a section that is not defined.
    #[error("unknown section: {0}")]
    UnknownSection(String),

    /// A template lookup failed.
    #[error("unknown animation: {0}")]
    UnknownAnimation(String),

    /// The configuration document defines no animations.
    #[error("no animations defined")]
    NoAnimations,

    /// The configuration document defines animations but no sections.
    #[error("no sections defined")]
    NoSections,

    // ========================================================================
    // Configuration I/O
    // ========================================================================
    /// Reading a configuration file failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A JSON configuration document could not be parsed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// An INI settings file could not be loaded or written.
    #[error("config file error: {0}")]
    ConfigFile(String),
}

/// Alias for `std::result::Result<T, SpriteFlowError>`.
pub type Result<T> = std::result::Result<T, SpriteFlowError>;

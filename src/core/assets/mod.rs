//=========================================================================
// Asset System
//=========================================================================
//
// Resolves image assets off the logic thread and turns failures into
// generated placeholders.
//
// Architecture:
//   AssetLoader::request(path) → AssetTicket
//        ↓ (worker thread, crossbeam)
//   ImageSource::load(path) → LoadResult
//        ↓ (polled each tick)
//   AssetBatch::poll() → Vec<Sprite> once every ticket settled
//
// A load never fails from the caller's point of view: `LoadResult::Failed`
// is substituted with `placeholder_image` by whoever consumes it.
//
//=========================================================================

//=== Module Declarations =================================================

mod loader;
mod source;

//=== Public API ==========================================================

pub use loader::{AssetBatch, AssetLoader, AssetTicket};
pub use source::{FsImageSource, ImageSource, MemoryImageSource};

//=== External Dependencies ===============================================

use std::path::PathBuf;
use std::sync::Arc;

use image::{Rgba, RgbaImage};
use thiserror::Error;

//=== Constants ===========================================================

pub const PLACEHOLDER_WIDTH: u32 = 96;
pub const PLACEHOLDER_HEIGHT: u32 = 90;

const PLACEHOLDER_FILL: Rgba<u8> = Rgba([245, 245, 245, 255]);
const PLACEHOLDER_BORDER: Rgba<u8> = Rgba([60, 60, 60, 255]);
const PLACEHOLDER_BORDER_WIDTH: u32 = 2;

//=== Errors ==============================================================

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AssetError {
    #[error("asset {path} not found")]
    Missing { path: PathBuf },
    #[error("asset {path} could not be decoded: {message}")]
    Decode { path: PathBuf, message: String },
    #[error("asset loader stopped before {path} was resolved")]
    LoaderClosed { path: PathBuf },
}

//=== LoadResult ==========================================================

/// Outcome of a single image load.
#[derive(Debug, Clone)]
pub enum LoadResult {
    Loaded(Arc<RgbaImage>),
    Failed(AssetError),
}

impl LoadResult {
    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded(_))
    }
}

//=== Sprite ==============================================================

/// A resolved glyph image ready to draw.
#[derive(Debug, Clone)]
pub struct Sprite {
    pub glyph: char,
    pub image: Arc<RgbaImage>,
    /// `true` when `image` was generated because the real asset failed.
    /// Renderers overlay `glyph` as text in that case.
    pub placeholder: bool,
}

impl Sprite {
    /// Resolves a load result, substituting the placeholder on failure.
    pub fn resolve(glyph: char, result: LoadResult) -> Self {
        match result {
            LoadResult::Loaded(image) => Self {
                glyph,
                image,
                placeholder: false,
            },
            LoadResult::Failed(err) => {
                log::warn!("Using placeholder for '{}': {}", glyph, err);
                Self::placeholder(glyph)
            }
        }
    }

    pub fn placeholder(glyph: char) -> Self {
        Self {
            glyph,
            image: Arc::new(placeholder_image()),
            placeholder: true,
        }
    }
}

//=== Helpers =============================================================

/// Asset path for a letter glyph, e.g. `C_letter.png`.
pub fn letter_asset_path(glyph: char) -> String {
    format!("{}_letter.png", glyph)
}

/// Light tile with a dark border, the fallback for any missing glyph.
pub fn placeholder_image() -> RgbaImage {
    RgbaImage::from_fn(PLACEHOLDER_WIDTH, PLACEHOLDER_HEIGHT, |x, y| {
        let on_border = x < PLACEHOLDER_BORDER_WIDTH
            || y < PLACEHOLDER_BORDER_WIDTH
            || x >= PLACEHOLDER_WIDTH - PLACEHOLDER_BORDER_WIDTH
            || y >= PLACEHOLDER_HEIGHT - PLACEHOLDER_BORDER_WIDTH;
        if on_border {
            PLACEHOLDER_BORDER
        } else {
            PLACEHOLDER_FILL
        }
    })
}

//=========================================================================
// Unit Tests
//=========================================================================

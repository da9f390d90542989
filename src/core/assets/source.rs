//=========================================================================
// Image Sources
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use image::RgbaImage;

//=== Internal Dependencies ===============================================

use super::{AssetError, LoadResult};

//=== ImageSource =========================================================

/// Where image bytes come from. Called on the loader's worker thread.
pub trait ImageSource: Send + 'static {
    fn load(&self, path: &str) -> LoadResult;
}

//=== FsImageSource =======================================================

/// Decodes images from files under a root directory.
#[derive(Debug, Clone)]
pub struct FsImageSource {
    root: PathBuf,
}

impl FsImageSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl ImageSource for FsImageSource {
    fn load(&self, path: &str) -> LoadResult {
        let full = self.root.join(path);
        if !full.is_file() {
            return LoadResult::Failed(AssetError::Missing { path: full });
        }

        match image::open(&full) {
            Ok(decoded) => LoadResult::Loaded(Arc::new(decoded.to_rgba8())),
            Err(err) => LoadResult::Failed(AssetError::Decode {
                path: full,
                message: err.to_string(),
            }),
        }
    }
}

//=== MemoryImageSource ===================================================

/// Pre-decoded images keyed by path.
#[derive(Debug, Clone, Default)]
pub struct MemoryImageSource {
    images: HashMap<String, Arc<RgbaImage>>,
}

impl MemoryImageSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_image(mut self, path: impl Into<String>, image: RgbaImage) -> Self {
        self.images.insert(path.into(), Arc::new(image));
        self
    }
}

impl ImageSource for MemoryImageSource {
    fn load(&self, path: &str) -> LoadResult {
        match self.images.get(path) {
            Some(image) => LoadResult::Loaded(Arc::clone(image)),
            None => LoadResult::Failed(AssetError::Missing { path: path.into() }),
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn fs_source_reports_missing_files() {
        let temp = TempDir::new().expect("tempdir");
        let source = FsImageSource::new(temp.path());

        assert!(matches!(
            source.load("Z_letter.png"),
            LoadResult::Failed(AssetError::Missing { .. })
        ));
    }

    #[test]
    fn fs_source_decodes_png() {
        let temp = TempDir::new().expect("tempdir");
        RgbaImage::new(3, 2)
            .save(temp.path().join("A_letter.png"))
            .expect("write png");

        let source = FsImageSource::new(temp.path());
        match source.load("A_letter.png") {
            LoadResult::Loaded(image) => assert_eq!(image.dimensions(), (3, 2)),
            LoadResult::Failed(err) => panic!("expected image, got {err}"),
        }
    }

    #[test]
    fn fs_source_reports_undecodable_files() {
        let temp = TempDir::new().expect("tempdir");
        std::fs::write(temp.path().join("B_letter.png"), b"not a png").expect("write");

        let source = FsImageSource::new(temp.path());
        assert!(matches!(
            source.load("B_letter.png"),
            LoadResult::Failed(AssetError::Decode { .. })
        ));
    }

    #[test]
    fn memory_source_serves_registered_paths() {
        let source = MemoryImageSource::new().with_image("player.png", RgbaImage::new(1, 1));
        assert!(source.load("player.png").is_loaded());
        assert!(!source.load("other.png").is_loaded());
    }
}

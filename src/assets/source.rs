use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use anyhow::Context;
use image::RgbaImage;

use crate::{
    assets::decode::decode_image,
    foundation::error::{BandError, BandResult},
    foundation::math::Fnv1a64,
};

/// Resolves configured image paths into decoded rasters.
///
/// Implementations own all IO and decoding; the composer only ever sees
/// straight-alpha RGBA8 rasters. A source that cannot produce an image returns
/// [`BandError::MissingBadgeSource`] (or any other error); the composer decides
/// whether that is fatal.
pub trait ImageSource {
    /// Load and decode the image at `path`.
    fn load(&self, path: &str) -> BandResult<RgbaImage>;

    /// Cheap identity of the content currently behind `path`.
    ///
    /// Used to key the name-plate cache. `None` means the identity is unknown and
    /// cached results must not be trusted.
    fn fingerprint(&self, path: &str) -> Option<u64>;
}

#[derive(Clone, Debug, Default)]
/// Filesystem-backed [`ImageSource`].
pub struct FsImageSource {
    root: Option<PathBuf>,
}

impl FsImageSource {
    /// Source resolving relative paths against the process working directory.
    pub fn new() -> Self {
        Self { root: None }
    }

    /// Source resolving relative paths against `root` (typically a preset's directory).
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
        }
    }

    /// Resolve a configured path to a filesystem path.
    pub fn resolve(&self, path: &str) -> PathBuf {
        let p = Path::new(path);
        match &self.root {
            Some(root) if p.is_relative() => root.join(p),
            _ => p.to_path_buf(),
        }
    }
}

impl ImageSource for FsImageSource {
    fn load(&self, path: &str) -> BandResult<RgbaImage> {
        if path.trim().is_empty() {
            return Err(BandError::missing_badge_source("image path is empty"));
        }
        let resolved = self.resolve(path);
        if !resolved.is_file() {
            return Err(BandError::missing_badge_source(format!(
                "no file at '{}'",
                resolved.display()
            )));
        }
        let bytes = std::fs::read(&resolved)
            .with_context(|| format!("read image bytes from '{}'", resolved.display()))?;
        decode_image(&bytes)
    }

    fn fingerprint(&self, path: &str) -> Option<u64> {
        if path.trim().is_empty() {
            return None;
        }
        let resolved = self.resolve(path);
        let meta = std::fs::metadata(&resolved).ok()?;
        let mtime_ns = meta
            .modified()
            .ok()
            .and_then(|t| t.duration_since(std::time::UNIX_EPOCH).ok())
            .map(|d| d.as_nanos() as u64)?;

        let mut h = Fnv1a64::new_default();
        h.write_str(&resolved.to_string_lossy());
        h.write_u64(meta.len());
        h.write_u64(mtime_ns);
        Some(h.finish())
    }
}

#[derive(Clone, Debug, Default)]
/// In-memory [`ImageSource`] holding pre-decoded rasters keyed by path.
///
/// Useful for embedding applications that already hold decoded images, and for tests.
pub struct MemoryImageSource {
    images: HashMap<String, (RgbaImage, u64)>,
    next_revision: u64,
}

impl MemoryImageSource {
    /// Construct an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the raster behind `path`. Replacing changes its fingerprint.
    pub fn insert(&mut self, path: impl Into<String>, image: RgbaImage) {
        self.next_revision += 1;
        self.images
            .insert(path.into(), (image, self.next_revision));
    }

    /// Builder-style [`MemoryImageSource::insert`].
    pub fn with(mut self, path: impl Into<String>, image: RgbaImage) -> Self {
        self.insert(path, image);
        self
    }

    /// Remove the raster behind `path`, returning it if present.
    pub fn remove(&mut self, path: &str) -> Option<RgbaImage> {
        self.images.remove(path).map(|(img, _)| img)
    }
}

impl ImageSource for MemoryImageSource {
    fn load(&self, path: &str) -> BandResult<RgbaImage> {
        self.images
            .get(path)
            .map(|(img, _)| img.clone())
            .ok_or_else(|| BandError::missing_badge_source(format!("no image registered for '{path}'")))
    }

    fn fingerprint(&self, path: &str) -> Option<u64> {
        let (_, revision) = self.images.get(path)?;
        let mut h = Fnv1a64::new_default();
        h.write_str(path);
        h.write_u64(*revision);
        Some(h.finish())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/source.rs"]
mod tests;

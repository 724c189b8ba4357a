//! Decoded cover textures, keyed by the path they were loaded from.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::ImageLoadError;

/// Turns an image file into something the renderer can draw.
pub trait TextureLoader {
    type Handle: Clone;

    fn load(&mut self, path: &Path) -> Result<Self::Handle, ImageLoadError>;
}

/// Memoizing image cache.
///
/// Both hits and misses are remembered, so a broken cover costs one decode
/// attempt per session rather than one per frame.
pub struct ImageCache<L: TextureLoader> {
    loader: L,
    fallback_dir: PathBuf,
    entries: HashMap<String, Option<L::Handle>>,
}

impl<L: TextureLoader> ImageCache<L> {
    /// `fallback_dir` is tried for relative paths that don't load as given.
    pub fn new(loader: L, fallback_dir: impl Into<PathBuf>) -> Self {
        Self {
            loader,
            fallback_dir: fallback_dir.into(),
            entries: HashMap::new(),
        }
    }

    pub fn get_or_load(&mut self, path: &Path) -> Option<L::Handle> {
        let key = path.to_string_lossy().into_owned();
        if let Some(entry) = self.entries.get(&key) {
            return entry.clone();
        }

        let loaded = match self.loader.load(path) {
            Ok(handle) => Some(handle),
            Err(e) if path.is_relative() => {
                let retry = self.fallback_dir.join(path);
                log::debug!(
                    "Failed to load {} ({}), trying {}",
                    path.display(),
                    e,
                    retry.display()
                );
                match self.loader.load(&retry) {
                    Ok(handle) => Some(handle),
                    Err(e) => {
                        log::warn!("Failed to load image {}: {}", path.display(), e);
                        None
                    }
                }
            }
            Err(e) => {
                log::warn!("Failed to load image {}: {}", path.display(), e);
                None
            }
        };

        self.entries.insert(key, loaded.clone());
        loaded
    }

    /// Drop remembered failures so those paths are tried again.
    pub fn forget_failures(&mut self) {
        self.entries.retain(|_, entry| entry.is_some());
    }

    /// Release every cached texture.
    pub fn clear(&mut self) {
        log::debug!("Releasing {} cached images", self.entries.len());
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn loader(&self) -> &L {
        &self.loader
    }
}

/// Decodes with the `image` crate and uploads to the egui texture manager.
pub struct EguiTextureLoader {
    ctx: egui::Context,
}

impl EguiTextureLoader {
    pub fn new(ctx: egui::Context) -> Self {
        Self { ctx }
    }
}

impl TextureLoader for EguiTextureLoader {
    type Handle = egui::TextureHandle;

    fn load(&mut self, path: &Path) -> Result<Self::Handle, ImageLoadError> {
        // Cover files are named after the URL, not their contents.
        let decoded = image::ImageReader::open(path)?
            .with_guessed_format()?
            .decode()?;
        let rgba = decoded.to_rgba8();
        let size = [rgba.width() as usize, rgba.height() as usize];
        let color_image = egui::ColorImage::from_rgba_unmultiplied(size, rgba.as_raw());

        Ok(self.ctx.load_texture(
            path.to_string_lossy().into_owned(),
            color_image,
            egui::TextureOptions::LINEAR,
        ))
    }
}

#[cfg(test)]
#[path = "tests/cache_tests.rs"]
mod tests;

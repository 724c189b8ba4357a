use std::path::{Path, PathBuf};

use romshelf_core::{DEFAULT_SUMMARY, GameMetadata, UNKNOWN, normalize};

use crate::lookup::{Catalog, Lookup};
use crate::media;
use crate::types::GameDetails;

/// Turns ROM filenames into display-ready metadata.
///
/// Resolution never fails: whenever the catalog is unavailable, has no match
/// or returns something unusable, the filename-only fallback record is used.
pub struct MetadataResolver<C> {
    catalog: C,
    images_dir: PathBuf,
    placeholder_image: PathBuf,
}

impl<C: Catalog> MetadataResolver<C> {
    pub fn new(catalog: C, images_dir: impl Into<PathBuf>, placeholder_image: impl Into<PathBuf>) -> Self {
        Self {
            catalog,
            images_dir: images_dir.into(),
            placeholder_image: placeholder_image.into(),
        }
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    pub fn images_dir(&self) -> &Path {
        &self.images_dir
    }

    /// The record used when the catalog cannot help.
    pub fn fallback(&self, filename: &str) -> GameMetadata {
        GameMetadata::from_filename(filename, &self.placeholder_image)
    }

    /// Resolve one filename. Never fails.
    pub fn resolve(&self, filename: &str) -> GameMetadata {
        if !self.catalog.has_session() {
            log::debug!("No catalog session, using filename metadata for {}", filename);
            return self.fallback(filename);
        }

        let clean_name = normalize(filename);
        log::info!("Fetching metadata for {}", clean_name);

        let id = match self.catalog.search(&clean_name) {
            Lookup::Found(id) => id,
            Lookup::NotFound => {
                log::info!("No catalog match for {}", clean_name);
                return self.fallback(filename);
            }
            Lookup::TransportError(e) => {
                log::warn!("Catalog search for {} failed: {}", clean_name, e);
                return self.fallback(filename);
            }
        };

        let details = match self.catalog.fetch_details(id) {
            Lookup::Found(details) => details,
            Lookup::NotFound => {
                log::info!("Catalog returned no details for {} (id {})", clean_name, id);
                return self.fallback(filename);
            }
            Lookup::TransportError(e) => {
                log::warn!("Catalog details for {} failed: {}", clean_name, e);
                return self.fallback(filename);
            }
        };

        let image_path = self.fetch_cover(&clean_name, &details);
        let meta = map_details(filename, &clean_name, &details, image_path);
        log::info!("Resolved {} as {}", filename, meta.title);
        meta
    }

    /// Resolve a whole list in order, one filename at a time.
    pub fn resolve_all(&self, filenames: &[String]) -> Vec<GameMetadata> {
        log::info!("Loading metadata for {} games...", filenames.len());
        let list: Vec<GameMetadata> = filenames.iter().map(|f| self.resolve(f)).collect();
        let matched = list.iter().filter(|m| m.has_catalog_entry()).count();
        log::info!(
            "Finished loading metadata: {} games, {} matched in catalog",
            list.len(),
            matched
        );
        list
    }

    /// Download (or reuse) the cover for a catalog hit.
    fn fetch_cover(&self, clean_name: &str, details: &GameDetails) -> Option<PathBuf> {
        let url = details.cover_url()?;
        let dest = media::cover_path(&self.images_dir, clean_name, &url);

        if media::is_existing_cover(&dest) {
            log::debug!("Reusing cover {}", dest.display());
            return Some(dest);
        }

        if let Err(e) = std::fs::create_dir_all(&self.images_dir) {
            log::warn!(
                "Failed to create images directory {}: {}",
                self.images_dir.display(),
                e
            );
            return None;
        }

        match self.catalog.download_cover(&url, &dest) {
            Ok(()) => Some(dest),
            Err(e) => {
                log::warn!("Cover download for {} failed: {}", clean_name, e);
                None
            }
        }
    }
}

/// Map a catalog record onto the display model, filling gaps with sentinels.
fn map_details(
    filename: &str,
    clean_name: &str,
    details: &GameDetails,
    image_path: Option<PathBuf>,
) -> GameMetadata {
    GameMetadata {
        filename: filename.to_string(),
        title: details.title().unwrap_or(clean_name).to_string(),
        description: details.summary().unwrap_or(DEFAULT_SUMMARY).to_string(),
        release_year: details
            .release_year()
            .map(|y| y.to_string())
            .unwrap_or_else(|| UNKNOWN.to_string()),
        publisher: details.publisher().unwrap_or(UNKNOWN).to_string(),
        genre: details.genre().unwrap_or(UNKNOWN).to_string(),
        image_path,
        catalog_url: details.catalog_url().map(str::to_string),
    }
}

#[cfg(test)]
#[path = "tests/resolve_tests.rs"]
mod tests;

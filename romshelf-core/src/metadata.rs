use std::path::{Path, PathBuf};

use crate::normalize::normalize;

/// Year/publisher/genre value for a ROM the catalog never matched.
pub const NOT_FOUND: &str = "Not Found";

/// Year/publisher/genre value for a catalog hit that lacks the field.
pub const UNKNOWN: &str = "Unknown";

/// Description used by the filename-only fallback record.
pub const NO_DESCRIPTION: &str = "No description found in the game catalog";

/// Description used when a catalog hit has no summary.
pub const DEFAULT_SUMMARY: &str = "Classic NES game";

/// Display-ready metadata for one ROM in the list.
///
/// Every field is always populated: values the catalog could not supply carry
/// one of the sentinels above, so the renderer never has to special-case
/// missing data beyond the two `Option`s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameMetadata {
    /// ROM filename as found on disk; unique within a loaded list.
    pub filename: String,
    pub title: String,
    pub description: String,
    pub release_year: String,
    pub publisher: String,
    pub genre: String,
    /// Local cover image, `None` when there is nothing to draw.
    pub image_path: Option<PathBuf>,
    /// Canonical catalog page. `None` means the ROM was not found in the
    /// catalog, which also hides the "Read More" link.
    pub catalog_url: Option<String>,
}

impl GameMetadata {
    /// Build the fallback record derived purely from the filename.
    pub fn from_filename(filename: &str, placeholder_image: &Path) -> Self {
        Self {
            filename: filename.to_string(),
            title: normalize(filename),
            description: NO_DESCRIPTION.to_string(),
            release_year: NOT_FOUND.to_string(),
            publisher: NOT_FOUND.to_string(),
            genre: NOT_FOUND.to_string(),
            image_path: Some(placeholder_image.to_path_buf()),
            catalog_url: None,
        }
    }

    /// The `year | publisher | genre` line shown under the title.
    pub fn summary_line(&self) -> String {
        format!("{} | {} | {}", self.release_year, self.publisher, self.genre)
    }

    /// Whether this record came from a catalog match.
    pub fn has_catalog_entry(&self) -> bool {
        self.catalog_url.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_record_is_fully_populated() {
        let placeholder = Path::new("assets/not_found.png");
        let meta = GameMetadata::from_filename("super_mario_bros_(U).nes", placeholder);

        assert_eq!(meta.filename, "super_mario_bros_(U).nes");
        assert_eq!(meta.title, "super mario bros");
        assert_eq!(meta.description, NO_DESCRIPTION);
        assert_eq!(meta.release_year, NOT_FOUND);
        assert_eq!(meta.publisher, NOT_FOUND);
        assert_eq!(meta.genre, NOT_FOUND);
        assert_eq!(meta.image_path.as_deref(), Some(placeholder));
        assert_eq!(meta.catalog_url, None);
        assert!(!meta.has_catalog_entry());
    }

    #[test]
    fn fallback_record_is_deterministic() {
        let placeholder = Path::new("p.png");
        assert_eq!(
            GameMetadata::from_filename("Metroid (E).nes", placeholder),
            GameMetadata::from_filename("Metroid (E).nes", placeholder)
        );
    }

    #[test]
    fn summary_line_joins_with_pipes() {
        let meta = GameMetadata::from_filename("x.nes", Path::new("p.png"));
        assert_eq!(meta.summary_line(), "Not Found | Not Found | Not Found");
    }
}

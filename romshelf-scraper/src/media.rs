use std::fs::{self, File};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use crate::error::ScrapeError;

/// Extension used when the cover URL does not carry a usable one.
const DEFAULT_COVER_EXTENSION: &str = "jpg";

/// Deterministic local path for a game's cover: `<images_dir>/<name>.<ext>`.
///
/// The extension is taken from the URL so the file on disk matches its
/// contents; decoders sniff the format anyway.
pub fn cover_path(images_dir: &Path, clean_name: &str, url: &str) -> PathBuf {
    images_dir.join(format!(
        "{}.{}",
        sanitize_file_stem(clean_name),
        url_extension(url)
    ))
}

/// Replace characters that are not allowed in file names on any supported
/// platform. An empty result becomes `"untitled"`.
pub fn sanitize_file_stem(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    let trimmed = cleaned.trim().trim_matches('.');
    if trimmed.is_empty() {
        "untitled".to_string()
    } else {
        trimmed.to_string()
    }
}

fn url_extension(url: &str) -> String {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    let last = path.rsplit('/').next().unwrap_or(path);
    match last.rsplit_once('.') {
        Some((_, ext))
            if (1..=4).contains(&ext.len()) && ext.chars().all(|c| c.is_ascii_alphanumeric()) =>
        {
            ext.to_ascii_lowercase()
        }
        _ => DEFAULT_COVER_EXTENSION.to_string(),
    }
}

/// Returns true if `path` is a non-empty regular file from an earlier download.
pub fn is_existing_cover(path: &Path) -> bool {
    fs::metadata(path)
        .map(|m| m.is_file() && m.len() > 0)
        .unwrap_or(false)
}

/// Stream `reader` into `dest`, then verify the file is non-empty.
///
/// Any failure removes the partially written file.
pub fn save_verified(reader: &mut impl Read, dest: &Path) -> Result<u64, ScrapeError> {
    let written = match File::create(dest).and_then(|mut file| io::copy(reader, &mut file)) {
        Ok(n) => n,
        Err(e) => {
            remove_quietly(dest);
            return Err(e.into());
        }
    };

    let on_disk = fs::metadata(dest).map(|m| m.len()).unwrap_or(0);
    if written == 0 || on_disk == 0 {
        remove_quietly(dest);
        return Err(ScrapeError::EmptyDownload(dest.to_path_buf()));
    }
    Ok(on_disk)
}

fn remove_quietly(path: &Path) {
    if path.exists() {
        if let Err(e) = fs::remove_file(path) {
            log::warn!("Failed to remove partial file {}: {}", path.display(), e);
        }
    }
}

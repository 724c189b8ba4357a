//! Directory scanner for the games folder.

use std::path::Path;

/// List the ROM filenames in `dir` that carry `extension` (case-insensitive),
/// sorted by name.
///
/// A missing directory is created so the user has somewhere to drop ROMs;
/// the result is then empty.
pub fn scan_games(dir: &Path, extension: &str) -> std::io::Result<Vec<String>> {
    if !dir.exists() {
        log::info!("Creating games directory {}", dir.display());
        std::fs::create_dir_all(dir)?;
        return Ok(Vec::new());
    }

    let mut roms: Vec<String> = Vec::new();
    for entry in std::fs::read_dir(dir)?.flatten() {
        let path = entry.path();
        if !path.is_file() || !has_extension(&path, extension) {
            continue;
        }
        match entry.file_name().into_string() {
            Ok(name) => roms.push(name),
            Err(name) => log::warn!("Skipping ROM with non-UTF-8 name: {:?}", name),
        }
    }

    roms.sort();
    log::info!("Found {} ROM files in {}", roms.len(), dir.display());
    Ok(roms)
}

/// Check a path's extension against `extension` (no leading dot, any case).
pub fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case(extension.trim_start_matches('.')))
        .unwrap_or(false)
}

#[cfg(test)]
#[path = "tests/scanner_tests.rs"]
mod tests;

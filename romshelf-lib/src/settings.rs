//! Settings file and on-disk layout.
//!
//! Settings live in `~/.config/romshelf/settings.toml`. Everything else
//! (games, cover images, bundled assets) sits next to the install, two
//! levels above the executable.

use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Default ROM extension for the NES library.
pub const DEFAULT_ROM_EXTENSION: &str = "nes";
/// Default emulator program, looked up on `PATH`.
pub const DEFAULT_EMULATOR: &str = "nestopia";
/// IGDB platform id for the NES.
pub const DEFAULT_PLATFORM_ID: u32 = 18;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    pub library: LibrarySettings,
    pub emulator: EmulatorSettings,
    pub catalog: CatalogSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// Overrides `<root>/games` when set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub games_dir: Option<PathBuf>,
    pub rom_extension: String,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            games_dir: None,
            rom_extension: DEFAULT_ROM_EXTENSION.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmulatorSettings {
    pub program: String,
}

impl Default for EmulatorSettings {
    fn default() -> Self {
        Self {
            program: DEFAULT_EMULATOR.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogSettings {
    /// When false the catalog is never contacted and every game gets
    /// placeholder metadata.
    pub enabled: bool,
    pub platform_id: u32,
    /// Overrides `<root>/images` when set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images_dir: Option<PathBuf>,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            platform_id: DEFAULT_PLATFORM_ID,
            images_dir: None,
        }
    }
}

/// Canonical path to the settings file: `~/.config/romshelf/settings.toml`.
pub fn settings_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("romshelf").join("settings.toml")
}

/// Load settings, falling back to defaults when the file is missing or
/// cannot be parsed.
pub fn load_settings() -> Settings {
    load_settings_from(&settings_path())
}

pub fn load_settings_from(path: &Path) -> Settings {
    match std::fs::read_to_string(path) {
        Ok(contents) => parse_settings(&contents).unwrap_or_else(|e| {
            log::warn!("Ignoring malformed settings file {}: {}", path.display(), e);
            Settings::default()
        }),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::debug!("No settings file at {}, using defaults", path.display());
            Settings::default()
        }
        Err(e) => {
            log::warn!("Could not read {}: {}", path.display(), e);
            Settings::default()
        }
    }
}

pub fn parse_settings(contents: &str) -> Result<Settings, toml::de::Error> {
    toml::from_str(contents)
}

/// Write settings atomically (temp file, then rename).
pub fn save_settings(path: &Path, settings: &Settings) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let serialized = toml::to_string_pretty(settings).map_err(io::Error::other)?;
    let tmp = path.with_extension("toml.tmp");
    std::fs::write(&tmp, &serialized)?;
    std::fs::rename(&tmp, path)?;
    Ok(())
}

/// Where the launcher finds its games and assets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    pub root: PathBuf,
    pub games_dir: PathBuf,
    pub images_dir: PathBuf,
    pub assets_dir: PathBuf,
    pub placeholder_image: PathBuf,
}

impl Layout {
    pub fn from_root(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let assets_dir = root.join("assets");
        Self {
            games_dir: root.join("games"),
            images_dir: root.join("images"),
            placeholder_image: assets_dir.join("not_found.png"),
            assets_dir,
            root,
        }
    }

    /// Layout rooted two levels above the running executable, with any
    /// directory overrides from `settings` applied.
    pub fn resolve(settings: &Settings) -> Self {
        Self::from_root(install_root()).with_overrides(settings)
    }

    pub fn with_overrides(mut self, settings: &Settings) -> Self {
        if let Some(dir) = &settings.library.games_dir {
            self.games_dir = dir.clone();
        }
        if let Some(dir) = &settings.catalog.images_dir {
            self.images_dir = dir.clone();
        }
        self
    }
}

/// The executable's grandparent directory, or the parent of the working
/// directory if that can't be determined.
fn install_root() -> PathBuf {
    let from_exe = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent()?.parent().map(Path::to_path_buf));
    if let Some(root) = from_exe {
        return root;
    }
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    cwd.parent().map(Path::to_path_buf).unwrap_or(cwd)
}

#[cfg(test)]
#[path = "tests/settings_tests.rs"]
mod tests;

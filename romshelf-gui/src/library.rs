//! Startup wiring: catalog connection, launcher, first scan.

use std::path::{Path, PathBuf};

use romshelf_core::GameMetadata;
use romshelf_lib::settings::{Layout, Settings};
use romshelf_lib::{Launcher, Spawner, scan_games};
use romshelf_scraper::{
    Catalog, Credentials, Endpoints, IgdbClient, MetadataResolver, Offline, credential_sources,
};

use crate::error::AppError;
use crate::state::{GameList, Shelf};

/// The games directory and everything needed to turn it into a list.
pub struct Library<C> {
    resolver: MetadataResolver<C>,
    games_dir: PathBuf,
    rom_extension: String,
}

impl<C: Catalog> Library<C> {
    pub fn new(resolver: MetadataResolver<C>, games_dir: impl Into<PathBuf>, rom_extension: &str) -> Self {
        Self {
            resolver,
            games_dir: games_dir.into(),
            rom_extension: rom_extension.to_string(),
        }
    }

    pub fn games_dir(&self) -> &Path {
        &self.games_dir
    }

    pub fn resolver(&self) -> &MetadataResolver<C> {
        &self.resolver
    }

    /// Scan the games directory and resolve metadata for every ROM.
    /// Blocks until every lookup has finished.
    pub fn load(&self) -> Result<Vec<GameMetadata>, AppError> {
        let names = scan_games(&self.games_dir, &self.rom_extension)?;
        if names.is_empty() {
            return Err(AppError::NoRoms(self.games_dir.clone()));
        }
        log::info!("Found {} ROMs in {}", names.len(), self.games_dir.display());
        Ok(self.resolver.resolve_all(&names))
    }
}

/// Connect to the game catalog. Never fails: without credentials or a
/// working connection every game gets filename-only metadata.
pub fn connect_catalog(settings: &Settings) -> Box<dyn Catalog> {
    if !settings.catalog.enabled {
        log::info!("Catalog lookups disabled in settings");
        return Box::new(Offline);
    }

    let mut client = match IgdbClient::new(Endpoints::default(), settings.catalog.platform_id) {
        Ok(client) => client,
        Err(e) => {
            log::warn!("Could not create IGDB client: {}", e);
            return Box::new(Offline);
        }
    };

    let sources = credential_sources();
    log::debug!(
        "IGDB client_id from {}, client_secret from {}",
        sources.client_id,
        sources.client_secret
    );

    match Credentials::load() {
        Ok(creds) => {
            if let Err(e) = client.authenticate(&creds) {
                log::warn!("IGDB authentication failed: {}", e);
                log::warn!("IGDB features will be disabled, using basic game information");
            }
        }
        Err(e) => {
            log::warn!("No IGDB credentials: {}", e);
            log::warn!("IGDB features will be disabled, using basic game information");
        }
    }
    Box::new(client)
}

/// Build the launcher, scan the games directory and resolve the list.
///
/// A launcher that can't find its emulator and an empty games directory
/// are both fatal.
pub fn prepare<C: Catalog, S: Spawner>(
    settings: &Settings,
    layout: &Layout,
    catalog: C,
    spawner: S,
) -> Result<(Shelf<S>, Library<C>), AppError> {
    let launcher = Launcher::new(
        &settings.emulator.program,
        &settings.library.rom_extension,
        spawner,
    )?;

    let resolver = MetadataResolver::new(catalog, &layout.images_dir, &layout.placeholder_image);
    let library = Library::new(resolver, &layout.games_dir, &settings.library.rom_extension);
    let entries = library.load()?;

    let shelf = Shelf::new(GameList::new(entries), &layout.games_dir, launcher);
    Ok((shelf, library))
}

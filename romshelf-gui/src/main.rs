//! romshelf
//!
//! Lists the NES ROMs in the games directory with catalog metadata and
//! cover art, and starts the emulator on the one picked.

use std::cell::Cell;
use std::process::ExitCode;
use std::rc::Rc;

use romshelf_gui::app::{APP_NAME, FatalErrorApp, ShelfApp, native_options};
use romshelf_gui::{AppError, connect_catalog, prepare};
use romshelf_lib::SystemSpawner;
use romshelf_lib::settings::{Layout, Settings, load_settings, save_settings, settings_path};

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings = load_or_create_settings();
    let layout = Layout::resolve(&settings);
    log::info!("Games directory: {}", layout.games_dir.display());

    // Set when startup fails after the window is up.
    let startup_failed = Rc::new(Cell::new(false));
    let failed = Rc::clone(&startup_failed);

    let result = eframe::run_native(
        APP_NAME,
        native_options(),
        Box::new(move |cc| Ok(start(cc, &settings, &layout, &failed))),
    );

    match result {
        Err(e) => {
            log::error!("{}", AppError::from(e));
            ExitCode::FAILURE
        }
        Ok(()) if startup_failed.get() => ExitCode::FAILURE,
        Ok(()) => ExitCode::SUCCESS,
    }
}

/// Runs once the display is up: catalog, launcher, scan, then the blocking
/// resolve. A fatal error replaces the list with an error screen.
fn start(
    cc: &eframe::CreationContext<'_>,
    settings: &Settings,
    layout: &Layout,
    failed: &Cell<bool>,
) -> Box<dyn eframe::App> {
    let catalog = connect_catalog(settings);
    match prepare(settings, layout, catalog, SystemSpawner::default()) {
        Ok((shelf, library)) => Box::new(ShelfApp::new(cc, shelf, library, &layout.assets_dir)),
        Err(e) => {
            log::error!("{}", e);
            failed.set(true);
            Box::new(FatalErrorApp::new(cc, e.to_string()))
        }
    }
}

/// Load settings, writing a default file on first run so there is
/// something to edit.
fn load_or_create_settings() -> Settings {
    let path = settings_path();
    if path.exists() {
        return load_settings();
    }
    let settings = Settings::default();
    match save_settings(&path, &settings) {
        Ok(()) => log::info!("Wrote default settings to {}", path.display()),
        Err(e) => log::warn!("Could not write {}: {}", path.display(), e),
    }
    settings
}

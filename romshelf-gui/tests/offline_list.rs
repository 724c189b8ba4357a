use std::cell::RefCell;
use std::ffi::{OsStr, OsString};
use std::fs;
use std::io;
use std::path::Path;

use romshelf_core::{NO_DESCRIPTION, NOT_FOUND};
use romshelf_gui::state::{Flow, ListInput, ListState};
use romshelf_gui::{AppError, prepare};
use romshelf_lib::settings::{Layout, Settings};
use romshelf_lib::{LaunchError, Spawner};
use romshelf_scraper::{Catalog, Endpoints, IgdbClient, NES_PLATFORM_ID, Offline};

#[derive(Debug, Default)]
struct Recorder {
    launched: RefCell<Vec<OsString>>,
}

impl Spawner for Recorder {
    fn spawn_detached(&self, _program: &OsStr, args: &[&OsStr]) -> io::Result<()> {
        self.launched
            .borrow_mut()
            .extend(args.iter().map(|a| a.to_os_string()));
        Ok(())
    }

    fn open_detached(&self, _url: &str) -> io::Result<()> {
        Ok(())
    }
}

fn settings_with_emulator(root: &Path) -> Settings {
    let emulator = root.join("bin").join("fake-nestopia");
    fs::create_dir_all(emulator.parent().unwrap()).unwrap();
    fs::write(&emulator, b"").unwrap();

    let mut settings = Settings::default();
    settings.emulator.program = emulator.to_string_lossy().into_owned();
    settings
}

#[test]
fn unauthenticated_client_lists_filename_metadata() {
    let root = tempfile::tempdir().unwrap();
    let layout = Layout::from_root(root.path());
    fs::create_dir_all(&layout.games_dir).unwrap();
    fs::write(layout.games_dir.join("super_mario_bros_(U).nes"), b"NES\x1a").unwrap();
    fs::write(layout.games_dir.join("notes.txt"), b"").unwrap();
    let settings = settings_with_emulator(root.path());

    let client = IgdbClient::new(Endpoints::default(), NES_PLATFORM_ID).unwrap();
    assert!(!client.has_session());

    let (mut shelf, library) = prepare(&settings, &layout, client, Recorder::default()).unwrap();

    let entries = shelf.list().entries();
    assert_eq!(entries.len(), 1);
    let game = &entries[0];
    assert_eq!(game.filename, "super_mario_bros_(U).nes");
    assert_eq!(game.title, "super mario bros");
    assert_eq!(game.description, NO_DESCRIPTION);
    assert_eq!(game.summary_line(), format!("{NOT_FOUND} | {NOT_FOUND} | {NOT_FOUND}"));
    assert_eq!(game.image_path.as_deref(), Some(layout.placeholder_image.as_path()));
    assert_eq!(game.catalog_url, None);
    // Nothing is downloaded without a session.
    assert!(!library.resolver().images_dir().exists());

    shelf.handle(ListInput::Confirm);
    assert_eq!(shelf.list().state(), ListState::Selected(0));
    assert_eq!(shelf.settle(), Flow::Continue);
    assert_eq!(shelf.list().state(), ListState::Listing);
    assert_eq!(
        *shelf.launcher().spawner().launched.borrow(),
        vec![layout.games_dir.join("super_mario_bros_(U).nes").into_os_string()]
    );
}

#[test]
fn cancel_exits_without_launching() {
    let root = tempfile::tempdir().unwrap();
    let layout = Layout::from_root(root.path());
    fs::create_dir_all(&layout.games_dir).unwrap();
    fs::write(layout.games_dir.join("contra.nes"), b"NES\x1a").unwrap();
    let settings = settings_with_emulator(root.path());

    let (mut shelf, _library) = prepare(&settings, &layout, Offline, Recorder::default()).unwrap();
    shelf.handle(ListInput::Cancel);
    assert_eq!(shelf.list().state(), ListState::Cancelled);
    assert_eq!(shelf.settle(), Flow::Exit);
    assert!(shelf.launcher().spawner().launched.borrow().is_empty());
}

#[test]
fn empty_games_dir_is_fatal() {
    let root = tempfile::tempdir().unwrap();
    let layout = Layout::from_root(root.path());
    let settings = settings_with_emulator(root.path());

    let err = prepare(&settings, &layout, Offline, Recorder::default())
        .err()
        .unwrap();
    assert!(matches!(err, AppError::NoRoms(_)));
    // The missing directory is created for next time.
    assert!(layout.games_dir.is_dir());
}

#[test]
fn missing_emulator_is_fatal_before_scanning() {
    let root = tempfile::tempdir().unwrap();
    let layout = Layout::from_root(root.path());
    let mut settings = Settings::default();
    settings.emulator.program = String::new();

    let err = prepare(&settings, &layout, Offline, Recorder::default())
        .err()
        .unwrap();
    assert!(matches!(err, AppError::Launcher(LaunchError::NoEmulator)));
    assert!(!layout.games_dir.exists());
}

//! Local plumbing for romshelf: where things live on disk, finding ROMs in
//! the games directory and handing them to the emulator.

pub mod error;
pub mod launcher;
pub mod scanner;
pub mod settings;

pub use error::LaunchError;
pub use launcher::{Launcher, Spawner, SystemSpawner, open_url};
pub use scanner::scan_games;
pub use settings::{Layout, Settings, load_settings};

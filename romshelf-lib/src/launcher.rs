use std::cell::RefCell;
use std::ffi::{OsStr, OsString};
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};

use crate::error::LaunchError;
use crate::scanner::has_extension;

/// Starts external programs without waiting for them.
///
/// Only launch-time failures are reported; whatever the process does
/// afterwards is not observed.
pub trait Spawner {
    fn spawn_detached(&self, program: &OsStr, args: &[&OsStr]) -> io::Result<()>;

    /// Open `url` in the platform's default handler.
    fn open_detached(&self, url: &str) -> io::Result<()>;

    /// Collect children that have exited. Returns how many are still running.
    fn reap(&self) -> usize {
        0
    }
}

impl<S: Spawner + ?Sized> Spawner for &S {
    fn spawn_detached(&self, program: &OsStr, args: &[&OsStr]) -> io::Result<()> {
        (**self).spawn_detached(program, args)
    }

    fn open_detached(&self, url: &str) -> io::Result<()> {
        (**self).open_detached(url)
    }

    fn reap(&self) -> usize {
        (**self).reap()
    }
}

/// Spawns real OS processes.
///
/// Spawned children are kept until [`Spawner::reap`] sees them exit, so
/// finished emulators don't linger as zombies.
#[derive(Debug, Default)]
pub struct SystemSpawner {
    children: RefCell<Vec<Child>>,
}

impl Spawner for SystemSpawner {
    fn spawn_detached(&self, program: &OsStr, args: &[&OsStr]) -> io::Result<()> {
        let child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .spawn()?;
        log::debug!("Started {:?} (pid {})", program, child.id());
        self.children.borrow_mut().push(child);
        Ok(())
    }

    fn open_detached(&self, url: &str) -> io::Result<()> {
        open::that_detached(url)
    }

    fn reap(&self) -> usize {
        let mut children = self.children.borrow_mut();
        children.retain_mut(|child| match child.try_wait() {
            Ok(Some(status)) => {
                log::debug!("pid {} exited: {}", child.id(), status);
                false
            }
            Ok(None) => true,
            Err(e) => {
                log::warn!("Could not poll pid {}: {}", child.id(), e);
                false
            }
        });
        children.len()
    }
}

/// Validates ROMs and hands them to the configured emulator.
#[derive(Debug)]
pub struct Launcher<S = SystemSpawner> {
    program: PathBuf,
    rom_extension: String,
    spawner: S,
}

impl<S: Spawner> Launcher<S> {
    /// Set up the launcher. Fails if `program` is empty or cannot be found
    /// as a file or on `PATH`.
    pub fn new(program: &str, rom_extension: &str, spawner: S) -> Result<Self, LaunchError> {
        let program = program.trim();
        if program.is_empty() {
            return Err(LaunchError::NoEmulator);
        }
        let resolved =
            find_program(program).ok_or_else(|| LaunchError::EmulatorNotFound(program.to_string()))?;
        log::info!("Using emulator {}", resolved.display());

        Ok(Self {
            program: resolved,
            rom_extension: rom_extension.trim_start_matches('.').to_string(),
            spawner,
        })
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn spawner(&self) -> &S {
        &self.spawner
    }

    /// Check that the ROM exists and has the expected extension.
    pub fn validate_rom(&self, rom: &Path) -> Result<(), LaunchError> {
        if !rom.is_file() {
            return Err(LaunchError::RomMissing(rom.to_path_buf()));
        }
        if !has_extension(rom, &self.rom_extension) {
            return Err(LaunchError::InvalidRomType(rom.to_path_buf()));
        }
        Ok(())
    }

    /// Start the emulator with `rom` as its only argument.
    pub fn launch(&self, rom: &Path) -> Result<(), LaunchError> {
        self.validate_rom(rom)?;
        log::info!("Launching {} with {}", rom.display(), self.program.display());
        self.spawner
            .spawn_detached(self.program.as_os_str(), &[rom.as_os_str()])
            .map_err(|source| LaunchError::Spawn {
                program: self.program.display().to_string(),
                source,
            })
    }
}

/// Open `url` with the platform's default handler.
pub fn open_url(spawner: &impl Spawner, url: &str) -> Result<(), LaunchError> {
    log::info!("Opening {}", url);
    spawner
        .open_detached(url)
        .map_err(|source| LaunchError::Spawn {
            program: "URL handler".to_string(),
            source,
        })
}

/// Resolve a program name the way a shell would: paths are checked directly,
/// bare names are searched for on `PATH`.
pub fn find_program(program: &str) -> Option<PathBuf> {
    let candidate = Path::new(program);
    if candidate.components().count() > 1 || candidate.is_absolute() {
        return candidate.is_file().then(|| candidate.to_path_buf());
    }

    let path_var: OsString = std::env::var_os("PATH")?;
    std::env::split_paths(&path_var)
        .flat_map(|dir| executable_names(program).map(move |name| dir.join(name)))
        .find(|p| p.is_file())
}

fn executable_names(program: &str) -> impl Iterator<Item = String> + '_ {
    let suffixes: &[&str] = if cfg!(windows) { &["", ".exe", ".bat", ".cmd"] } else { &[""] };
    suffixes.iter().map(move |s| format!("{program}{s}"))
}

#[cfg(test)]
#[path = "tests/launcher_tests.rs"]
mod tests;

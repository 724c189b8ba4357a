use std::path::PathBuf;

use thiserror::Error;

/// Errors from validating or starting an emulator process.
#[derive(Debug, Error)]
pub enum LaunchError {
    /// No emulator program configured
    #[error("No emulator path specified")]
    NoEmulator,

    /// The configured program is neither a file nor on `PATH`
    #[error("Emulator not found: {0}")]
    EmulatorNotFound(String),

    #[error("ROM file does not exist: {}", .0.display())]
    RomMissing(PathBuf),

    #[error("Invalid ROM file type: {}", .0.display())]
    InvalidRomType(PathBuf),

    /// The OS refused to start the process
    #[error("Failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

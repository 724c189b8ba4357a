use std::path::PathBuf;

use thiserror::Error;

/// Errors that end the session before or instead of showing the list.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Failed to create window: {0}")]
    Ui(#[from] eframe::Error),

    #[error("Failed to initialize emulator launcher: {0}")]
    Launcher(#[from] romshelf_lib::LaunchError),

    #[error("No ROMs found in {}", .0.display())]
    NoRoms(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure to turn an image file into a texture.
#[derive(Debug, Error)]
pub enum ImageLoadError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("decode error: {0}")]
    Decode(#[from] image::ImageError),
}

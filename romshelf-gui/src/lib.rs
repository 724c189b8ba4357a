//! Desktop front end for romshelf: the game list window, its input
//! handling, and the glue that starts it.

pub mod app;
pub mod cache;
pub mod error;
pub mod library;
pub mod state;
pub mod widgets;
pub mod wrap;

pub use app::{FatalErrorApp, ShelfApp};
pub use error::AppError;
pub use library::{Library, connect_catalog, prepare};

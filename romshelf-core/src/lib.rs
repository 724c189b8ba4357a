//! Core types shared by the romshelf crates: the per-ROM metadata record and
//! the filename normalizer that feeds both catalog search and the offline
//! fallback.

pub mod metadata;
pub mod normalize;

pub use metadata::{DEFAULT_SUMMARY, GameMetadata, NO_DESCRIPTION, NOT_FOUND, UNKNOWN};
pub use normalize::normalize;

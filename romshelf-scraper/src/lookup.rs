use std::path::Path;

use crate::error::ScrapeError;
use crate::types::GameDetails;

/// Outcome of a single catalog request.
///
/// "Not in the catalog" and "could not ask the catalog" are ordinary results
/// here rather than errors, so callers can fall back without unwinding.
#[derive(Debug)]
pub enum Lookup<T> {
    Found(T),
    NotFound,
    TransportError(ScrapeError),
}

impl<T> Lookup<T> {
    pub fn is_found(&self) -> bool {
        matches!(self, Lookup::Found(_))
    }

    /// Collapse to an `Option`, discarding why nothing was found.
    pub fn found(self) -> Option<T> {
        match self {
            Lookup::Found(value) => Some(value),
            Lookup::NotFound | Lookup::TransportError(_) => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Lookup<U> {
        match self {
            Lookup::Found(value) => Lookup::Found(f(value)),
            Lookup::NotFound => Lookup::NotFound,
            Lookup::TransportError(e) => Lookup::TransportError(e),
        }
    }
}

impl<T> From<Result<Lookup<T>, ScrapeError>> for Lookup<T> {
    fn from(result: Result<Lookup<T>, ScrapeError>) -> Self {
        result.unwrap_or_else(Lookup::TransportError)
    }
}

/// A remote game catalog as seen by the metadata resolver.
///
/// Every call is best effort: implementations never retry and never panic,
/// and report failures through `Lookup` or `Result`.
pub trait Catalog {
    /// Whether a session token is held. Without one the resolver must not
    /// issue any request.
    fn has_session(&self) -> bool;

    /// Find the catalog id of the first game matching `clean_name`.
    fn search(&self, clean_name: &str) -> Lookup<u64>;

    /// Fetch the display fields for a catalog id.
    fn fetch_details(&self, id: u64) -> Lookup<GameDetails>;

    /// Download a cover image to `dest`, leaving no file behind on failure.
    fn download_cover(&self, url: &str, dest: &Path) -> Result<(), ScrapeError>;
}

impl<C: Catalog + ?Sized> Catalog for Box<C> {
    fn has_session(&self) -> bool {
        (**self).has_session()
    }

    fn search(&self, clean_name: &str) -> Lookup<u64> {
        (**self).search(clean_name)
    }

    fn fetch_details(&self, id: u64) -> Lookup<GameDetails> {
        (**self).fetch_details(id)
    }

    fn download_cover(&self, url: &str, dest: &Path) -> Result<(), ScrapeError> {
        (**self).download_cover(url, dest)
    }
}

/// Catalog used when lookups are disabled or no client could be built.
#[derive(Debug, Clone, Copy, Default)]
pub struct Offline;

impl Catalog for Offline {
    fn has_session(&self) -> bool {
        false
    }

    fn search(&self, _clean_name: &str) -> Lookup<u64> {
        Lookup::TransportError(ScrapeError::NoSession)
    }

    fn fetch_details(&self, _id: u64) -> Lookup<GameDetails> {
        Lookup::TransportError(ScrapeError::NoSession)
    }

    fn download_cover(&self, _url: &str, _dest: &Path) -> Result<(), ScrapeError> {
        Err(ScrapeError::NoSession)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn found_keeps_value() {
        let lookup: Lookup<u64> = Lookup::Found(7);
        assert!(lookup.is_found());
        assert_eq!(lookup.map(|id| id * 2).found(), Some(14));
    }

    #[test]
    fn not_found_and_transport_error_collapse_to_none() {
        assert_eq!(Lookup::<u64>::NotFound.found(), None);
        let err = Lookup::<u64>::TransportError(ScrapeError::NoSession);
        assert!(!err.is_found());
        assert_eq!(err.found(), None);
    }

    #[test]
    fn result_error_becomes_transport_error() {
        let lookup: Lookup<u64> = Err(ScrapeError::Auth("expired".into())).into();
        assert!(matches!(
            lookup,
            Lookup::TransportError(ScrapeError::Auth(_))
        ));
    }

    #[test]
    fn offline_catalog_has_no_session() {
        let catalog: Box<dyn Catalog> = Box::new(Offline);
        assert!(!catalog.has_session());
        assert!(!catalog.search("Metroid").is_found());
        assert!(catalog.download_cover("https://x/y.jpg", Path::new("y.jpg")).is_err());
    }
}

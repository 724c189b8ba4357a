use std::cell::{Cell, RefCell};

use romshelf_core::{NO_DESCRIPTION, NOT_FOUND};

use super::*;
use crate::error::ScrapeError;
use crate::types::{CoverRef, InvolvedCompany, NamedRef};

/// Scripted catalog that records every call.
#[derive(Default)]
struct FakeCatalog {
    session: bool,
    search_result: Option<u64>,
    search_fails: bool,
    details: Option<GameDetails>,
    cover_bytes: Option<&'static [u8]>,
    searches: RefCell<Vec<String>>,
    detail_calls: Cell<usize>,
    downloads: Cell<usize>,
}

impl FakeCatalog {
    fn network_calls(&self) -> usize {
        self.searches.borrow().len() + self.detail_calls.get() + self.downloads.get()
    }
}

impl Catalog for FakeCatalog {
    fn has_session(&self) -> bool {
        self.session
    }

    fn search(&self, clean_name: &str) -> Lookup<u64> {
        self.searches.borrow_mut().push(clean_name.to_string());
        if self.search_fails {
            return Lookup::TransportError(ScrapeError::ServerError {
                status: 401,
                message: "token expired".into(),
            });
        }
        match self.search_result {
            Some(id) => Lookup::Found(id),
            None => Lookup::NotFound,
        }
    }

    fn fetch_details(&self, _id: u64) -> Lookup<GameDetails> {
        self.detail_calls.set(self.detail_calls.get() + 1);
        match &self.details {
            Some(d) => Lookup::Found(d.clone()),
            None => Lookup::NotFound,
        }
    }

    fn download_cover(&self, _url: &str, dest: &Path) -> Result<(), ScrapeError> {
        self.downloads.set(self.downloads.get() + 1);
        match self.cover_bytes {
            Some(bytes) => {
                std::fs::write(dest, bytes)?;
                Ok(())
            }
            None => Err(ScrapeError::EmptyDownload(dest.to_path_buf())),
        }
    }
}

fn smb_details() -> GameDetails {
    GameDetails {
        id: 1074,
        name: Some("Super Mario Bros.".into()),
        first_release_date: Some(495_417_600),
        genres: vec![NamedRef {
            id: Some(8),
            name: Some("Platform".into()),
        }],
        cover: Some(CoverRef {
            id: Some(1),
            url: Some("//images.igdb.com/igdb/image/upload/t_thumb/co1.jpg".into()),
        }),
        summary: Some("A plumber saves a princess.".into()),
        involved_companies: vec![InvolvedCompany {
            id: Some(3),
            company: Some(NamedRef {
                id: Some(70),
                name: Some("Nintendo".into()),
            }),
        }],
        url: Some("https://www.igdb.com/games/super-mario-bros".into()),
    }
}

fn resolver(catalog: FakeCatalog, images: &Path) -> MetadataResolver<FakeCatalog> {
    MetadataResolver::new(catalog, images, "assets/not_found.png")
}

#[test]
fn no_session_makes_no_network_calls() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = FakeCatalog {
        session: false,
        search_result: Some(1),
        details: Some(smb_details()),
        ..Default::default()
    };
    let r = resolver(catalog, dir.path());

    let meta = r.resolve("super_mario_bros_(U).nes");

    assert_eq!(r.catalog().network_calls(), 0);
    assert_eq!(meta, r.fallback("super_mario_bros_(U).nes"));
    assert_eq!(meta.title, "super mario bros");
    assert_eq!(meta.release_year, NOT_FOUND);
    assert_eq!(meta.description, NO_DESCRIPTION);
    assert_eq!(meta.catalog_url, None);
    assert_eq!(
        meta.image_path.as_deref(),
        Some(Path::new("assets/not_found.png"))
    );
}

#[test]
fn search_uses_normalized_name() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = FakeCatalog {
        session: true,
        ..Default::default()
    };
    let r = resolver(catalog, dir.path());
    r.resolve("Legend_of_Zelda_(U)_(PRG1).nes");
    assert_eq!(*r.catalog().searches.borrow(), vec!["Legend of Zelda"]);
}

#[test]
fn search_miss_falls_back_without_details_call() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = FakeCatalog {
        session: true,
        search_result: None,
        ..Default::default()
    };
    let r = resolver(catalog, dir.path());
    let meta = r.resolve("obscure_homebrew.nes");
    assert_eq!(meta, r.fallback("obscure_homebrew.nes"));
    assert_eq!(r.catalog().detail_calls.get(), 0);
}

#[test]
fn transport_error_falls_back() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = FakeCatalog {
        session: true,
        search_fails: true,
        ..Default::default()
    };
    let r = resolver(catalog, dir.path());
    let meta = r.resolve("Metroid (U).nes");
    assert_eq!(meta, r.fallback("Metroid (U).nes"));
}

#[test]
fn details_miss_falls_back() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = FakeCatalog {
        session: true,
        search_result: Some(99),
        details: None,
        ..Default::default()
    };
    let r = resolver(catalog, dir.path());
    let meta = r.resolve("Metroid (U).nes");
    assert_eq!(meta, r.fallback("Metroid (U).nes"));
    assert_eq!(r.catalog().detail_calls.get(), 1);
}

#[test]
fn catalog_hit_maps_every_field() {
    let dir = tempfile::tempdir().unwrap();
    let images = dir.path().join("images");
    let catalog = FakeCatalog {
        session: true,
        search_result: Some(1074),
        details: Some(smb_details()),
        cover_bytes: Some(&b"jpeg-bytes"[..]),
        ..Default::default()
    };
    let r = resolver(catalog, &images);

    let meta = r.resolve("super_mario_bros_(U).nes");

    assert_eq!(meta.filename, "super_mario_bros_(U).nes");
    assert_eq!(meta.title, "Super Mario Bros.");
    assert_eq!(meta.description, "A plumber saves a princess.");
    assert_eq!(meta.release_year, "1985");
    assert_eq!(meta.publisher, "Nintendo");
    assert_eq!(meta.genre, "Platform");
    assert_eq!(
        meta.catalog_url.as_deref(),
        Some("https://www.igdb.com/games/super-mario-bros")
    );
    let cover = images.join("super mario bros.jpg");
    assert_eq!(meta.image_path.as_deref(), Some(cover.as_path()));
    assert!(cover.exists(), "images dir should be created on demand");
}

#[test]
fn sparse_hit_uses_unknown_sentinels() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = FakeCatalog {
        session: true,
        search_result: Some(5),
        details: Some(GameDetails {
            id: 5,
            ..Default::default()
        }),
        ..Default::default()
    };
    let r = resolver(catalog, dir.path());

    let meta = r.resolve("Kid_Icarus_(E).nes");

    assert_eq!(meta.title, "Kid Icarus");
    assert_eq!(meta.description, DEFAULT_SUMMARY);
    assert_eq!(meta.release_year, UNKNOWN);
    assert_eq!(meta.publisher, UNKNOWN);
    assert_eq!(meta.genre, UNKNOWN);
    assert_eq!(meta.catalog_url, None);
    assert_eq!(meta.image_path, None);
    assert_eq!(r.catalog().downloads.get(), 0);
}

#[test]
fn failed_cover_download_keeps_record() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = FakeCatalog {
        session: true,
        search_result: Some(1074),
        details: Some(smb_details()),
        cover_bytes: None,
        ..Default::default()
    };
    let r = resolver(catalog, dir.path());

    let meta = r.resolve("super_mario_bros_(U).nes");

    assert_eq!(meta.title, "Super Mario Bros.");
    assert_eq!(meta.image_path, None);
    assert!(meta.catalog_url.is_some());
}

#[test]
fn existing_cover_is_reused() {
    let dir = tempfile::tempdir().unwrap();
    let existing = dir.path().join("super mario bros.jpg");
    std::fs::write(&existing, b"cached").unwrap();
    let catalog = FakeCatalog {
        session: true,
        search_result: Some(1074),
        details: Some(smb_details()),
        cover_bytes: Some(&b"fresh"[..]),
        ..Default::default()
    };
    let r = resolver(catalog, dir.path());

    let meta = r.resolve("super_mario_bros_(U).nes");

    assert_eq!(meta.image_path.as_deref(), Some(existing.as_path()));
    assert_eq!(r.catalog().downloads.get(), 0);
}

#[test]
fn resolve_all_keeps_order_and_length() {
    let dir = tempfile::tempdir().unwrap();
    let r = resolver(FakeCatalog::default(), dir.path());
    let files = vec!["b_game.nes".to_string(), "a_game.nes".to_string()];
    let list = r.resolve_all(&files);
    let titles: Vec<&str> = list.iter().map(|m| m.title.as_str()).collect();
    assert_eq!(titles, vec!["b game", "a game"]);
}

pub mod client;
pub mod credentials;
pub mod error;
pub mod lookup;
pub mod media;
pub mod resolve;
pub mod types;

pub use client::{Endpoints, IgdbClient, NES_PLATFORM_ID};
pub use credentials::{CredentialSource, CredentialSources, Credentials, config_path, credential_sources};
pub use error::ScrapeError;
pub use lookup::{Catalog, Lookup, Offline};
pub use resolve::MetadataResolver;
pub use types::GameDetails;

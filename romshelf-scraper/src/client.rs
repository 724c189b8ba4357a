use std::path::Path;
use std::time::Duration;

use reqwest::header::CONTENT_TYPE;

use crate::credentials::Credentials;
use crate::error::ScrapeError;
use crate::lookup::{Catalog, Lookup};
use crate::media;
use crate::types::{GameDetails, SearchHit, TokenResponse};

pub const TOKEN_URL: &str = "https://id.twitch.tv/oauth2/token";
pub const GAMES_URL: &str = "https://api.igdb.com/v4/games";

/// IGDB platform id for the Nintendo Entertainment System.
pub const NES_PLATFORM_ID: u32 = 18;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(30);

/// Remote URLs used by the client.
#[derive(Debug, Clone)]
pub struct Endpoints {
    pub token_url: String,
    pub games_url: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            token_url: TOKEN_URL.to_string(),
            games_url: GAMES_URL.to_string(),
        }
    }
}

struct Session {
    client_id: String,
    access_token: String,
}

/// Blocking HTTP client for the IGDB game catalog.
///
/// The bearer token is fetched once by [`IgdbClient::authenticate`] and kept
/// for the life of the client. It is never refreshed: once it expires every
/// request fails and callers fall back to filename metadata.
pub struct IgdbClient {
    http: reqwest::blocking::Client,
    endpoints: Endpoints,
    platform_id: u32,
    session: Option<Session>,
}

impl IgdbClient {
    /// Build an unauthenticated client. No request is made until
    /// [`authenticate`](Self::authenticate) succeeds.
    pub fn new(endpoints: Endpoints, platform_id: u32) -> Result<Self, ScrapeError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .connect_timeout(CONNECT_TIMEOUT)
            .user_agent(concat!("romshelf/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            endpoints,
            platform_id,
            session: None,
        })
    }

    /// Exchange client credentials for a bearer token.
    pub fn authenticate(&mut self, creds: &Credentials) -> Result<(), ScrapeError> {
        log::info!("Authenticating with IGDB...");

        let resp = self
            .http
            .post(&self.endpoints.token_url)
            .form(&[
                ("client_id", creds.client_id.as_str()),
                ("client_secret", creds.client_secret.as_str()),
                ("grant_type", "client_credentials"),
            ])
            .send()?;

        let status = resp.status();
        let text = resp.text()?;
        if !status.is_success() {
            return Err(ScrapeError::Auth(format!(
                "token endpoint returned HTTP {}: {}",
                status.as_u16(),
                truncate(&text, 200)
            )));
        }

        let access_token = parse_token_response(&text)?;
        self.session = Some(Session {
            client_id: creds.client_id.clone(),
            access_token,
        });
        log::info!("Authenticated with IGDB");
        Ok(())
    }

    pub fn platform_id(&self) -> u32 {
        self.platform_id
    }

    /// POST a query to the games endpoint and return the raw body.
    fn query(&self, body: String) -> Result<String, ScrapeError> {
        let session = self.session.as_ref().ok_or(ScrapeError::NoSession)?;
        log::debug!("IGDB query: {}", body);

        let resp = self
            .http
            .post(&self.endpoints.games_url)
            .bearer_auth(&session.access_token)
            .header("Client-ID", &session.client_id)
            .header(CONTENT_TYPE, "text/plain")
            .body(body)
            .send()?;

        let status = resp.status();
        let text = resp.text()?;
        if !status.is_success() {
            return Err(ScrapeError::ServerError {
                status: status.as_u16(),
                message: truncate(&text, 200).to_string(),
            });
        }
        log::trace!("IGDB response: {}", text);
        Ok(text)
    }
}

impl Catalog for IgdbClient {
    fn has_session(&self) -> bool {
        self.session.is_some()
    }

    fn search(&self, clean_name: &str) -> Lookup<u64> {
        match self.query(search_query(clean_name, self.platform_id)) {
            Ok(text) => parse_search_response(&text),
            Err(e) => Lookup::TransportError(e),
        }
    }

    fn fetch_details(&self, id: u64) -> Lookup<GameDetails> {
        match self.query(details_query(id)) {
            Ok(text) => parse_details_response(&text),
            Err(e) => Lookup::TransportError(e),
        }
    }

    fn download_cover(&self, url: &str, dest: &Path) -> Result<(), ScrapeError> {
        log::debug!("Downloading cover {} -> {}", url, dest.display());
        let mut resp = self
            .http
            .get(url)
            .timeout(DOWNLOAD_TIMEOUT)
            .send()?
            .error_for_status()?;
        let bytes = media::save_verified(&mut resp, dest)?;
        log::debug!("Saved {} bytes to {}", bytes, dest.display());
        Ok(())
    }
}

/// Escape a value for use inside a double-quoted query string.
pub fn escape_query_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if matches!(c, '"' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Name search restricted to one platform.
pub fn search_query(clean_name: &str, platform_id: u32) -> String {
    format!(
        "search \"{}\"; fields name; where platforms = ({});",
        escape_query_string(clean_name),
        platform_id
    )
}

/// Field projection for everything the list displays.
pub fn details_query(id: u64) -> String {
    format!(
        "fields name,first_release_date,genres.name,cover.url,summary,\
         involved_companies.company.name,url; where id = {};",
        id
    )
}

/// Extract the bearer token from a token endpoint body.
pub fn parse_token_response(text: &str) -> Result<String, ScrapeError> {
    let token: TokenResponse = serde_json::from_str(text)?;
    if token.access_token.is_empty() {
        return Err(ScrapeError::Auth(format!(
            "no access token in response: {}",
            truncate(text, 200)
        )));
    }
    Ok(token.access_token)
}

/// First hit's id, or `NotFound` for empty or malformed bodies.
pub fn parse_search_response(text: &str) -> Lookup<u64> {
    match serde_json::from_str::<Vec<SearchHit>>(text) {
        Ok(hits) => match hits.first() {
            Some(hit) => Lookup::Found(hit.id),
            None => Lookup::NotFound,
        },
        Err(e) => {
            log::debug!("Unusable search response ({e}): {}", truncate(text, 200));
            Lookup::NotFound
        }
    }
}

/// First record of a details response, or `NotFound` for empty or malformed bodies.
pub fn parse_details_response(text: &str) -> Lookup<GameDetails> {
    match serde_json::from_str::<Vec<GameDetails>>(text) {
        Ok(mut games) if !games.is_empty() => Lookup::Found(games.swap_remove(0)),
        Ok(_) => Lookup::NotFound,
        Err(e) => {
            log::debug!("Unusable details response ({e}): {}", truncate(text, 200));
            Lookup::NotFound
        }
    }
}

fn truncate(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
#[path = "tests/client_tests.rs"]
mod tests;

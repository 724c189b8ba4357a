use chrono::{DateTime, Datelike};
use serde::Deserialize;

/// Body returned by the OAuth client-credentials token endpoint.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    #[serde(default)]
    pub access_token: String,
    #[serde(default)]
    pub expires_in: Option<u64>,
    #[serde(default)]
    pub token_type: Option<String>,
}

/// One row of a `search` query (`fields name;`).
#[derive(Debug, Deserialize, Clone)]
pub struct SearchHit {
    pub id: u64,
    #[serde(default)]
    pub name: Option<String>,
}

/// Game record from the details query. Expanded sub-objects (`genres.name`,
/// `cover.url`, `involved_companies.company.name`) arrive as nested objects.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct GameDetails {
    pub id: u64,
    #[serde(default)]
    pub name: Option<String>,
    /// Unix timestamp (seconds).
    #[serde(default)]
    pub first_release_date: Option<i64>,
    #[serde(default)]
    pub genres: Vec<NamedRef>,
    #[serde(default)]
    pub cover: Option<CoverRef>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub involved_companies: Vec<InvolvedCompany>,
    #[serde(default)]
    pub url: Option<String>,
}

impl GameDetails {
    pub fn title(&self) -> Option<&str> {
        non_empty(self.name.as_deref())
    }

    pub fn summary(&self) -> Option<&str> {
        non_empty(self.summary.as_deref())
    }

    pub fn catalog_url(&self) -> Option<&str> {
        non_empty(self.url.as_deref())
    }

    /// Calendar year (UTC) of the first release.
    pub fn release_year(&self) -> Option<i32> {
        self.first_release_date
            .and_then(|ts| DateTime::from_timestamp(ts, 0))
            .map(|dt| dt.year())
    }

    /// Name of the first involved company that has one.
    pub fn publisher(&self) -> Option<&str> {
        self.involved_companies
            .iter()
            .filter_map(|ic| ic.company.as_ref())
            .find_map(|c| non_empty(c.name.as_deref()))
    }

    /// Name of the first genre that has one.
    pub fn genre(&self) -> Option<&str> {
        self.genres.iter().find_map(|g| non_empty(g.name.as_deref()))
    }

    /// Absolute cover URL. The catalog hands out protocol-relative URLs
    /// (`//images.igdb.com/...`), which get an `https:` scheme here.
    pub fn cover_url(&self) -> Option<String> {
        let raw = non_empty(self.cover.as_ref()?.url.as_deref())?;
        if raw.starts_with("//") {
            Some(format!("https:{raw}"))
        } else if raw.starts_with("http://") || raw.starts_with("https://") {
            Some(raw.to_string())
        } else {
            None
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct NamedRef {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct CoverRef {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct InvolvedCompany {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub company: Option<NamedRef>,
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|s| !s.is_empty())
}

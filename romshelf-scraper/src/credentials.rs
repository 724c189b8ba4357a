use std::path::PathBuf;

use crate::error::ScrapeError;

// XOR-obfuscated client credentials embedded at compile time.
// Set IGDB_CLIENT_ID and IGDB_CLIENT_SECRET env vars when building.
include!(concat!(env!("OUT_DIR"), "/embedded_credentials.rs"));

pub const CLIENT_ID_VAR: &str = "IGDB_CLIENT_ID";
pub const CLIENT_SECRET_VAR: &str = "IGDB_CLIENT_SECRET";

fn deobfuscate(data: &[u8]) -> Option<String> {
    let decoded: Vec<u8> = data
        .iter()
        .enumerate()
        .map(|(i, b)| b ^ OBFUSCATION_KEY[i % OBFUSCATION_KEY.len()])
        .collect();
    String::from_utf8(decoded).ok()
}

fn embedded_client_id() -> Option<String> {
    EMBEDDED_CLIENT_ID.and_then(deobfuscate)
}

fn embedded_client_secret() -> Option<String> {
    EMBEDDED_CLIENT_SECRET.and_then(deobfuscate)
}

/// Returns true if client credentials were embedded at compile time.
pub fn has_embedded_credentials() -> bool {
    EMBEDDED_CLIENT_ID.is_some() && EMBEDDED_CLIENT_SECRET.is_some()
}

/// Twitch application credentials used for the IGDB token exchange.
#[derive(Clone)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

/// Where a credential field's value came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialSource {
    /// Loaded from an environment variable.
    EnvVar(&'static str),
    /// Loaded from the config file.
    ConfigFile,
    /// Embedded at compile time.
    Embedded,
    /// Not set anywhere.
    Missing,
}

impl std::fmt::Display for CredentialSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EnvVar(var) => write!(f, "env ${}", var),
            Self::ConfigFile => write!(f, "config file"),
            Self::Embedded => write!(f, "embedded"),
            Self::Missing => write!(f, "not set"),
        }
    }
}

/// Provenance of each credential field.
#[derive(Debug)]
pub struct CredentialSources {
    pub client_id: CredentialSource,
    pub client_secret: CredentialSource,
}

/// TOML config file format.
#[derive(Debug, Default, serde::Deserialize)]
struct ConfigFile {
    igdb: Option<IgdbConfig>,
}

#[derive(Debug, Default, Clone, serde::Deserialize)]
struct IgdbConfig {
    client_id: Option<String>,
    client_secret: Option<String>,
}

impl Credentials {
    /// Load credentials from environment variables, config file, or embedded defaults.
    ///
    /// Priority: env vars > config file > embedded (compile-time).
    pub fn load() -> Result<Self, ScrapeError> {
        Self::load_with(|var| std::env::var(var).ok(), load_config_file())
    }

    fn load_with(
        env: impl Fn(&str) -> Option<String>,
        config: Option<IgdbConfig>,
    ) -> Result<Self, ScrapeError> {
        let client_id = env(CLIENT_ID_VAR)
            .or_else(|| config.as_ref().and_then(|c| c.client_id.clone()))
            .or_else(embedded_client_id)
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| {
                ScrapeError::Config(format!(
                    "Missing client_id. Set {CLIENT_ID_VAR} env var or add [igdb] client_id to the config file"
                ))
            })?;

        let client_secret = env(CLIENT_SECRET_VAR)
            .or_else(|| config.as_ref().and_then(|c| c.client_secret.clone()))
            .or_else(embedded_client_secret)
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| {
                ScrapeError::Config(format!(
                    "Missing client_secret. Set {CLIENT_SECRET_VAR} env var or add [igdb] client_secret to the config file"
                ))
            })?;

        Ok(Self {
            client_id,
            client_secret,
        })
    }
}

/// Return the path to the credentials config file.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("romshelf").join("credentials.toml"))
}

/// Determine where each credential field is coming from.
pub fn credential_sources() -> CredentialSources {
    let config = load_config_file();

    let client_id = if std::env::var(CLIENT_ID_VAR).is_ok() {
        CredentialSource::EnvVar(CLIENT_ID_VAR)
    } else if config.as_ref().and_then(|c| c.client_id.as_ref()).is_some() {
        CredentialSource::ConfigFile
    } else if has_embedded_credentials() {
        CredentialSource::Embedded
    } else {
        CredentialSource::Missing
    };

    let client_secret = if std::env::var(CLIENT_SECRET_VAR).is_ok() {
        CredentialSource::EnvVar(CLIENT_SECRET_VAR)
    } else if config
        .as_ref()
        .and_then(|c| c.client_secret.as_ref())
        .is_some()
    {
        CredentialSource::ConfigFile
    } else if has_embedded_credentials() {
        CredentialSource::Embedded
    } else {
        CredentialSource::Missing
    };

    CredentialSources {
        client_id,
        client_secret,
    }
}

fn load_config_file() -> Option<IgdbConfig> {
    let path = config_path()?;
    let content = std::fs::read_to_string(&path).ok()?;
    parse_config(&content)
}

fn parse_config(content: &str) -> Option<IgdbConfig> {
    match toml::from_str::<ConfigFile>(content) {
        Ok(config) => config.igdb,
        Err(e) => {
            log::warn!("Ignoring malformed credentials file: {e}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    fn file_config() -> Option<IgdbConfig> {
        Some(IgdbConfig {
            client_id: Some("file-id".into()),
            client_secret: Some("file-secret".into()),
        })
    }

    #[test]
    fn env_beats_config_file() {
        let env = |var: &str| match var {
            CLIENT_ID_VAR => Some("env-id".to_string()),
            _ => None,
        };
        let creds = Credentials::load_with(env, file_config()).unwrap();
        assert_eq!(creds.client_id, "env-id");
        assert_eq!(creds.client_secret, "file-secret");
    }

    #[test]
    fn config_file_used_without_env() {
        let creds = Credentials::load_with(no_env, file_config()).unwrap();
        assert_eq!(creds.client_id, "file-id");
        assert_eq!(creds.client_secret, "file-secret");
    }

    #[test]
    fn missing_everything_is_config_error() {
        if has_embedded_credentials() {
            return;
        }
        let err = Credentials::load_with(no_env, None).unwrap_err();
        assert!(matches!(err, ScrapeError::Config(_)));
    }

    #[test]
    fn blank_values_are_rejected() {
        if has_embedded_credentials() {
            return;
        }
        let config = Some(IgdbConfig {
            client_id: Some("  ".into()),
            client_secret: Some("s".into()),
        });
        assert!(Credentials::load_with(no_env, config).is_err());
    }

    #[test]
    fn parses_igdb_table() {
        let config = parse_config("[igdb]\nclient_id = \"abc\"\nclient_secret = \"xyz\"\n").unwrap();
        assert_eq!(config.client_id.as_deref(), Some("abc"));
        assert_eq!(config.client_secret.as_deref(), Some("xyz"));
    }

    #[test]
    fn malformed_config_is_ignored() {
        assert!(parse_config("[igdb\nclient_id = ").is_none());
    }

    #[test]
    fn debug_output_hides_secret() {
        let creds = Credentials {
            client_id: "id".into(),
            client_secret: "hunter2".into(),
        };
        assert!(!format!("{creds:?}").contains("hunter2"));
    }
}

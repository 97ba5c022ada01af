//! Endpoint and key configuration.
//!
//! Defaults are compiled in; each can be overridden from the environment
//! (a `.env` file is honoured). API keys default to empty, which the
//! backends reject, landing every fetch on the fallback path.

use std::time::Duration;

use crate::auth::Credentials;
use crate::client::{ComicsClient, RosterClient};
use crate::error::ApiError;
use crate::repository::{CharacterRepository, Fallback};
use crate::source::{ComicsSource, RosterSource};
use crate::transport::ReqwestTransport;

pub const DEFAULT_COMICS_BASE_URL: &str = "https://gateway.marvel.com/v1/public";
pub const DEFAULT_ROSTER_BASE_URL: &str = "https://marvelrivalsapi.com/api/v1";

pub const ENV_COMICS_BASE_URL: &str = "HERO_COMICS_BASE_URL";
pub const ENV_COMICS_PUBLIC_KEY: &str = "HERO_COMICS_PUBLIC_KEY";
pub const ENV_COMICS_PRIVATE_KEY: &str = "HERO_COMICS_PRIVATE_KEY";
pub const ENV_ROSTER_BASE_URL: &str = "HERO_ROSTER_BASE_URL";
pub const ENV_ROSTER_API_KEY: &str = "HERO_ROSTER_API_KEY";
pub const ENV_HTTP_TIMEOUT_SECS: &str = "HERO_HTTP_TIMEOUT_SECS";

#[derive(Clone)]
pub struct Config {
    pub comics_base_url: String,
    pub comics_credentials: Credentials,
    pub roster_base_url: String,
    pub roster_api_key: String,
    /// `None` waits indefinitely.
    pub http_timeout: Option<Duration>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            comics_base_url: DEFAULT_COMICS_BASE_URL.to_string(),
            comics_credentials: Credentials::new("", ""),
            roster_base_url: DEFAULT_ROSTER_BASE_URL.to_string(),
            roster_api_key: String::new(),
            http_timeout: None,
        }
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("comics_base_url", &self.comics_base_url)
            .field("comics_credentials", &self.comics_credentials)
            .field("roster_base_url", &self.roster_base_url)
            .field("roster_api_key", &"<redacted>")
            .field("http_timeout", &self.http_timeout)
            .finish()
    }
}

impl Config {
    /// Load `.env` if present, then read the process environment.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; unset or blank keys keep defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let defaults = Self::default();

        Self {
            comics_base_url: get(ENV_COMICS_BASE_URL).unwrap_or(defaults.comics_base_url),
            comics_credentials: Credentials::new(
                get(ENV_COMICS_PUBLIC_KEY).unwrap_or_default(),
                get(ENV_COMICS_PRIVATE_KEY).unwrap_or_default(),
            ),
            roster_base_url: get(ENV_ROSTER_BASE_URL).unwrap_or(defaults.roster_base_url),
            roster_api_key: get(ENV_ROSTER_API_KEY).unwrap_or_default(),
            http_timeout: get(ENV_HTTP_TIMEOUT_SECS)
                .and_then(|secs| secs.trim().parse::<u64>().ok())
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs),
        }
    }

    pub fn transport(&self) -> Result<ReqwestTransport, ApiError> {
        ReqwestTransport::with_timeout(self.http_timeout)
    }

    /// Comics repository with the default first-page demo fallback.
    pub fn comics_repository(
        &self,
    ) -> Result<CharacterRepository<ComicsSource<ReqwestTransport>>, ApiError> {
        let client = ComicsClient::new(&self.comics_base_url, self.comics_credentials.clone());
        Ok(CharacterRepository::new(
            ComicsSource::new(client, self.transport()?),
            Fallback::comics_default(),
        ))
    }

    /// Roster repository with the default single-hero fallback.
    pub fn roster_repository(
        &self,
    ) -> Result<CharacterRepository<RosterSource<ReqwestTransport>>, ApiError> {
        let client = RosterClient::new(&self.roster_base_url, &self.roster_api_key);
        Ok(CharacterRepository::new(
            RosterSource::new(client, self.transport()?),
            Fallback::roster_default(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_uses_defaults() {
        let config = Config::from_lookup(lookup(&[]));
        assert_eq!(config.comics_base_url, DEFAULT_COMICS_BASE_URL);
        assert_eq!(config.roster_base_url, DEFAULT_ROSTER_BASE_URL);
        assert!(config.roster_api_key.is_empty());
        assert!(config.http_timeout.is_none());
    }

    #[test]
    fn environment_overrides_defaults() {
        let config = Config::from_lookup(lookup(&[
            (ENV_COMICS_BASE_URL, "http://127.0.0.1:3000/v1/public"),
            (ENV_COMICS_PUBLIC_KEY, "pub"),
            (ENV_COMICS_PRIVATE_KEY, "priv"),
            (ENV_ROSTER_API_KEY, "key"),
            (ENV_HTTP_TIMEOUT_SECS, "15"),
        ]));
        assert_eq!(config.comics_base_url, "http://127.0.0.1:3000/v1/public");
        assert_eq!(config.comics_credentials, Credentials::new("pub", "priv"));
        assert_eq!(config.roster_api_key, "key");
        assert_eq!(config.http_timeout, Some(Duration::from_secs(15)));
    }

    #[test]
    fn blank_and_invalid_values_are_ignored() {
        let config = Config::from_lookup(lookup(&[
            (ENV_ROSTER_BASE_URL, "   "),
            (ENV_HTTP_TIMEOUT_SECS, "soon"),
        ]));
        assert_eq!(config.roster_base_url, DEFAULT_ROSTER_BASE_URL);
        assert!(config.http_timeout.is_none());

        let zero = Config::from_lookup(lookup(&[(ENV_HTTP_TIMEOUT_SECS, "0")]));
        assert!(zero.http_timeout.is_none());
    }

    #[test]
    fn debug_output_redacts_keys() {
        let config = Config::from_lookup(lookup(&[
            (ENV_COMICS_PRIVATE_KEY, "very-private"),
            (ENV_ROSTER_API_KEY, "roster-secret"),
        ]));
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("very-private"));
        assert!(!rendered.contains("roster-secret"));
    }

    #[test]
    fn repositories_are_wired_from_config() {
        let config = Config::from_lookup(lookup(&[(ENV_ROSTER_BASE_URL, "http://localhost:9/api/v1/")]));
        let roster = config.roster_repository().unwrap();
        assert_eq!(roster.source().client().base_url(), "http://localhost:9/api/v1");
        let comics = config.comics_repository().unwrap();
        assert_eq!(comics.source().client().base_url(), DEFAULT_COMICS_BASE_URL);
    }
}

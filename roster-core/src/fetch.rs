//! CreatureFetcher - resolves a typed name to a [`CreatureRecord`].

use async_trait::async_trait;
use pokeapi::PokeApi;
use thiserror::Error;

use crate::record::CreatureRecord;

/// Why a lookup produced no record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("Creature not found: {name}")]
    NotFound { name: String, status: Option<u16> },

    #[error("Lookup failed: {0}")]
    Transport(String),
}

/// One lookup per call; no retries, no caching.
#[async_trait]
pub trait CreatureFetcher: Send + Sync {
    async fn fetch(&self, name: &str) -> Result<CreatureRecord, FetchError>;
}

/// [`CreatureFetcher`] backed by the public PokeAPI.
#[derive(Debug, Clone)]
pub struct PokeApiFetcher {
    api: PokeApi,
}

impl PokeApiFetcher {
    pub fn new(api: PokeApi) -> Self {
        Self { api }
    }

    /// Build from the environment (`POKEAPI_BASE_URL` overrides the default).
    pub fn from_env() -> Result<Self, pokeapi::Error> {
        Ok(Self::new(PokeApi::from_env()?))
    }

    pub fn api(&self) -> &PokeApi {
        &self.api
    }
}

#[async_trait]
impl CreatureFetcher for PokeApiFetcher {
    async fn fetch(&self, name: &str) -> Result<CreatureRecord, FetchError> {
        let name = name.trim();

        let pokemon = self.api.pokemon(name).await.map_err(|e| match e {
            pokeapi::Error::Api { status, .. } => FetchError::NotFound {
                name: name.to_string(),
                status: Some(status),
            },
            other => FetchError::Transport(other.to_string()),
        })?;

        CreatureRecord::try_from(pokemon)
            .map_err(|e| FetchError::Transport(format!("malformed creature payload: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message_names_input() {
        let err = FetchError::NotFound {
            name: "agumon".to_string(),
            status: Some(404),
        };
        assert_eq!(err.to_string(), "Creature not found: agumon");
    }

    #[test]
    fn test_fetcher_uses_configured_api() {
        let api = PokeApi::new()
            .unwrap()
            .with_base_url("http://localhost:1/api/v2")
            .unwrap();
        let fetcher = PokeApiFetcher::new(api);
        assert_eq!(fetcher.api().base_url(), "http://localhost:1/api/v2");
    }
}

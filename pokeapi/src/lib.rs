//! Minimal PokeAPI client.
//!
//! This crate covers the one resource the roster builder needs:
//! - Single-shot `GET /pokemon/{name}/` lookups
//! - Typed decoding of the fields a creature card shows
//! - Base URL override for mirrors and local test servers

use serde::{Deserialize, Serialize};
use thiserror::Error;

const API_BASE: &str = "https://pokeapi.co/api/v2";
const USER_AGENT: &str = concat!("pokeapi-rs/", env!("CARGO_PKG_VERSION"));

/// Errors that can occur when using the PokeAPI client.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Failed to parse response: {0}")]
    Parse(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl Error {
    /// The HTTP status the server answered with, if it answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// PokeAPI client.
#[derive(Debug, Clone)]
pub struct PokeApi {
    client: reqwest::Client,
    base_url: String,
}

impl PokeApi {
    /// Create a client pointed at the public PokeAPI.
    pub fn new() -> Result<Self, Error> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: API_BASE.to_string(),
        })
    }

    /// Create a client, honouring `POKEAPI_BASE_URL` when it is set.
    pub fn from_env() -> Result<Self, Error> {
        let client = Self::new()?;
        match std::env::var("POKEAPI_BASE_URL") {
            Ok(url) if !url.trim().is_empty() => client.with_base_url(url),
            _ => Ok(client),
        }
    }

    /// Point the client at a different API root, e.g. `http://127.0.0.1:8080/api/v2`.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Result<Self, Error> {
        let base_url = base_url.into();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(Error::Config(format!(
                "Base URL must start with http:// or https://, got {base_url:?}"
            )));
        }
        self.base_url = base_url.trim_end_matches('/').to_string();
        Ok(self)
    }

    /// The API root this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build the lookup URL for a creature name. The name is used as given.
    pub fn pokemon_url(&self, name: &str) -> String {
        format!("{}/pokemon/{name}/", self.base_url)
    }

    /// Fetch one creature by name or id.
    ///
    /// Makes exactly one request. Any non-2xx answer becomes [`Error::Api`];
    /// a body that does not decode becomes [`Error::Parse`].
    pub async fn pokemon(&self, name: &str) -> Result<Pokemon, Error> {
        let url = self.pokemon_url(name);
        tracing::debug!(%url, "requesting pokemon");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Api {
                status,
                message: body,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        serde_json::from_str(&body).map_err(|e| Error::Parse(e.to_string()))
    }
}

// ============================================================================
// Public types
// ============================================================================

/// The subset of the `/pokemon/{name}` resource this client decodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pokemon {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub base_experience: Option<u32>,
    #[serde(default)]
    pub height: u32,
    #[serde(default)]
    pub weight: u32,
    pub types: Vec<TypeSlot>,
    pub sprites: Sprites,
}

impl Pokemon {
    /// Type names in the order the API listed them.
    pub fn type_names(&self) -> Vec<String> {
        self.types.iter().map(|t| t.kind.name.clone()).collect()
    }
}

/// One entry of the `types` array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeSlot {
    #[serde(default)]
    pub slot: u8,
    #[serde(rename = "type")]
    pub kind: NamedResource,
}

/// A `{name, url}` reference to another resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedResource {
    pub name: String,
    #[serde(default)]
    pub url: String,
}

/// Sprite URLs. Every field is nullable upstream.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sprites {
    #[serde(default)]
    pub front_default: Option<String>,
    #[serde(default)]
    pub front_shiny: Option<String>,
    #[serde(default)]
    pub back_default: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_client_defaults_to_public_api() {
        let client = PokeApi::new().unwrap();
        assert_eq!(client.base_url(), API_BASE);
        assert_eq!(
            client.pokemon_url("pikachu"),
            "https://pokeapi.co/api/v2/pokemon/pikachu/"
        );
    }

    #[test]
    fn test_with_base_url_strips_trailing_slash() {
        let client = PokeApi::new()
            .unwrap()
            .with_base_url("http://127.0.0.1:9000/api/v2/")
            .unwrap();
        assert_eq!(
            client.pokemon_url("Eevee"),
            "http://127.0.0.1:9000/api/v2/pokemon/Eevee/"
        );
    }

    #[test]
    fn test_with_base_url_rejects_bare_host() {
        let err = PokeApi::new()
            .unwrap()
            .with_base_url("pokeapi.co")
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_decode_full_payload() {
        let payload = json!({
            "id": 1,
            "name": "bulbasaur",
            "base_experience": 64,
            "height": 7,
            "weight": 69,
            "abilities": [],
            "types": [
                {"slot": 1, "type": {"name": "grass", "url": "https://pokeapi.co/api/v2/type/12/"}},
                {"slot": 2, "type": {"name": "poison", "url": "https://pokeapi.co/api/v2/type/4/"}}
            ],
            "sprites": {
                "front_default": "https://img/1.png",
                "front_shiny": null,
                "back_default": null,
                "other": {}
            }
        });

        let pokemon: Pokemon = serde_json::from_value(payload).unwrap();
        assert_eq!(pokemon.id, 1);
        assert_eq!(pokemon.type_names(), vec!["grass", "poison"]);
        assert_eq!(pokemon.sprites.front_default.as_deref(), Some("https://img/1.png"));
        assert_eq!(pokemon.base_experience, Some(64));
    }

    #[test]
    fn test_decode_null_sprite() {
        let payload = json!({
            "id": 10001,
            "name": "deoxys-attack",
            "types": [{"slot": 1, "type": {"name": "psychic"}}],
            "sprites": {"front_default": null}
        });

        let pokemon: Pokemon = serde_json::from_value(payload).unwrap();
        assert!(pokemon.sprites.front_default.is_none());
        assert_eq!(pokemon.height, 0);
    }

    #[test]
    fn test_decode_missing_types_fails() {
        let payload = json!({"id": 25, "name": "pikachu", "sprites": {}});
        assert!(serde_json::from_value::<Pokemon>(payload).is_err());
    }

    #[test]
    fn test_error_status() {
        let err = Error::Api {
            status: 404,
            message: "Not Found".to_string(),
        };
        assert_eq!(err.status(), Some(404));
        assert_eq!(Error::Network("reset".into()).status(), None);
    }
}

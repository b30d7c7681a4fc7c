//! Creature records - the validated result of one successful lookup.

use serde::Serialize;
use thiserror::Error;

/// Reasons a lookup payload cannot become a [`CreatureRecord`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("creature id must be positive")]
    InvalidId,

    #[error("creature name is empty")]
    EmptyName,

    #[error("creature must have one or two types, got {0}")]
    TypeCount(usize),
}

/// One fetched creature: id, name, types and image.
///
/// Fields are private so a record can only be built through [`CreatureRecord::new`]
/// and never changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreatureRecord {
    id: u32,
    name: String,
    types: Vec<String>,
    image_url: String,
}

impl CreatureRecord {
    /// Build a record, checking the data-model invariants.
    pub fn new(
        id: u32,
        name: impl Into<String>,
        types: Vec<String>,
        image_url: impl Into<String>,
    ) -> Result<Self, RecordError> {
        let name = name.into();
        if id == 0 {
            return Err(RecordError::InvalidId);
        }
        if name.trim().is_empty() {
            return Err(RecordError::EmptyName);
        }
        if !(1..=2).contains(&types.len()) {
            return Err(RecordError::TypeCount(types.len()));
        }

        Ok(Self {
            id,
            name,
            types,
            image_url: image_url.into(),
        })
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Type names in API order.
    pub fn types(&self) -> &[String] {
        &self.types
    }

    /// Sprite URL, empty when the API had none.
    pub fn image_url(&self) -> &str {
        &self.image_url
    }

    /// Alt text shown in place of the image.
    pub fn image_alt(&self) -> String {
        format!("Pokemon {} image", self.name)
    }
}

impl TryFrom<pokeapi::Pokemon> for CreatureRecord {
    type Error = RecordError;

    fn try_from(pokemon: pokeapi::Pokemon) -> Result<Self, Self::Error> {
        let types = pokemon.type_names();
        CreatureRecord::new(
            pokemon.id,
            pokemon.name,
            types,
            pokemon.sprites.front_default.unwrap_or_default(),
        )
    }
}

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// A single catalog entry.
///
/// The store also keeps a revision counter per record; it is never read back
/// into this type, so responses built from a `PokemonRecord` cannot leak it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PokemonRecord {
    /// Storage identifier, assigned once at creation
    pub id: Uuid,

    /// Catalog index (unique when present)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub no: Option<u32>,

    /// Always lowercase
    pub name: String,

    /// Descriptive fields passed through untouched
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

/// Payload for a new record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreatePokemon {
    #[serde(default)]
    pub no: Option<u32>,
    pub name: String,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

/// Partial update. Only supplied fields change; each attribute key replaces
/// the stored value under that key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdatePokemon {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub no: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

/// Page request. `offset` is a page index, not a record count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

/// Keys that belong to the record itself and can never be attributes
pub const RESERVED_FIELDS: [&str; 4] = ["id", "no", "name", "revision"];

pub fn normalize_name(name: &str) -> String {
    name.to_lowercase()
}

/// Lays `patch` over `attributes` one top-level key at a time. A `null`
/// removes the key; nested objects are replaced whole, never merged.
pub fn merge_attributes(attributes: &mut Map<String, Value>, patch: &Map<String, Value>) {
    for (key, value) in patch {
        if value.is_null() {
            attributes.remove(key);
        } else {
            attributes.insert(key.clone(), value.clone());
        }
    }
}

impl PokemonRecord {
    /// Build a record with a fresh identifier. The caller is expected to have
    /// normalized the name already.
    pub fn new(input: CreatePokemon) -> Self {
        Self {
            id: Uuid::new_v4(),
            no: input.no,
            name: input.name,
            attributes: input.attributes,
        }
    }

    /// This record with the patch laid over it, attributes merged with
    /// [`merge_attributes`] like the store does.
    pub fn merged_with(&self, patch: &UpdatePokemon) -> Self {
        let mut merged = self.clone();
        if let Some(no) = patch.no {
            merged.no = Some(no);
        }
        if let Some(name) = &patch.name {
            merged.name = name.clone();
        }
        merge_attributes(&mut merged.attributes, &patch.attributes);
        merged
    }
}

impl UpdatePokemon {
    /// Updates only reach the store when they carry a non-empty name.
    pub fn has_name(&self) -> bool {
        self.name.as_deref().is_some_and(|name| !name.is_empty())
    }
}

impl Pagination {
    pub fn new(limit: Option<u32>, offset: Option<u32>) -> Self {
        Self { limit, offset }
    }

    /// Resolved `(limit, skip)` pair, where skip counts records.
    pub fn window(&self, default_limit: u32) -> (u32, u64) {
        let limit = self.limit.unwrap_or(default_limit);
        let skip = u64::from(limit) * u64::from(self.offset.unwrap_or(0));
        (limit, skip)
    }
}

// src/application/dto/mod.rs
//
// Data Transfer Objects
//
// CRITICAL PRINCIPLES:
// - DTOs are caller-friendly representations
// - DTOs are simple, serializable structs
// - Responses never carry the store's revision counter

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::{CreatePokemon, Pagination, PokemonRecord, UpdatePokemon};

// ============================================================================
// RESPONSE DTOs
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PokemonDto {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub no: Option<u32>,
    pub name: String,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl From<PokemonRecord> for PokemonDto {
    fn from(record: PokemonRecord) -> Self {
        Self {
            id: record.id.to_string(),
            no: record.no,
            name: record.name,
            attributes: record.attributes,
        }
    }
}

// ============================================================================
// REQUEST DTOs
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePokemonDto {
    #[serde(default)]
    pub no: Option<u32>,
    pub name: String,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl From<CreatePokemonDto> for CreatePokemon {
    fn from(dto: CreatePokemonDto) -> Self {
        Self {
            no: dto.no,
            name: dto.name,
            attributes: dto.attributes,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePokemonDto {
    #[serde(default)]
    pub no: Option<u32>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl From<UpdatePokemonDto> for UpdatePokemon {
    fn from(dto: UpdatePokemonDto) -> Self {
        Self {
            no: dto.no,
            name: dto.name,
            attributes: dto.attributes,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PaginationDto {
    #[serde(default)]
    pub limit: Option<u32>,
    #[serde(default)]
    pub offset: Option<u32>,
}

impl From<PaginationDto> for Pagination {
    fn from(dto: PaginationDto) -> Self {
        Pagination::new(dto.limit, dto.offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use uuid::Uuid;

    #[test]
    fn test_create_dto_collects_extra_fields() {
        let dto: CreatePokemonDto =
            serde_json::from_value(json!({ "no": 1, "name": "Bulbasaur", "type": "grass" }))
                .unwrap();

        assert_eq!(dto.no, Some(1));
        assert_eq!(dto.name, "Bulbasaur");
        assert_eq!(dto.attributes["type"], json!("grass"));
        assert!(!dto.attributes.contains_key("name"));
    }

    #[test]
    fn test_update_dto_fields_are_optional() {
        let dto: UpdatePokemonDto = serde_json::from_value(json!({ "weight": 69 })).unwrap();
        assert!(dto.name.is_none());
        assert!(dto.no.is_none());
        assert_eq!(dto.attributes["weight"], json!(69));
    }

    #[test]
    fn test_pokemon_dto_is_flat_json() {
        let mut attributes = Map::new();
        attributes.insert("type".to_string(), json!("electric"));
        let id = Uuid::new_v4();

        let dto = PokemonDto::from(PokemonRecord {
            id,
            no: Some(25),
            name: "pikachu".to_string(),
            attributes,
        });

        assert_eq!(
            serde_json::to_value(&dto).unwrap(),
            json!({ "id": id.to_string(), "no": 25, "name": "pikachu", "type": "electric" })
        );
    }
}

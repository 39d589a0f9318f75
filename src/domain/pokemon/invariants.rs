use serde_json::{Map, Value};

use super::entity::{CreatePokemon, Pagination, UpdatePokemon, RESERVED_FIELDS};
use crate::domain::{DomainError, DomainResult};

/// Validates a create payload before it reaches the service
pub fn validate_create(input: &CreatePokemon) -> DomainResult<()> {
    validate_name(&input.name)?;
    validate_no(input.no)?;
    validate_attributes(&input.attributes)?;
    Ok(())
}

/// Validates the fields a patch actually supplies
pub fn validate_update(patch: &UpdatePokemon) -> DomainResult<()> {
    if let Some(name) = &patch.name {
        validate_name(name)?;
    }
    validate_no(patch.no)?;
    validate_attributes(&patch.attributes)?;
    Ok(())
}

pub fn validate_pagination(pagination: &Pagination) -> DomainResult<()> {
    if pagination.limit == Some(0) {
        return Err(DomainError::InvariantViolation(
            "limit must be a positive integer".to_string(),
        ));
    }
    Ok(())
}

fn validate_name(name: &str) -> DomainResult<()> {
    if name.trim().is_empty() {
        return Err(DomainError::InvariantViolation(
            "Pokemon name cannot be empty".to_string(),
        ));
    }
    Ok(())
}

/// Catalog indexes start at 1
fn validate_no(no: Option<u32>) -> DomainResult<()> {
    if no == Some(0) {
        return Err(DomainError::InvariantViolation(
            "Pokemon no must be a positive integer".to_string(),
        ));
    }
    Ok(())
}

/// Record fields cannot be smuggled in as extra attributes
fn validate_attributes(attributes: &Map<String, Value>) -> DomainResult<()> {
    if let Some(key) = RESERVED_FIELDS
        .iter()
        .find(|key| attributes.contains_key(**key))
    {
        return Err(DomainError::InvariantViolation(format!(
            "`{}` is a record field and cannot be set as an attribute",
            key
        )));
    }
    Ok(())
}

/// Invariants that must hold true for Pokemon records:
///
/// 1. Name is stored lowercase
/// 2. Name and no are unique (enforced by the store's indexes)
/// 3. Identity (UUID) is immutable
/// 4. Revision counter is internal and never returned
/// 5. Attributes never shadow a record field

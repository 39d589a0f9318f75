// src/domain/mod.rs
//
// Domain Root - The Single Source of Truth for Domain API
//
// All other modules import from `crate::domain::*`

pub mod pokemon;

pub use pokemon::{
    normalize_name, validate_create, validate_pagination, validate_update, CreatePokemon,
    LookupKey, Pagination, PokemonRecord, UpdatePokemon,
};

use thiserror::Error;

/// Domain-level errors
/// These represent violations of request rules and invariants
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),
}

/// Domain result type
pub type DomainResult<T> = Result<T, DomainError>;

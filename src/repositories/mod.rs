// src/repositories/mod.rs
//
// Repository layer
//
// CRITICAL RULES:
// - Repositories are DUMB data mappers
// - NO business logic
// - NO name normalization or lookup fallback
// - Explicit SQL only

pub mod pokemon_repository;

pub use pokemon_repository::{PokemonRepository, SqlitePokemonRepository};

#[cfg(test)]
pub use pokemon_repository::MockPokemonRepository;

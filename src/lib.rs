// src/lib.rs
// Pokedex - Pokemon catalog record service
//
// Architecture:
// - Domain: the record, its payloads, the lookup key dispatch
// - Repository: dumb data mapper over the embedded document store
// - Service: create / list / lookup / update / remove with error translation
// - Application: DTOs, request validation, HTTP-style error responses

pub mod application;
pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod repositories;
pub mod services;

// ============================================================================
// PUBLIC API - Domain
// ============================================================================

pub use domain::{
    normalize_name, validate_create, validate_pagination, validate_update, CreatePokemon,
    DomainError, LookupKey, Pagination, PokemonRecord, UpdatePokemon,
};

// ============================================================================
// PUBLIC API - Errors
// ============================================================================

pub use error::{AppError, AppResult, KeyValue, ServiceError, ServiceResult};

// ============================================================================
// PUBLIC API - Storage
// ============================================================================

pub use db::{create_connection_pool, initialize_database, ConnectionPool};
pub use repositories::{PokemonRepository, SqlitePokemonRepository};

// ============================================================================
// PUBLIC API - Service & Application
// ============================================================================

pub use application::{AppState, ErrorResponse, ErrorType};
pub use config::Settings;
pub use services::PokemonService;

pub use application::commands;
pub use application::dto;

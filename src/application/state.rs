// src/application/state.rs

use std::sync::Arc;

use crate::config::Settings;
use crate::db::{create_connection_pool, create_memory_pool, initialize_database, ConnectionPool};
use crate::error::AppResult;
use crate::repositories::{PokemonRepository, SqlitePokemonRepository};
use crate::services::PokemonService;

/// Application state shared by command handlers.
/// All fields are Arc-wrapped for thread-safe sharing across commands.
pub struct AppState {
    pub pool: Arc<ConnectionPool>,
    pub pokemon_service: Arc<PokemonService>,
}

impl AppState {
    /// Wire pool → schema → repository → service from settings.
    pub fn initialize(settings: &Settings) -> AppResult<Self> {
        let db_path = settings.resolved_database_path()?;
        let pool = Arc::new(create_connection_pool(&db_path, settings.pool_size)?);
        Self::from_pool(pool, settings.default_limit)
    }

    /// State over a private in-memory store
    pub fn in_memory(default_limit: u32) -> AppResult<Self> {
        let pool = Arc::new(create_memory_pool()?);
        Self::from_pool(pool, default_limit)
    }

    fn from_pool(pool: Arc<ConnectionPool>, default_limit: u32) -> AppResult<Self> {
        {
            let conn = pool.get()?;
            initialize_database(&conn)?;
        }

        let pokemon_repo: Arc<dyn PokemonRepository> =
            Arc::new(SqlitePokemonRepository::new(pool.clone()));
        let pokemon_service = Arc::new(PokemonService::new(pokemon_repo, default_limit));

        Ok(Self {
            pool,
            pokemon_service,
        })
    }
}

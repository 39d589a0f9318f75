// src/application/commands/pokemon_commands.rs
//
// Pokemon Command Handlers
//
// RULES:
// - Accept DTOs
// - Validate requests
// - Call services
// - Return DTOs

use uuid::Uuid;

use crate::application::{
    dto::*,
    error_handling::{ErrorResponse, ToErrorResponse},
    state::AppState,
};
use crate::db::{get_database_stats, verify_database_integrity, DatabaseStats};
use crate::domain::{
    validate_create, validate_pagination, validate_update, CreatePokemon, Pagination,
    UpdatePokemon,
};
use crate::error::{AppError, AppResult};

pub type CommandResult<T> = Result<T, ErrorResponse>;

/// Create a new pokemon
pub async fn create_pokemon(state: &AppState, dto: CreatePokemonDto) -> CommandResult<PokemonDto> {
    let input = CreatePokemon::from(dto);
    validate_create(&input).to_error_response()?;

    let record = state
        .pokemon_service
        .create(input)
        .await
        .to_error_response()?;

    Ok(PokemonDto::from(record))
}

/// List one page of pokemon ordered by catalog index
pub async fn list_pokemon(state: &AppState, dto: PaginationDto) -> CommandResult<Vec<PokemonDto>> {
    let pagination = Pagination::from(dto);
    validate_pagination(&pagination).to_error_response()?;

    let records = state
        .pokemon_service
        .find_all(pagination)
        .await
        .to_error_response()?;

    Ok(records.into_iter().map(PokemonDto::from).collect())
}

/// Get a single pokemon by catalog index, id or name
pub async fn get_pokemon(state: &AppState, term: &str) -> CommandResult<PokemonDto> {
    let record = state
        .pokemon_service
        .find_one(term)
        .await
        .to_error_response()?;

    Ok(PokemonDto::from(record))
}

/// Update the pokemon `term` resolves to
pub async fn update_pokemon(
    state: &AppState,
    term: &str,
    dto: UpdatePokemonDto,
) -> CommandResult<PokemonDto> {
    let patch = UpdatePokemon::from(dto);
    validate_update(&patch).to_error_response()?;

    let record = state
        .pokemon_service
        .update(term, patch)
        .await
        .to_error_response()?;

    Ok(PokemonDto::from(record))
}

/// Remove a pokemon by storage id
pub async fn remove_pokemon(state: &AppState, id: &str) -> CommandResult<()> {
    let id = parse_record_id(id)?;

    state
        .pokemon_service
        .remove(id)
        .await
        .to_error_response()
}

/// Size and row counts of the backing database, after an integrity check
pub async fn database_stats(state: &AppState) -> CommandResult<DatabaseStats> {
    let pool = state.pool.clone();

    tokio::task::spawn_blocking(move || -> AppResult<DatabaseStats> {
        let conn = pool.get()?;
        verify_database_integrity(&conn)?;
        get_database_stats(&conn)
    })
    .await
    .map_err(AppError::from)
    .and_then(|stats| stats)
    .to_error_response()
}

fn parse_record_id(id: &str) -> CommandResult<Uuid> {
    Uuid::parse_str(id)
        .map_err(|_| ErrorResponse::validation(format!("{} is not a valid pokemon id", id)))
}

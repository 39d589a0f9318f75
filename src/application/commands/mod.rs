// src/application/commands/mod.rs
//
// Command Handlers
//
// ARCHITECTURE:
// - Commands are thin adapters between callers and services
// - Commands accept DTOs, return DTOs
// - Commands handle error conversion into ErrorResponse
// - Commands NEVER contain business logic

pub mod pokemon_commands;

pub use pokemon_commands::*;

// src/services/mod.rs
//
// Services Module - Orchestration Layer

pub mod pokemon_service;


pub use pokemon_service::PokemonService;

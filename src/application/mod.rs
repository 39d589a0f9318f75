// src/application/mod.rs
//
// Application Layer
//
// ARCHITECTURE:
// - Boundary between callers (CLI) and the service
// - Translates between DTOs and domain types
// - Maps service errors to HTTP-style responses

pub mod commands;
pub mod dto;
pub mod error_handling;
pub mod state;

pub use commands::*;
pub use dto::*;
pub use error_handling::{ErrorResponse, ErrorType, ToErrorResponse};
pub use state::AppState;

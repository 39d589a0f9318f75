// src/error/mod.rs
//
// Error types
//
// - AppError: infrastructure failures (storage, pool, config)
// - ServiceError: what record operations report to callers

pub mod types;

pub use types::{AppError, AppResult, KeyValue, ServiceError, ServiceResult};

// src/error/types.rs
use std::fmt;

use crate::domain::DomainError;
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

/// The field and value that collided with a unique index.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeyValue {
    pub key: String,
    pub value: serde_json::Value,
}

impl KeyValue {
    pub fn new(key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Renders as a single-entry JSON object, e.g. `{"name":"pikachu"}`.
impl fmt::Display for KeyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut object = serde_json::Map::new();
        object.insert(self.key.clone(), self.value.clone());
        write!(f, "{}", serde_json::Value::Object(object))
    }
}

/// Infrastructure errors raised by the store, the pool and the config loader.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Pool error: {0}")]
    Pool(String),

    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Blocking task failed: {0}")]
    Join(#[from] tokio::task::JoinError),

    #[error("Duplicate key {0}")]
    DuplicateKey(KeyValue),

    #[error("Other error: {0}")]
    Other(String),
}

impl Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl From<uuid::Error> for AppError {
    fn from(err: uuid::Error) -> Self {
        AppError::Other(format!("UUID error: {}", err))
    }
}

impl From<r2d2::Error> for AppError {
    fn from(err: r2d2::Error) -> Self {
        AppError::Pool(err.to_string())
    }
}

impl From<toml::de::Error> for AppError {
    fn from(err: toml::de::Error) -> Self {
        AppError::Config(err.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;

/// The four outcomes a record operation can fail with.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// A write collided with the unique index on `no` or `name`.
    #[error("Pokemon exists in db {key_value}")]
    Duplicate { key_value: KeyValue },

    /// No record matched the term by catalog index, id or name.
    #[error("Pokemon with id, name or no \"{term}\" not found")]
    NotFound { term: String },

    /// Delete target did not exist.
    #[error("Pokemon with id {id} not found")]
    InvalidRequest { id: Uuid },

    #[error("Can't update pokemon - check server logs")]
    Internal {
        #[source]
        source: AppError,
    },
}

impl ServiceError {
    pub fn internal(source: AppError) -> Self {
        ServiceError::Internal { source }
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;

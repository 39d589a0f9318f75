// src/repositories/pokemon_repository.rs
//
// Pokemon persistence
//
// Each record is one row: indexed fields are columns, descriptive fields are a
// JSON document. Calls run on the blocking pool so callers only suspend.

use std::sync::Arc;

use async_trait::async_trait;
use rusqlite::types::Type;
use rusqlite::{
    params, Connection, ErrorCode, OptionalExtension, Row, Transaction, TransactionBehavior,
};
use serde_json::{json, Map, Value};
use uuid::Uuid;

use crate::db::{get_connection, ConnectionPool};
use crate::domain::pokemon::{merge_attributes, PokemonRecord, UpdatePokemon};
use crate::error::{AppError, AppResult, KeyValue};

const SELECT_COLUMNS: &str = "SELECT id, no, name, attributes FROM pokemon";

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PokemonRepository: Send + Sync {
    async fn insert(&self, record: &PokemonRecord) -> AppResult<()>;
    async fn find_by_no(&self, no: u32) -> AppResult<Option<PokemonRecord>>;
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<PokemonRecord>>;
    async fn find_by_name(&self, name: &str) -> AppResult<Option<PokemonRecord>>;
    /// Records ordered by `no`, skipping `skip` and returning at most `limit`
    async fn list(&self, limit: u32, skip: u64) -> AppResult<Vec<PokemonRecord>>;
    /// Partial update; returns the number of rows matched
    async fn update(&self, id: Uuid, patch: &UpdatePokemon) -> AppResult<usize>;
    /// Returns the number of rows deleted
    async fn delete(&self, id: Uuid) -> AppResult<usize>;
}

pub struct SqlitePokemonRepository {
    pool: Arc<ConnectionPool>,
}

impl SqlitePokemonRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    async fn with_conn<T, F>(&self, f: F) -> AppResult<T>
    where
        F: FnOnce(&Connection) -> AppResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = Arc::clone(&self.pool);
        tokio::task::spawn_blocking(move || -> AppResult<T> {
            let conn = get_connection(&pool)?;
            f(&conn)
        })
        .await?
    }

    /// Map database row to PokemonRecord - returns rusqlite::Error for query_map compatibility
    fn row_to_record(row: &Row) -> Result<PokemonRecord, rusqlite::Error> {
        let id_str: String = row.get("id")?;
        let id = Uuid::parse_str(&id_str)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(0, Type::Text, Box::new(e)))?;

        let no: Option<u32> = row.get("no")?;
        let name: String = row.get("name")?;

        let attributes_json: String = row.get("attributes")?;
        let attributes: Map<String, Value> = serde_json::from_str(&attributes_json)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(3, Type::Text, Box::new(e)))?;

        Ok(PokemonRecord {
            id,
            no,
            name,
            attributes,
        })
    }

    fn find_one_where(
        conn: &Connection,
        clause: &str,
        param: &dyn rusqlite::ToSql,
    ) -> AppResult<Option<PokemonRecord>> {
        let sql = format!("{} WHERE {}", SELECT_COLUMNS, clause);
        let record = conn
            .query_row(&sql, &[param], Self::row_to_record)
            .optional()?;
        Ok(record)
    }
}

/// Column named by a unique or primary key violation, if that is what `err` is.
///
/// SQLite reports these as `UNIQUE constraint failed: pokemon.name`.
fn violated_unique_column(err: &rusqlite::Error) -> Option<String> {
    match err {
        rusqlite::Error::SqliteFailure(failure, Some(message))
            if failure.code == ErrorCode::ConstraintViolation =>
        {
            let columns = message.strip_prefix("UNIQUE constraint failed: ")?;
            let first = columns.split(',').next()?.trim();
            Some(first.rsplit('.').next().unwrap_or(first).to_string())
        }
        _ => None,
    }
}

/// Turn a write failure into a duplicate-key error when it is one. The
/// offending value is looked up from what was being written.
fn map_write_error(err: rusqlite::Error, value_of: impl Fn(&str) -> Value) -> AppError {
    match violated_unique_column(&err) {
        Some(key) => {
            let value = value_of(&key);
            AppError::DuplicateKey(KeyValue::new(key, value))
        }
        None => AppError::Database(err),
    }
}

#[async_trait]
impl PokemonRepository for SqlitePokemonRepository {
    async fn insert(&self, record: &PokemonRecord) -> AppResult<()> {
        let record = record.clone();
        self.with_conn(move |conn| {
            let attributes_json = serde_json::to_string(&record.attributes)?;

            conn.execute(
                "INSERT INTO pokemon (id, no, name, attributes, revision)
                 VALUES (?1, ?2, ?3, ?4, 0)",
                params![record.id.to_string(), record.no, record.name, attributes_json],
            )
            .map_err(|e| {
                map_write_error(e, |key| match key {
                    "id" => json!(record.id),
                    "no" => json!(record.no),
                    "name" => json!(record.name),
                    _ => Value::Null,
                })
            })?;

            log::debug!("Inserted pokemon {} ({})", record.name, record.id);
            Ok(())
        })
        .await
    }

    async fn find_by_no(&self, no: u32) -> AppResult<Option<PokemonRecord>> {
        self.with_conn(move |conn| Self::find_one_where(conn, "no = ?1", &no))
            .await
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<PokemonRecord>> {
        self.with_conn(move |conn| Self::find_one_where(conn, "id = ?1", &id.to_string()))
            .await
    }

    async fn find_by_name(&self, name: &str) -> AppResult<Option<PokemonRecord>> {
        let name = name.to_string();
        self.with_conn(move |conn| Self::find_one_where(conn, "name = ?1", &name))
            .await
    }

    async fn list(&self, limit: u32, skip: u64) -> AppResult<Vec<PokemonRecord>> {
        let skip = i64::try_from(skip).unwrap_or(i64::MAX);
        self.with_conn(move |conn| {
            let sql = format!(
                "{} ORDER BY no ASC, name ASC LIMIT ?1 OFFSET ?2",
                SELECT_COLUMNS
            );
            let mut stmt = conn.prepare(&sql)?;

            let records: Vec<PokemonRecord> = stmt
                .query_map(params![limit, skip], Self::row_to_record)?
                .collect::<Result<Vec<_>, _>>()?;

            Ok(records)
        })
        .await
    }

    async fn update(&self, id: Uuid, patch: &UpdatePokemon) -> AppResult<usize> {
        let patch = patch.clone();
        self.with_conn(move |conn| {
            // Read-merge-write under one write lock. Top-level attribute keys
            // are replaced whole.
            let tx = Transaction::new_unchecked(conn, TransactionBehavior::Immediate)?;

            let stored: Option<String> = tx
                .query_row(
                    "SELECT attributes FROM pokemon WHERE id = ?1",
                    [id.to_string()],
                    |row| row.get(0),
                )
                .optional()?;
            let Some(stored) = stored else {
                return Ok(0);
            };

            let mut attributes: Map<String, Value> = serde_json::from_str(&stored)?;
            merge_attributes(&mut attributes, &patch.attributes);
            let attributes_json = serde_json::to_string(&attributes)?;

            let rows = tx
                .execute(
                    "UPDATE pokemon
                     SET no = COALESCE(?2, no),
                         name = COALESCE(?3, name),
                         attributes = ?4,
                         revision = revision + 1
                     WHERE id = ?1",
                    params![id.to_string(), patch.no, patch.name, attributes_json],
                )
                .map_err(|e| {
                    map_write_error(e, |key| match key {
                        "no" => json!(patch.no),
                        "name" => json!(patch.name),
                        _ => Value::Null,
                    })
                })?;
            tx.commit()?;

            log::debug!("Updated pokemon {} ({} row(s))", id, rows);
            Ok(rows)
        })
        .await
    }

    async fn delete(&self, id: Uuid) -> AppResult<usize> {
        self.with_conn(move |conn| {
            let rows = conn.execute("DELETE FROM pokemon WHERE id = ?1", params![id.to_string()])?;
            Ok(rows)
        })
        .await
    }
}

//! Key/entity datastore client.
//!
//! # Responsibility
//! - Define the minimal store capability set used by repositories: key
//!   construction, get, put (upsert), delete and query-all-of-kind.
//! - Provide an embedded SQLite-backed implementation of that contract.
//!
//! # Invariants
//! - Keys are scoped to the client namespace; namespaces never see each
//!   other's entities.
//! - Entity identity lives in the key, never in entity properties.
//! - Migration version is tracked via `PRAGMA user_version`.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod entity;
pub mod migrations;
mod sqlite;

pub use entity::{Entity, Key};
pub use sqlite::SqliteDatastore;

pub type StoreResult<T> = Result<T, StoreError>;

/// Transport/storage error raised by a datastore client.
#[derive(Debug)]
pub enum StoreError {
    Sqlite(rusqlite::Error),
    Json(serde_json::Error),
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::Json(err) => write!(f, "invalid entity properties: {err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "datastore schema version {db_version} is newer than supported {latest_supported}"
            ),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::Json(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

/// Minimal key/entity store contract.
pub trait Datastore {
    /// Builds a key for `kind`/`name` in this client's namespace.
    fn key(&self, kind: &str, name: &str) -> Key;
    /// Point lookup. Returns `None` when the key is absent.
    fn get(&self, key: &Key) -> StoreResult<Option<Entity>>;
    /// Inserts or fully replaces the entity stored under `entity.key`.
    fn put(&self, entity: &Entity) -> StoreResult<()>;
    /// Removes the entity. Deleting a missing key is a no-op.
    fn delete(&self, key: &Key) -> StoreResult<()>;
    /// Returns every entity of `kind` in this client's namespace.
    ///
    /// Order is store-defined.
    fn query_kind(&self, kind: &str) -> StoreResult<Vec<Entity>>;
}

//! SQLite-backed datastore client.
//!
//! # Responsibility
//! - Open file or in-memory stores and apply entity table migrations.
//! - Map key/entity operations onto the `entities` table, with properties
//!   encoded as JSON text.
//!
//! # Invariants
//! - A returned client has migrations fully applied.
//! - `put` is an upsert keyed on `(namespace, kind, name)`.

use super::migrations::apply_migrations;
use super::{Datastore, Entity, Key, StoreResult};
use log::{error, info};
use rusqlite::{params, Connection, OptionalExtension};
use serde_json::{Map, Value};
use std::path::Path;
use std::time::{Duration, Instant};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Long-lived datastore handle; construct once and share by reference.
pub struct SqliteDatastore {
    conn: Connection,
    namespace: Option<String>,
}

impl SqliteDatastore {
    /// Opens (or creates) a store file and applies pending migrations.
    ///
    /// # Side effects
    /// - Emits `store_open` logging events with duration and status.
    pub fn open(path: impl AsRef<Path>, namespace: Option<&str>) -> StoreResult<Self> {
        let path = path.as_ref();
        Self::open_with("file", namespace, || Connection::open(path))
    }

    /// Opens a private in-memory store; contents vanish on drop.
    pub fn open_in_memory(namespace: Option<&str>) -> StoreResult<Self> {
        Self::open_with("memory", namespace, Connection::open_in_memory)
    }

    /// Namespace applied to keys built by this client.
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    fn open_with(
        mode: &'static str,
        namespace: Option<&str>,
        connect: impl FnOnce() -> rusqlite::Result<Connection>,
    ) -> StoreResult<Self> {
        let started_at = Instant::now();
        info!("event=store_open module=store status=start mode={mode}");

        let mut conn = connect().map_err(|err| {
            error!(
                "event=store_open module=store status=error mode={mode} duration_ms={} error_code=store_open_failed error={err}",
                started_at.elapsed().as_millis()
            );
            err
        })?;

        if let Err(err) = bootstrap_connection(&mut conn) {
            error!(
                "event=store_open module=store status=error mode={mode} duration_ms={} error_code=store_bootstrap_failed error={err}",
                started_at.elapsed().as_millis()
            );
            return Err(err);
        }

        info!(
            "event=store_open module=store status=ok mode={mode} duration_ms={}",
            started_at.elapsed().as_millis()
        );
        Ok(Self {
            conn,
            namespace: namespace
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(str::to_string),
        })
    }
}

impl Datastore for SqliteDatastore {
    fn key(&self, kind: &str, name: &str) -> Key {
        Key::new(self.namespace(), kind, name)
    }

    fn get(&self, key: &Key) -> StoreResult<Option<Entity>> {
        let raw: Option<String> = self
            .conn
            .query_row(
                "SELECT properties
                 FROM entities
                 WHERE namespace = ?1 AND kind = ?2 AND name = ?3;",
                params![key.namespace_column(), key.kind, key.name],
                |row| row.get(0),
            )
            .optional()?;

        match raw {
            Some(raw) => Ok(Some(Entity {
                key: key.clone(),
                properties: decode_properties(&raw)?,
            })),
            None => Ok(None),
        }
    }

    fn put(&self, entity: &Entity) -> StoreResult<()> {
        let properties = serde_json::to_string(&entity.properties)?;
        self.conn.execute(
            "INSERT INTO entities (namespace, kind, name, properties)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT (namespace, kind, name) DO UPDATE SET
                properties = excluded.properties;",
            params![
                entity.key.namespace_column(),
                entity.key.kind,
                entity.key.name,
                properties,
            ],
        )?;
        Ok(())
    }

    fn delete(&self, key: &Key) -> StoreResult<()> {
        self.conn.execute(
            "DELETE FROM entities
             WHERE namespace = ?1 AND kind = ?2 AND name = ?3;",
            params![key.namespace_column(), key.kind, key.name],
        )?;
        Ok(())
    }

    fn query_kind(&self, kind: &str) -> StoreResult<Vec<Entity>> {
        let namespace = self.namespace().unwrap_or("");
        let mut stmt = self.conn.prepare(
            "SELECT name, properties
             FROM entities
             WHERE namespace = ?1 AND kind = ?2;",
        )?;
        let mut rows = stmt.query(params![namespace, kind])?;
        let mut entities = Vec::new();

        while let Some(row) = rows.next()? {
            let name: String = row.get(0)?;
            let raw: String = row.get(1)?;
            entities.push(Entity {
                key: self.key(kind, &name),
                properties: decode_properties(&raw)?,
            });
        }

        Ok(entities)
    }
}

fn bootstrap_connection(conn: &mut Connection) -> StoreResult<()> {
    conn.busy_timeout(BUSY_TIMEOUT)?;
    apply_migrations(conn)?;
    Ok(())
}

fn decode_properties(raw: &str) -> StoreResult<Map<String, Value>> {
    Ok(serde_json::from_str(raw)?)
}

#[cfg(test)]
mod tests {
    use super::SqliteDatastore;
    use crate::store::{Datastore, Entity, Key};

    #[test]
    fn blank_namespace_normalizes_to_none() {
        let store = SqliteDatastore::open_in_memory(Some("  ")).unwrap();
        assert_eq!(store.namespace(), None);
        assert_eq!(store.key("Employee", "a").namespace, None);
    }

    #[test]
    fn put_is_an_upsert() {
        let store = SqliteDatastore::open_in_memory(None).unwrap();
        let mut entity = Entity::new(store.key("Employee", "a"));
        entity.set("full_name", "first");
        store.put(&entity).unwrap();

        entity.set("full_name", "second");
        store.put(&entity).unwrap();

        let all = store.query_kind("Employee").unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].get_str("full_name"), Some("second"));
    }

    #[test]
    fn blank_key_namespace_addresses_default_namespace_rows() {
        let store = SqliteDatastore::open_in_memory(None).unwrap();
        let mut entity = Entity::new(Key::new(Some(""), "Employee", "a"));
        entity.set("full_name", "Ada");
        store.put(&entity).unwrap();

        let loaded = store.get(&store.key("Employee", "a")).unwrap().unwrap();
        assert_eq!(loaded.key, entity.key);
        assert_eq!(store.query_kind("Employee").unwrap()[0].key, entity.key);
    }
}

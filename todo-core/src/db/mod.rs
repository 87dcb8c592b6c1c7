//! Key-value table store.
//!
//! Items are JSON documents addressed by (owner identity, item identity).
//! [`TableStore`] is the capability the operations consume; [`Database`] is
//! the SQLite-backed implementation.

mod error;
mod schema;
mod table;

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use anyhow::Context;
use rusqlite::{params, Connection, OptionalExtension};

pub use error::StoreError;
pub use table::*;

/// The four store operations the core needs.
pub trait TableStore: Send + Sync {
    /// Unconditional upsert. The key is read from the item's key attributes.
    fn put(&self, table: &Table, item: &Document) -> Result<(), StoreError>;

    /// All items of an owner ordered by sort key. The filter is evaluated
    /// after the range read.
    fn query(
        &self,
        table: &Table,
        owner_id: &str,
        filter: Option<&AttributeFilter>,
    ) -> Result<Vec<Document>, StoreError>;

    /// Sets the given attributes on an existing item and returns the whole
    /// item as stored afterwards.
    ///
    /// A missing item is [`StoreError::NotFound`]; implementations must not
    /// upsert, since a partial item would no longer decode as a record.
    fn update(
        &self,
        table: &Table,
        key: &ItemKey,
        changes: &Document,
    ) -> Result<Document, StoreError>;

    /// Unconditional delete. Deleting a missing key succeeds.
    fn delete(&self, table: &Table, key: &ItemKey) -> Result<(), StoreError>;
}

#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    pub fn open(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        let conn = Connection::open(path)
            .with_context(|| format!("opening database at {}", path.display()))?;
        tracing::debug!(path = %path.display(), "opened table store");
        Ok(Self::from_connection(conn))
    }

    pub fn open_default() -> anyhow::Result<Self> {
        Self::open(Self::default_path()?)
    }

    pub fn open_memory() -> anyhow::Result<Self> {
        Ok(Self::from_connection(Connection::open_in_memory()?))
    }

    /// `todo-board.db` in the platform data directory.
    pub fn default_path() -> anyhow::Result<PathBuf> {
        let dirs = directories::ProjectDirs::from("", "", "todo-board")
            .context("could not determine a data directory")?;
        Ok(dirs.data_dir().join("todo-board.db"))
    }

    fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        self.conn.lock().map_err(|_| StoreError::Poisoned)
    }

    pub fn with_connection<F, T>(&self, f: F) -> Result<T, StoreError>
    where
        F: FnOnce(&Connection) -> Result<T, StoreError>,
    {
        let conn = self.lock()?;
        f(&conn)
    }

    pub fn table_exists(&self, table: &Table) -> Result<bool, StoreError> {
        self.with_connection(|conn| {
            let count: i64 =
                conn.query_row(schema::TABLE_EXISTS, params![table.name()], |row| row.get(0))?;
            Ok(count > 0)
        })
    }

    /// Creates the table if it is missing. Returns `true` if it was created.
    pub fn provision(&self, table: &Table) -> Result<bool, StoreError> {
        if self.table_exists(table)? {
            tracing::debug!(table = table.name(), "table already exists");
            return Ok(false);
        }
        self.with_connection(|conn| {
            conn.execute_batch(&schema::create_table_sql(&table.quoted_name()))?;
            Ok(())
        })?;
        tracing::info!(table = table.name(), "created table");
        Ok(true)
    }

    /// Provisions every table, reporting `(name, created)` for each.
    pub fn provision_all(&self, tables: &Tables) -> Result<Vec<(String, bool)>, StoreError> {
        tables
            .iter()
            .map(|table| Ok((table.name().to_string(), self.provision(table)?)))
            .collect()
    }
}

fn read_document(raw: &str) -> Result<Document, StoreError> {
    Ok(serde_json::from_str(raw)?)
}

impl TableStore for Database {
    fn put(&self, table: &Table, item: &Document) -> Result<(), StoreError> {
        let key = table.key_of(item)?;
        let document = serde_json::to_string(item)?;
        let sql = format!(
            "INSERT OR REPLACE INTO {} (partition_key, sort_key, document) VALUES (?1, ?2, ?3)",
            table.quoted_name()
        );
        self.with_connection(|conn| {
            conn.execute(&sql, params![key.owner_id, key.item_id, document])?;
            Ok(())
        })
    }

    fn query(
        &self,
        table: &Table,
        owner_id: &str,
        filter: Option<&AttributeFilter>,
    ) -> Result<Vec<Document>, StoreError> {
        let sql = format!(
            "SELECT document FROM {} WHERE partition_key = ?1 ORDER BY sort_key",
            table.quoted_name()
        );
        let rows = self.with_connection(|conn| {
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt
                .query_map(params![owner_id], |row| row.get::<_, String>(0))?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(rows)
        })?;

        let mut items = Vec::with_capacity(rows.len());
        for raw in rows {
            let item = read_document(&raw)?;
            if filter.is_none_or(|f| f.matches(&item)) {
                items.push(item);
            }
        }
        Ok(items)
    }

    fn update(
        &self,
        table: &Table,
        key: &ItemKey,
        changes: &Document,
    ) -> Result<Document, StoreError> {
        if changes.is_empty() {
            return Err(StoreError::EmptyUpdate {
                table: table.name().to_string(),
            });
        }
        if let Some(attribute) = changes.keys().find(|a| table.is_key_attribute(a)) {
            return Err(StoreError::KeyAttributeUpdate {
                table: table.name().to_string(),
                attribute: attribute.clone(),
            });
        }

        let select = format!(
            "SELECT document FROM {} WHERE partition_key = ?1 AND sort_key = ?2",
            table.quoted_name()
        );
        let write = format!(
            "UPDATE {} SET document = ?3 WHERE partition_key = ?1 AND sort_key = ?2",
            table.quoted_name()
        );

        self.with_connection(|conn| {
            let tx = conn.unchecked_transaction()?;
            let raw: Option<String> = tx
                .query_row(&select, params![key.owner_id, key.item_id], |row| row.get(0))
                .optional()?;
            let Some(raw) = raw else {
                return Err(StoreError::NotFound {
                    table: table.name().to_string(),
                    key: key.clone(),
                });
            };

            let mut item = read_document(&raw)?;
            for (attribute, value) in changes {
                item.insert(attribute.clone(), value.clone());
            }
            tx.execute(
                &write,
                params![key.owner_id, key.item_id, serde_json::to_string(&item)?],
            )?;
            tx.commit()?;
            Ok(item)
        })
    }

    fn delete(&self, table: &Table, key: &ItemKey) -> Result<(), StoreError> {
        let sql = format!(
            "DELETE FROM {} WHERE partition_key = ?1 AND sort_key = ?2",
            table.quoted_name()
        );
        self.with_connection(|conn| {
            conn.execute(&sql, params![key.owner_id, key.item_id])?;
            Ok(())
        })
    }
}

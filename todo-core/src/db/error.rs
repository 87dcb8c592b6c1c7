use super::ItemKey;

/// Errors raised by a [`TableStore`](super::TableStore).
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("document encoding error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("document is not a JSON object")]
    NotAnObject,

    #[error("invalid table name {0:?}")]
    InvalidTableName(String),

    #[error("item for table {table} is missing key attribute {attribute:?}")]
    MissingKey {
        table: String,
        attribute: &'static str,
    },

    #[error("update on table {table} changes no attributes")]
    EmptyUpdate { table: String },

    #[error("key attribute {attribute:?} of table {table} cannot be updated")]
    KeyAttributeUpdate {
        table: String,
        attribute: String,
    },

    #[error("no item {key} in table {table}")]
    NotFound { table: String, key: ItemKey },

    #[error("store connection lock poisoned")]
    Poisoned,
}

/// DDL for one logical table. `{table}` is replaced with the quoted table name.
///
/// Every logical table has the same physical shape: a two-part key and the
/// item itself stored as a JSON document.
pub const TABLE_SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS {table} (
    partition_key TEXT NOT NULL,
    sort_key TEXT NOT NULL,
    document JSON NOT NULL,
    PRIMARY KEY (partition_key, sort_key)
) WITHOUT ROWID;
"#;

pub const TABLE_EXISTS: &str =
    "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1";

pub fn create_table_sql(quoted_name: &str) -> String {
    TABLE_SCHEMA.replace("{table}", quoted_name)
}

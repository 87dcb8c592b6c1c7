use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use todo_core::db::{Database, Tables, DEFAULT_CATEGORIES_TABLE, DEFAULT_TODOS_TABLE};

pub const DEFAULT_USER_ID: &str = "default-user";

/// Store settings shared by every subcommand.
#[derive(Debug, Clone, Args)]
pub struct StoreConfig {
    /// Path to the SQLite database file [default: platform data directory]
    #[arg(long, global = true, env = "TODO_BOARD_DB")]
    pub db: Option<PathBuf>,

    /// Owner identity every record is scoped to
    #[arg(long, global = true, env = "DEFAULT_USER_ID", default_value = DEFAULT_USER_ID)]
    pub user_id: String,

    /// Name of the todos table
    #[arg(long, global = true, env = "TODO_BOARD_TODOS_TABLE", default_value = DEFAULT_TODOS_TABLE)]
    pub todos_table: String,

    /// Name of the categories table
    #[arg(
        long,
        global = true,
        env = "TODO_BOARD_CATEGORIES_TABLE",
        default_value = DEFAULT_CATEGORIES_TABLE
    )]
    pub categories_table: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            db: None,
            user_id: DEFAULT_USER_ID.to_string(),
            todos_table: DEFAULT_TODOS_TABLE.to_string(),
            categories_table: DEFAULT_CATEGORIES_TABLE.to_string(),
        }
    }
}

impl StoreConfig {
    pub fn tables(&self) -> anyhow::Result<Tables> {
        Tables::new(&self.todos_table, &self.categories_table).context("invalid table name")
    }

    pub fn open_database(&self) -> anyhow::Result<Database> {
        match &self.db {
            Some(path) => Database::open(path),
            None => Database::open_default(),
        }
    }
}

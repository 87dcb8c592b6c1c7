//! Core library for todo-board.
//!
//! This crate provides the domain models, the key-value table store and the
//! todo/category operations, independent of any transport layer.
//!
//! # Usage
//!
//! ```no_run
//! use todo_core::db::{Database, Tables};
//! use todo_core::ops::{self, StoreContext};
//! use todo_core::query::TodoQuery;
//!
//! let db = Database::open_default()?;
//! let tables = Tables::default();
//! db.provision_all(&tables)?;
//!
//! let cx = StoreContext::new(&db, &tables, "default-user");
//! let page = ops::todos::list(&cx, &TodoQuery::default())?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod db;
pub mod models;
pub mod ops;
pub mod query;

// Re-export commonly used types at crate root
pub use db::{Database, StoreError, TableStore, Tables};
pub use ops::StoreContext;

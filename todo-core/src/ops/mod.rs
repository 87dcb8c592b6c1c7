//! Todo and category operations against a [`TableStore`].

pub mod categories;
pub mod todos;

use crate::db::{TableStore, Tables};

/// Everything an operation needs: the store, the table descriptors and the
/// owner every record is scoped to.
#[derive(Clone, Copy)]
pub struct StoreContext<'a> {
    pub store: &'a dyn TableStore,
    pub tables: &'a Tables,
    pub owner_id: &'a str,
}

impl<'a> StoreContext<'a> {
    pub fn new(store: &'a dyn TableStore, tables: &'a Tables, owner_id: &'a str) -> Self {
        Self {
            store,
            tables,
            owner_id,
        }
    }
}

//! Category operations, including first-read seeding and the cascading
//! delete.
//!
//! The cascade runs in two phases: first every todo in the category is
//! deleted, one store call each, then the category itself. Nothing is rolled
//! back when a call fails, so a failure can leave some todos deleted and the
//! category in place.

use anyhow::{Context, Result};

use super::{todos, StoreContext};
use crate::db::{self, ItemKey};
use crate::models::{Category, CreateCategoryInput, DEFAULT_CATEGORIES};

/// Lists the owner's categories, writing the defaults first if there are none.
///
/// Defaults are written one at a time; a failed write aborts the listing and
/// leaves any earlier defaults in place.
pub fn list_or_seed(cx: &StoreContext<'_>) -> Result<Vec<Category>> {
    let table = &cx.tables.categories;
    let mut categories = cx
        .store
        .query(table, cx.owner_id, None)
        .with_context(|| format!("querying {}", table.name()))?
        .into_iter()
        .map(|item| db::decode::<Category>(item).context("decoding category"))
        .collect::<Result<Vec<_>>>()?;

    if categories.is_empty() {
        tracing::info!(owner = cx.owner_id, "seeding default categories");
        for seed in &DEFAULT_CATEGORIES {
            let category = seed.materialize(cx.owner_id);
            cx.store
                .put(table, &db::encode(&category)?)
                .with_context(|| format!("seeding category {}", category.category_id))?;
            categories.push(category);
        }
    }

    Ok(categories)
}

pub fn create(cx: &StoreContext<'_>, input: CreateCategoryInput) -> Result<Category> {
    let category = Category::new(cx.owner_id, input);
    cx.store
        .put(&cx.tables.categories, &db::encode(&category)?)
        .with_context(|| format!("writing category {}", category.category_id))?;
    tracing::debug!(category_id = %category.category_id, "created category");
    Ok(category)
}

/// What a completed cascade removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CascadeReport {
    pub todos_deleted: usize,
}

/// Deletes the category's todos, then the category.
pub fn delete(cx: &StoreContext<'_>, category_id: &str) -> Result<CascadeReport> {
    let todos_deleted = delete_todos_in(cx, category_id)?;

    cx.store
        .delete(
            &cx.tables.categories,
            &ItemKey::new(cx.owner_id, category_id),
        )
        .with_context(|| {
            format!("deleting category {category_id} after removing {todos_deleted} todos")
        })?;

    tracing::info!(category_id, todos_deleted, "deleted category");
    Ok(CascadeReport { todos_deleted })
}

fn delete_todos_in(cx: &StoreContext<'_>, category_id: &str) -> Result<usize> {
    let doomed = todos::in_category(cx, category_id)?;
    let total = doomed.len();

    for (deleted, todo) in doomed.iter().enumerate() {
        if let Err(err) = todos::delete(cx, &todo.todo_id) {
            tracing::warn!(
                category_id,
                deleted,
                total,
                "category cascade stopped part way"
            );
            return Err(err.context(format!(
                "cascade for category {category_id} stopped after {deleted} of {total} todos"
            )));
        }
    }

    Ok(total)
}

use anyhow::{Context, Result};
use serde_json::Value;

use super::StoreContext;
use crate::db::{self, AttributeFilter, Document, ItemKey, CATEGORY_KEY};
use crate::models::{CreateTodoInput, Todo, UpdateTodoInput};
use crate::query::{self, TodoPage, TodoQuery};

/// Reads every todo of the owner and runs the list pipeline over them.
pub fn list(cx: &StoreContext<'_>, query: &TodoQuery) -> Result<TodoPage> {
    let todos = load(cx, None)?;
    tracing::debug!(owner = cx.owner_id, fetched = todos.len(), "listing todos");
    Ok(query::run(todos, query))
}

/// Todos whose `categoryId` is exactly `category_id`.
pub fn in_category(cx: &StoreContext<'_>, category_id: &str) -> Result<Vec<Todo>> {
    load(cx, Some(&AttributeFilter::equals(CATEGORY_KEY, category_id)))
}

fn load(cx: &StoreContext<'_>, filter: Option<&AttributeFilter>) -> Result<Vec<Todo>> {
    let table = &cx.tables.todos;
    cx.store
        .query(table, cx.owner_id, filter)
        .with_context(|| format!("querying {}", table.name()))?
        .into_iter()
        .map(|item| db::decode(item).context("decoding todo"))
        .collect()
}

pub fn create(cx: &StoreContext<'_>, input: CreateTodoInput) -> Result<Todo> {
    let todo = Todo::new(cx.owner_id, input);
    cx.store
        .put(&cx.tables.todos, &db::encode(&todo)?)
        .with_context(|| format!("writing todo {}", todo.todo_id))?;
    tracing::debug!(todo_id = %todo.todo_id, "created todo");
    Ok(todo)
}

/// Writes only the fields present in `input` and returns the stored result.
pub fn update(cx: &StoreContext<'_>, todo_id: &str, input: UpdateTodoInput) -> Result<Todo> {
    let mut changes = Document::new();
    if let Some(completed) = input.completed {
        changes.insert("completed".into(), Value::Bool(completed));
    }
    if let Some(task) = input.task {
        changes.insert("task".into(), Value::String(task));
    }

    let item = cx
        .store
        .update(&cx.tables.todos, &key(cx, todo_id), &changes)
        .with_context(|| format!("updating todo {todo_id}"))?;
    db::decode(item).context("decoding updated todo")
}

/// Deletes the todo. Missing todos are not an error.
pub fn delete(cx: &StoreContext<'_>, todo_id: &str) -> Result<()> {
    cx.store
        .delete(&cx.tables.todos, &key(cx, todo_id))
        .with_context(|| format!("deleting todo {todo_id}"))?;
    tracing::debug!(todo_id, "deleted todo");
    Ok(())
}

fn key(cx: &StoreContext<'_>, todo_id: &str) -> ItemKey {
    ItemKey::new(cx.owner_id, todo_id)
}

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};
use serde_json::Value;
use todo_core::models::{CreateTodoInput, ListTodosParams, Todo, UpdateTodoInput};
use todo_core::ops;
use todo_core::query::{TodoPage, TodoQuery};

use super::error::{ApiError, OrFail, Operation};
use super::{success, AppState};

pub async fn list(
    State(state): State<AppState>,
    pairs: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<TodoPage>, ApiError> {
    let Query(pairs) = pairs.or_fail(Operation::FetchTodos)?;
    let query = TodoQuery::from_params(&ListTodosParams::from_pairs(pairs));
    let page = ops::todos::list(&state.context(), &query).or_fail(Operation::FetchTodos)?;
    Ok(Json(page))
}

pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<CreateTodoInput>, JsonRejection>,
) -> Result<Json<Todo>, ApiError> {
    let Json(input) = body.or_fail(Operation::CreateTodo)?;
    let todo = ops::todos::create(&state.context(), input).or_fail(Operation::CreateTodo)?;
    Ok(Json(todo))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<UpdateTodoInput>, JsonRejection>,
) -> Result<Json<Todo>, ApiError> {
    let Json(input) = body.or_fail(Operation::UpdateTodo)?;
    let todo = ops::todos::update(&state.context(), &id, input).or_fail(Operation::UpdateTodo)?;
    Ok(Json(todo))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    ops::todos::delete(&state.context(), &id).or_fail(Operation::DeleteTodo)?;
    Ok(success())
}

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use serde_json::Value;
use todo_core::models::{Category, CreateCategoryInput};
use todo_core::ops;

use super::error::{ApiError, OrFail, Operation};
use super::{success, AppState};

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Category>>, ApiError> {
    let categories =
        ops::categories::list_or_seed(&state.context()).or_fail(Operation::FetchCategories)?;
    Ok(Json(categories))
}

pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<CreateCategoryInput>, JsonRejection>,
) -> Result<Json<Category>, ApiError> {
    let Json(input) = body.or_fail(Operation::CreateCategory)?;
    let category =
        ops::categories::create(&state.context(), input).or_fail(Operation::CreateCategory)?;
    Ok(Json(category))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    ops::categories::delete(&state.context(), &id).or_fail(Operation::DeleteCategory)?;
    Ok(success())
}

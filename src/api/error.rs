use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// The operation a request was performing. Each one has a fixed failure
/// message; nothing else about a failure reaches the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    FetchTodos,
    CreateTodo,
    UpdateTodo,
    DeleteTodo,
    FetchCategories,
    CreateCategory,
    DeleteCategory,
}

impl Operation {
    pub fn failure_message(&self) -> &'static str {
        match self {
            Self::FetchTodos => "Failed to fetch todos",
            Self::CreateTodo => "Failed to create todo",
            Self::UpdateTodo => "Failed to update todo",
            Self::DeleteTodo => "Failed to delete todo",
            Self::FetchCategories => "Failed to fetch categories",
            Self::CreateCategory => "Failed to create category",
            Self::DeleteCategory => "Failed to delete category",
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("{}", .operation.failure_message())]
pub struct ApiError {
    operation: Operation,
    #[source]
    source: anyhow::Error,
}

impl ApiError {
    pub fn new(operation: Operation, source: impl Into<anyhow::Error>) -> Self {
        Self {
            operation,
            source: source.into(),
        }
    }

    pub fn operation(&self) -> Operation {
        self.operation
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = self.operation.failure_message();
        tracing::error!(operation = ?self.operation, error = %format!("{:#}", self.source), "{message}");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorBody {
                error: message.to_string(),
            }),
        )
            .into_response()
    }
}

/// Maps a failed result onto the request's operation.
pub trait OrFail<T> {
    fn or_fail(self, operation: Operation) -> Result<T, ApiError>;
}

impl<T, E: Into<anyhow::Error>> OrFail<T> for Result<T, E> {
    fn or_fail(self, operation: Operation) -> Result<T, ApiError> {
        self.map_err(|err| ApiError::new(operation, err))
    }
}

//! JSON HTTP API.

mod categories;
pub mod error;
mod todos;

use std::sync::Arc;

use axum::{
    routing::{delete, get, put},
    Json, Router,
};
use serde_json::{json, Value};
use todo_core::db::{TableStore, Tables};
use todo_core::ops::StoreContext;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub use error::{ApiError, ErrorBody, Operation};

/// Shared, immutable request context.
#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn TableStore>,
    tables: Arc<Tables>,
    owner_id: Arc<str>,
}

impl AppState {
    pub fn new(store: impl TableStore + 'static, tables: Tables, owner_id: &str) -> Self {
        Self {
            store: Arc::new(store),
            tables: Arc::new(tables),
            owner_id: Arc::from(owner_id),
        }
    }

    pub fn context(&self) -> StoreContext<'_> {
        StoreContext::new(self.store.as_ref(), &self.tables, &self.owner_id)
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/todos", get(todos::list).post(todos::create))
        .route("/api/todos/{id}", put(todos::update).delete(todos::delete))
        .route(
            "/api/categories",
            get(categories::list).post(categories::create),
        )
        .route("/api/categories/{id}", delete(categories::delete))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Body returned by successful deletes.
fn success() -> Json<Value> {
    Json(json!({ "success": true }))
}

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{json, Value};
use todo_board::api::{create_router, AppState};
use todo_core::db::{
    AttributeFilter, Database, Document, ItemKey, StoreError, Table, TableStore, Tables,
};

const OWNER: &str = "test-user";

fn setup() -> (TestServer, Database) {
    let db = Database::open_memory().expect("Failed to create test database");
    let tables = Tables::default();
    db.provision_all(&tables)
        .expect("Failed to provision tables");
    let app = create_router(AppState::new(db.clone(), tables, OWNER));
    (TestServer::new(app).expect("Failed to start test server"), db)
}

/// Every call fails, as if the store were unreachable.
struct BrokenStore;

impl TableStore for BrokenStore {
    fn put(&self, _: &Table, _: &Document) -> Result<(), StoreError> {
        Err(StoreError::Poisoned)
    }

    fn query(
        &self,
        _: &Table,
        _: &str,
        _: Option<&AttributeFilter>,
    ) -> Result<Vec<Document>, StoreError> {
        Err(StoreError::Poisoned)
    }

    fn update(&self, _: &Table, _: &ItemKey, _: &Document) -> Result<Document, StoreError> {
        Err(StoreError::Poisoned)
    }

    fn delete(&self, _: &Table, _: &ItemKey) -> Result<(), StoreError> {
        Err(StoreError::Poisoned)
    }
}

fn broken_server() -> TestServer {
    let app = create_router(AppState::new(BrokenStore, Tables::default(), OWNER));
    TestServer::new(app).expect("Failed to start test server")
}

async fn create_todo(server: &TestServer, task: &str, category_id: &str) -> Value {
    let response = server
        .post("/api/todos")
        .json(&json!({ "task": task, "categoryId": category_id }))
        .await;
    response.assert_status_ok();
    response.json()
}

#[tokio::test]
async fn health_reports_ok() {
    let (server, _) = setup();
    let response = server.get("/health").await;
    response.assert_status_ok();
    response.assert_json(&json!({ "status": "ok" }));
}

#[tokio::test]
async fn create_todo_returns_the_written_record() {
    let (server, _) = setup();
    let todo = create_todo(&server, "Buy groceries", "shopping").await;

    assert_eq!(todo["task"], "Buy groceries");
    assert_eq!(todo["categoryId"], "shopping");
    assert_eq!(todo["completed"], false);
    assert_eq!(todo["userId"], OWNER);
    assert!(!todo["todoId"].as_str().unwrap().is_empty());
    assert!(!todo["created"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn create_todo_without_task_fails_opaquely() {
    let (server, _) = setup();
    let response = server
        .post("/api/todos")
        .json(&json!({ "categoryId": "work" }))
        .await;
    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    response.assert_json(&json!({ "error": "Failed to create todo" }));
}

#[tokio::test]
async fn list_paginates_with_metadata() {
    let (server, _) = setup();
    for i in 0..25 {
        create_todo(&server, &format!("Task {i}"), "work").await;
    }

    let first: Value = server
        .get("/api/todos")
        .add_query_param("page", "1")
        .add_query_param("limit", "10")
        .await
        .json();
    assert_eq!(first["items"].as_array().unwrap().len(), 10);
    assert_eq!(
        first["pagination"],
        json!({
            "page": 1,
            "limit": 10,
            "total": 25,
            "totalPages": 3,
            "hasNext": true,
            "hasPrev": false
        })
    );

    let last: Value = server
        .get("/api/todos")
        .add_query_param("page", "3")
        .add_query_param("limit", "10")
        .await
        .json();
    assert_eq!(last["items"].as_array().unwrap().len(), 5);
    assert_eq!(last["pagination"]["hasNext"], false);
    assert_eq!(last["pagination"]["hasPrev"], true);
}

#[tokio::test]
async fn list_falls_back_to_defaults_for_bad_numbers() {
    let (server, _) = setup();
    create_todo(&server, "Only one", "work").await;

    let page: Value = server
        .get("/api/todos")
        .add_query_param("page", "abc")
        .add_query_param("limit", "0")
        .await
        .json();
    assert_eq!(page["pagination"]["page"], 1);
    assert_eq!(page["pagination"]["limit"], 10);
    assert_eq!(page["items"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn list_reads_leading_digits_of_page_and_limit() {
    let (server, _) = setup();
    for i in 0..5 {
        create_todo(&server, &format!("Task {i}"), "work").await;
    }

    let page: Value = server
        .get("/api/todos")
        .add_query_param("page", "2.5")
        .add_query_param("limit", "2abc")
        .await
        .json();
    assert_eq!(page["pagination"]["page"], 2);
    assert_eq!(page["pagination"]["limit"], 2);
    assert_eq!(page["pagination"]["hasPrev"], true);
    assert_eq!(page["items"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn list_uses_first_of_repeated_params() {
    let (server, _) = setup();
    for i in 0..3 {
        create_todo(&server, &format!("Task {i}"), "work").await;
    }

    let response = server
        .get("/api/todos")
        .add_query_param("page", "1")
        .add_query_param("page", "2")
        .add_query_param("limit", "2")
        .await;
    response.assert_status_ok();
    let page: Value = response.json();
    assert_eq!(page["pagination"]["page"], 1);
    assert_eq!(page["items"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn list_searches_and_filters() {
    let (server, _) = setup();
    create_todo(&server, "Buy groceries for dinner", "shopping").await;
    create_todo(&server, "Finish project report", "work").await;
    create_todo(&server, "Buy birthday gift", "personal").await;

    let found: Value = server
        .get("/api/todos")
        .add_query_param("search", "buy")
        .add_query_param("sortBy", "task")
        .add_query_param("sortOrder", "asc")
        .await
        .json();
    let tasks: Vec<_> = found["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["task"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(tasks, vec!["Buy birthday gift", "Buy groceries for dinner"]);

    let work: Value = server
        .get("/api/todos")
        .add_query_param("categoryId", "work")
        .await
        .json();
    assert_eq!(work["pagination"]["total"], 1);
    assert_eq!(work["items"][0]["categoryId"], "work");

    let all: Value = server
        .get("/api/todos")
        .add_query_param("categoryId", "all")
        .await
        .json();
    assert_eq!(all["pagination"]["total"], 3);
}

#[tokio::test]
async fn update_changes_only_given_fields() {
    let (server, _) = setup();
    let todo = create_todo(&server, "Write report", "work").await;
    let path = format!("/api/todos/{}", todo["todoId"].as_str().unwrap());

    let done: Value = server
        .put(&path)
        .json(&json!({ "completed": true }))
        .await
        .json();
    assert_eq!(done["completed"], true);
    assert_eq!(done["task"], "Write report");

    let renamed: Value = server
        .put(&path)
        .json(&json!({ "task": "Ship report" }))
        .await
        .json();
    assert_eq!(renamed["completed"], true);
    assert_eq!(renamed["task"], "Ship report");
    assert_eq!(renamed["created"], todo["created"]);
}

#[tokio::test]
async fn update_of_missing_todo_fails() {
    let (server, _) = setup();
    let response = server
        .put("/api/todos/nope")
        .json(&json!({ "completed": true }))
        .await;
    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    response.assert_json(&json!({ "error": "Failed to update todo" }));
}

#[tokio::test]
async fn delete_todo_acknowledges_even_when_missing() {
    let (server, _) = setup();
    let todo = create_todo(&server, "Write report", "work").await;
    let path = format!("/api/todos/{}", todo["todoId"].as_str().unwrap());

    server.delete(&path).await.assert_json(&json!({ "success": true }));
    server.delete(&path).await.assert_json(&json!({ "success": true }));

    let page: Value = server.get("/api/todos").await.json();
    assert_eq!(page["pagination"]["total"], 0);
}

#[tokio::test]
async fn first_category_listing_seeds_defaults() {
    let (server, db) = setup();
    let categories: Value = server.get("/api/categories").await.json();
    let names: Vec<_> = categories
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["Personal", "Work", "Shopping"]);

    let stored = db
        .query(&Tables::default().categories, OWNER, None)
        .unwrap();
    assert_eq!(stored.len(), 3);
}

#[tokio::test]
async fn create_category_returns_the_written_record() {
    let (server, _) = setup();
    let response = server
        .post("/api/categories")
        .json(&json!({ "name": "Garden", "color": "bg-lime-500" }))
        .await;
    response.assert_status_ok();
    let category: Value = response.json();
    assert_eq!(category["name"], "Garden");
    assert_eq!(category["color"], "bg-lime-500");
    assert_eq!(category["userId"], OWNER);
    assert!(!category["categoryId"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn delete_category_removes_its_todos() {
    let (server, _) = setup();
    let category: Value = server
        .post("/api/categories")
        .json(&json!({ "name": "Errands", "color": "bg-red-500" }))
        .await
        .json();
    let category_id = category["categoryId"].as_str().unwrap().to_string();
    create_todo(&server, "Post office", &category_id).await;
    create_todo(&server, "Bank", &category_id).await;
    create_todo(&server, "Unrelated", "work").await;

    server
        .delete(&format!("/api/categories/{category_id}"))
        .await
        .assert_json(&json!({ "success": true }));

    let remaining: Value = server
        .get("/api/todos")
        .add_query_param("categoryId", &category_id)
        .await
        .json();
    assert_eq!(remaining["pagination"]["total"], 0);

    let all: Value = server.get("/api/todos").await.json();
    assert_eq!(all["pagination"]["total"], 1);

    let categories: Value = server.get("/api/categories").await.json();
    assert!(categories
        .as_array()
        .unwrap()
        .iter()
        .all(|c| c["categoryId"] != category_id.as_str()));
}

#[tokio::test]
async fn store_failures_map_to_fixed_messages() {
    let server = broken_server();

    let cases = [
        (server.get("/api/todos").await, "Failed to fetch todos"),
        (
            server.post("/api/todos").json(&json!({ "task": "x" })).await,
            "Failed to create todo",
        ),
        (
            server.put("/api/todos/1").json(&json!({ "completed": true })).await,
            "Failed to update todo",
        ),
        (server.delete("/api/todos/1").await, "Failed to delete todo"),
        (server.get("/api/categories").await, "Failed to fetch categories"),
        (
            server
                .post("/api/categories")
                .json(&json!({ "name": "x" }))
                .await,
            "Failed to create category",
        ),
        (
            server.delete("/api/categories/work").await,
            "Failed to delete category",
        ),
    ];

    for (response, message) in cases {
        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        response.assert_json(&json!({ "error": message }));
    }
}

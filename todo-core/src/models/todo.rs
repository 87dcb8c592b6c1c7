use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub user_id: String,
    pub todo_id: String,
    pub task: String,
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    pub created: DateTime<Utc>,
}

impl Todo {
    /// A fresh, incomplete todo with a generated identity.
    pub fn new(user_id: impl Into<String>, input: CreateTodoInput) -> Self {
        Self {
            user_id: user_id.into(),
            todo_id: Uuid::new_v4().to_string(),
            task: input.task,
            completed: false,
            category_id: input.category_id,
            created: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    #[default]
    Created,
    Task,
    Completed,
}

impl SortField {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Task => "task",
            Self::Completed => "completed",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "created" => Some(Self::Created),
            "task" => Some(Self::Task),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "asc" => Some(Self::Asc),
            "desc" => Some(Self::Desc),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTodoInput {
    pub task: String,
    #[serde(default)]
    pub category_id: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTodoInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task: Option<String>,
}

impl UpdateTodoInput {
    pub fn is_empty(&self) -> bool {
        self.completed.is_none() && self.task.is_none()
    }
}

/// Raw list parameters as they arrive on the query string. Parsing and
/// defaults happen in [`TodoQuery::from_params`](crate::query::TodoQuery::from_params).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListTodosParams {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
    pub search: Option<String>,
    pub category_id: Option<String>,
}

impl ListTodosParams {
    /// Builds the parameters from raw query pairs. A repeated key keeps its
    /// first value; unknown keys are ignored.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "page" => &mut params.page,
                "limit" => &mut params.limit,
                "sortBy" => &mut params.sort_by,
                "sortOrder" => &mut params.sort_order,
                "search" => &mut params.search,
                "categoryId" => &mut params.category_id,
                _ => continue,
            };
            slot.get_or_insert(value);
        }
        params
    }
}

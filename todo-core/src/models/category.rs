use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub user_id: String,
    pub category_id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub created: DateTime<Utc>,
}

impl Category {
    pub fn new(user_id: impl Into<String>, input: CreateCategoryInput) -> Self {
        Self {
            user_id: user_id.into(),
            category_id: Uuid::new_v4().to_string(),
            name: input.name,
            color: input.color,
            created: Utc::now(),
        }
    }
}

/// A category every owner starts with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DefaultCategory {
    pub category_id: &'static str,
    pub name: &'static str,
    pub color: &'static str,
}

impl DefaultCategory {
    pub fn materialize(&self, user_id: &str) -> Category {
        Category {
            user_id: user_id.to_string(),
            category_id: self.category_id.to_string(),
            name: self.name.to_string(),
            color: Some(self.color.to_string()),
            created: Utc::now(),
        }
    }
}

pub const DEFAULT_CATEGORIES: [DefaultCategory; 3] = [
    DefaultCategory {
        category_id: "personal",
        name: "Personal",
        color: "bg-blue-500",
    },
    DefaultCategory {
        category_id: "work",
        name: "Work",
        color: "bg-green-500",
    },
    DefaultCategory {
        category_id: "shopping",
        name: "Shopping",
        color: "bg-purple-500",
    },
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCategoryInput {
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
}

use std::fmt;

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use super::StoreError;

/// A stored item: a flat JSON object of attributes.
pub type Document = serde_json::Map<String, Value>;

pub const OWNER_KEY: &str = "userId";
pub const TODO_KEY: &str = "todoId";
pub const CATEGORY_KEY: &str = "categoryId";

pub const DEFAULT_TODOS_TABLE: &str = "todos";
pub const DEFAULT_CATEGORIES_TABLE: &str = "categories";

/// Physical table name plus the attribute names that make up its key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    name: String,
    partition_key: &'static str,
    sort_key: &'static str,
}

impl Table {
    pub fn new(
        name: impl Into<String>,
        partition_key: &'static str,
        sort_key: &'static str,
    ) -> Result<Self, StoreError> {
        let name = name.into();
        if !is_valid_table_name(&name) {
            return Err(StoreError::InvalidTableName(name));
        }
        Ok(Self {
            name,
            partition_key,
            sort_key,
        })
    }

    pub fn todos(name: impl Into<String>) -> Result<Self, StoreError> {
        Self::new(name, OWNER_KEY, TODO_KEY)
    }

    pub fn categories(name: impl Into<String>) -> Result<Self, StoreError> {
        Self::new(name, OWNER_KEY, CATEGORY_KEY)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn partition_key(&self) -> &'static str {
        self.partition_key
    }

    pub fn sort_key(&self) -> &'static str {
        self.sort_key
    }

    /// Name quoted for use as an SQL identifier. Validation guarantees it
    /// holds no quote characters.
    pub(crate) fn quoted_name(&self) -> String {
        format!("\"{}\"", self.name)
    }

    pub fn is_key_attribute(&self, attribute: &str) -> bool {
        attribute == self.partition_key || attribute == self.sort_key
    }

    /// Reads the item's key from its key attributes.
    pub fn key_of(&self, item: &Document) -> Result<ItemKey, StoreError> {
        let owner_id = self.string_attribute(item, self.partition_key)?;
        let item_id = self.string_attribute(item, self.sort_key)?;
        Ok(ItemKey::new(owner_id, item_id))
    }

    fn string_attribute(
        &self,
        item: &Document,
        attribute: &'static str,
    ) -> Result<String, StoreError> {
        item.get(attribute)
            .and_then(Value::as_str)
            .map(str::to_owned)
            .ok_or_else(|| StoreError::MissingKey {
                table: self.name.clone(),
                attribute,
            })
    }
}

/// 3-255 characters drawn from `[A-Za-z0-9_.-]`.
fn is_valid_table_name(name: &str) -> bool {
    (3..=255).contains(&name.len())
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
}

/// The two logical tables the service works with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tables {
    pub todos: Table,
    pub categories: Table,
}

impl Tables {
    pub fn new(
        todos: impl Into<String>,
        categories: impl Into<String>,
    ) -> Result<Self, StoreError> {
        Ok(Self {
            todos: Table::todos(todos)?,
            categories: Table::categories(categories)?,
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = &Table> {
        [&self.todos, &self.categories].into_iter()
    }
}

impl Default for Tables {
    fn default() -> Self {
        Self {
            todos: Table {
                name: DEFAULT_TODOS_TABLE.to_string(),
                partition_key: OWNER_KEY,
                sort_key: TODO_KEY,
            },
            categories: Table {
                name: DEFAULT_CATEGORIES_TABLE.to_string(),
                partition_key: OWNER_KEY,
                sort_key: CATEGORY_KEY,
            },
        }
    }
}

/// (owner identity, item identity)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ItemKey {
    pub owner_id: String,
    pub item_id: String,
}

impl ItemKey {
    pub fn new(owner_id: impl Into<String>, item_id: impl Into<String>) -> Self {
        Self {
            owner_id: owner_id.into(),
            item_id: item_id.into(),
        }
    }
}

impl fmt::Display for ItemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.owner_id, self.item_id)
    }
}

/// Equality filter on a non-key attribute, applied after the range read.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeFilter {
    pub attribute: String,
    pub value: Value,
}

impl AttributeFilter {
    pub fn equals(attribute: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            attribute: attribute.into(),
            value: value.into(),
        }
    }

    pub fn matches(&self, item: &Document) -> bool {
        item.get(&self.attribute) == Some(&self.value)
    }
}

pub fn encode<T: Serialize>(value: &T) -> Result<Document, StoreError> {
    match serde_json::to_value(value)? {
        Value::Object(document) => Ok(document),
        _ => Err(StoreError::NotAnObject),
    }
}

pub fn decode<T: DeserializeOwned>(document: Document) -> Result<T, StoreError> {
    Ok(serde_json::from_value(Value::Object(document))?)
}

//! The todo list pipeline: search, category filter, sort, paginate.
//!
//! Works on the complete set of an owner's todos held in memory.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::models::{ListTodosParams, SortField, SortOrder, Todo};

pub const DEFAULT_PAGE: usize = 1;
pub const DEFAULT_LIMIT: usize = 10;

/// Category id that disables the category filter.
pub const ALL_CATEGORIES: &str = "all";

/// Normalised list parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoQuery {
    pub search: String,
    pub category_id: Option<String>,
    pub sort_by: SortField,
    pub sort_order: SortOrder,
    pub page: usize,
    pub limit: usize,
}

impl Default for TodoQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            category_id: None,
            sort_by: SortField::default(),
            sort_order: SortOrder::default(),
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl TodoQuery {
    /// Applies defaults: missing, digitless or non-positive `page`/`limit`
    /// become 1/10, unknown sort keys become `created`/`desc`.
    pub fn from_params(params: &ListTodosParams) -> Self {
        Self {
            search: params.search.clone().unwrap_or_default(),
            category_id: params
                .category_id
                .clone()
                .filter(|id| !id.is_empty() && id != ALL_CATEGORIES),
            sort_by: params
                .sort_by
                .as_deref()
                .and_then(SortField::from_str)
                .unwrap_or_default(),
            sort_order: params
                .sort_order
                .as_deref()
                .and_then(SortOrder::from_str)
                .unwrap_or_default(),
            page: parse_positive(params.page.as_deref(), DEFAULT_PAGE),
            limit: parse_positive(params.limit.as_deref(), DEFAULT_LIMIT),
        }
    }
}

/// Reads the leading integer the way a lenient form parser would: optional
/// sign, then digits, ignoring whatever follows (`"2.5"` is 2, `"3abc"` is 3).
/// No digits, zero, a negative value or overflow give `default`.
fn parse_positive(raw: Option<&str>, default: usize) -> usize {
    let Some(s) = raw.map(str::trim_start) else {
        return default;
    };
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let digits = rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len());

    match rest[..digits].parse::<usize>() {
        Ok(n) if n > 0 && !negative => n,
        _ => default,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: usize,
    pub limit: usize,
    pub total: usize,
    pub total_pages: usize,
    pub has_next: bool,
    pub has_prev: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TodoPage {
    pub items: Vec<Todo>,
    pub pagination: Pagination,
}

/// Keeps todos whose task contains `search`, ignoring case.
pub fn filter_by_search(todos: Vec<Todo>, search: &str) -> Vec<Todo> {
    if search.is_empty() {
        return todos;
    }
    let needle = search.to_lowercase();
    todos
        .into_iter()
        .filter(|todo| todo.task.to_lowercase().contains(&needle))
        .collect()
}

/// Keeps todos in `category_id`. `None`, `""` and `"all"` keep everything.
pub fn filter_by_category(todos: Vec<Todo>, category_id: Option<&str>) -> Vec<Todo> {
    match category_id {
        None | Some("") | Some(ALL_CATEGORIES) => todos,
        Some(id) => todos
            .into_iter()
            .filter(|todo| todo.category_id.as_deref() == Some(id))
            .collect(),
    }
}

/// Orders by `field` in `order`; equal keys fall back to todo id ascending.
pub fn compare(a: &Todo, b: &Todo, field: SortField, order: SortOrder) -> Ordering {
    let ordering = match field {
        SortField::Created => a.created.cmp(&b.created),
        SortField::Task => a.task.cmp(&b.task),
        SortField::Completed => a.completed.cmp(&b.completed),
    };
    let ordering = match order {
        SortOrder::Asc => ordering,
        SortOrder::Desc => ordering.reverse(),
    };
    ordering.then_with(|| a.todo_id.cmp(&b.todo_id))
}

pub fn sort_todos(todos: &mut [Todo], field: SortField, order: SortOrder) {
    todos.sort_by(|a, b| compare(a, b, field, order));
}

/// Slices out one page. Pages past the end are empty.
pub fn paginate(todos: Vec<Todo>, page: usize, limit: usize) -> TodoPage {
    let page = page.max(1);
    let limit = limit.max(1);
    let total = todos.len();
    let start = (page - 1).saturating_mul(limit);
    let end = start.saturating_add(limit);

    let items = todos.into_iter().skip(start).take(limit).collect();

    TodoPage {
        items,
        pagination: Pagination {
            page,
            limit,
            total,
            total_pages: total.div_ceil(limit),
            has_next: end < total,
            has_prev: page > 1,
        },
    }
}

/// Runs the whole pipeline.
pub fn run(todos: Vec<Todo>, query: &TodoQuery) -> TodoPage {
    let todos = filter_by_search(todos, &query.search);
    let mut todos = filter_by_category(todos, query.category_id.as_deref());
    sort_todos(&mut todos, query.sort_by, query.sort_order);
    paginate(todos, query.page, query.limit)
}

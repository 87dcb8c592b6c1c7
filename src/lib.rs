//! HTTP service for todo-board.
//!
//! The router in [`api`] exposes the operations of [`todo_core`] as JSON
//! endpoints; [`config`] holds the command-line and environment settings.

pub mod api;
pub mod config;

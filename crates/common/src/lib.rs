//! Shared utilities, configuration, and error handling for the to-do API
//!
//! This crate provides common functionality used across the workspace:
//! - Configuration loaded from the environment (12-factor style)
//! - The shared error type and its HTTP rendering
//! - Request extractors for validated JSON bodies, query strings and cursor pagination

pub mod config;
pub mod db;
pub mod error;
pub mod extractors;

pub use config::{Config, LogFormat};
pub use db::conflict_on_unique;
pub use error::{Error, Result, GENERIC_ERROR_MESSAGE};
pub use extractors::{parse_path_id, CursorPagination, QueryParams, ValidatedJson};

//! Wayfinder Storage Layer
//!
//! SQLite persistence for the recent-locations log and saved workspaces.

mod database;
mod error;
mod migrations;

pub use database::Database;
pub use error::StorageError;

pub type Result<T> = std::result::Result<T, StorageError>;

//! Session error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Session not found: {0}")]
    NotFound(String),

    #[error("Storage error: {0}")]
    Storage(#[from] wayfinder_storage::StorageError),

    #[error("Tab error: {0}")]
    Tab(#[from] wayfinder_tabs::TabError),

    #[error("History error: {0}")]
    History(#[from] wayfinder_navigation::NavigationError),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Session name cannot be empty")]
    EmptyName,
}

//! Core error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Storage error: {0}")]
    Storage(#[from] wayfinder_storage::StorageError),

    #[error("Navigation error: {0}")]
    Navigation(#[from] wayfinder_navigation::NavigationError),

    #[error("Tab error: {0}")]
    Tab(#[from] wayfinder_tabs::TabError),

    #[error("Session error: {0}")]
    Session(#[from] wayfinder_session::SessionError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Target does not exist: {0}")]
    TargetNotFound(String),

    #[error("No active tab")]
    NoActiveTab,
}

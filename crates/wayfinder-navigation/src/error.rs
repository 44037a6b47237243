//! Navigation error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum NavigationError {
    #[error("History must contain at least one entry")]
    EmptyHistory,

    #[error("History index {index} out of range for {len} entries")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Storage error: {0}")]
    Storage(#[from] wayfinder_storage::StorageError),
}

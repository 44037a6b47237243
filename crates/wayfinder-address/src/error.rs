//! Address error types

use thiserror::Error;

/// Raised only by the strict validation pass. Resolution itself never fails.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AddressError {
    #[error("Archive address has no '|' delimiter: {0}")]
    MissingArchiveDelimiter(String),

    #[error("Archive address has more than one '|' delimiter: {0}")]
    MultipleArchiveDelimiters(String),

    #[error("Archive address has an empty container path: {0}")]
    EmptyArchivePath(String),

    #[error("Search address has an empty keyword: {0}")]
    EmptyKeyword(String),

    #[error("Library address has an empty id: {0}")]
    EmptyLibraryId(String),
}

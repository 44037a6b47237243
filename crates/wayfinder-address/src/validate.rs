//! Strict address validation
//!
//! Optional pass run before resolution when a caller wants to reject
//! addresses the resolver would otherwise silently normalize.

use crate::error::AddressError;
use crate::protocol::Protocol;
use crate::resolver::unescaped_delimiters;
use crate::Result;

pub fn validate_address(raw: &str) -> Result<()> {
    match Protocol::detect(raw) {
        Some((Protocol::Archive, payload)) => {
            let mut delimiters = unescaped_delimiters(payload);
            let first = delimiters
                .next()
                .ok_or_else(|| AddressError::MissingArchiveDelimiter(raw.to_string()))?;
            if delimiters.next().is_some() {
                return Err(AddressError::MultipleArchiveDelimiters(raw.to_string()));
            }
            if payload[..first].trim().is_empty() {
                return Err(AddressError::EmptyArchivePath(raw.to_string()));
            }
            Ok(())
        }
        Some((Protocol::Search | Protocol::ContentSearch, keyword)) if keyword.trim().is_empty() => {
            Err(AddressError::EmptyKeyword(raw.to_string()))
        }
        Some((Protocol::Library, library_id)) if library_id.trim().is_empty() => {
            Err(AddressError::EmptyLibraryId(raw.to_string()))
        }
        _ => Ok(()),
    }
}

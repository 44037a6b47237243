//! Address resolution
//!
//! Recognition order (prefixes compared case-insensitively):
//! 1. `content://` → content search
//! 2. `search://` → filename search
//! 3. `tag://` → tag view
//! 4. `library://` → library
//! 5. `zip://<archive>|<inner>` → archive, split on the last unescaped `|`
//! 6. anything else → local path, verbatim

use crate::location::Location;
use crate::protocol::{Protocol, ARCHIVE_DELIMITER};

#[derive(Debug, Clone, Copy, Default)]
pub struct AddressResolver;

impl AddressResolver {
    pub fn new() -> Self {
        Self
    }

    /// Resolve a raw address. Never fails and performs no I/O.
    pub fn resolve(&self, raw: &str) -> Location {
        let location = match Protocol::detect(raw) {
            Some((Protocol::ContentSearch, keyword)) => Location::content_search(keyword),
            Some((Protocol::Search, keyword)) => Location::search(keyword),
            Some((Protocol::Tag, tag_name)) => Location::tag(tag_name),
            Some((Protocol::Library, library_id)) => Location::library(library_id),
            Some((Protocol::Archive, payload)) => Self::resolve_archive(payload),
            None => Location::local(raw),
        };

        tracing::trace!(address = %raw, kind = %location.kind(), "Resolved address");

        location
    }

    fn resolve_archive(payload: &str) -> Location {
        match last_unescaped_delimiter(payload) {
            Some(idx) => Location::archive(
                &payload[..idx],
                &payload[idx + ARCHIVE_DELIMITER.len_utf8()..],
            ),
            // No delimiter: fall back to the archive root.
            None => Location::archive_root(payload),
        }
    }
}

/// Byte index of the last `|` not preceded by a backslash.
pub(crate) fn last_unescaped_delimiter(payload: &str) -> Option<usize> {
    unescaped_delimiters(payload).last()
}

pub(crate) fn unescaped_delimiters(payload: &str) -> impl Iterator<Item = usize> + '_ {
    let bytes = payload.as_bytes();
    payload
        .match_indices(ARCHIVE_DELIMITER)
        .map(|(idx, _)| idx)
        .filter(move |&idx| idx == 0 || bytes[idx - 1] != b'\\')
}

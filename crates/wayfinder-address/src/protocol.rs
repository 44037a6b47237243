//! Address protocol table
//!
//! The single source of truth for every scheme prefix. The resolver, the
//! breadcrumb builder and `Location::address` all read from here.

use serde::{Deserialize, Serialize};

use crate::path::SEPARATOR;

/// Separates the container path from the inner path in archive addresses.
pub const ARCHIVE_DELIMITER: char = '|';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Protocol {
    /// Full-text search over file contents
    ContentSearch,
    /// Filename search
    Search,
    /// Tag view (empty payload lists all tags)
    Tag,
    /// Library aggregation
    Library,
    /// Folder inside an archive container
    Archive,
}

impl Protocol {
    /// All protocols in recognition order.
    pub const ALL: [Protocol; 5] = [
        Protocol::ContentSearch,
        Protocol::Search,
        Protocol::Tag,
        Protocol::Library,
        Protocol::Archive,
    ];

    pub const fn prefix(self) -> &'static str {
        match self {
            Protocol::ContentSearch => "content://",
            Protocol::Search => "search://",
            Protocol::Tag => "tag://",
            Protocol::Library => "library://",
            Protocol::Archive => "zip://",
        }
    }

    /// Strip this protocol's prefix, ignoring ASCII case.
    pub fn strip<'a>(self, input: &'a str) -> Option<&'a str> {
        let prefix = self.prefix();
        let head = input.get(..prefix.len())?;
        if head.eq_ignore_ascii_case(prefix) {
            Some(&input[prefix.len()..])
        } else {
            None
        }
    }

    /// Find the first protocol (in recognition order) whose prefix starts `input`.
    pub fn detect(input: &str) -> Option<(Protocol, &str)> {
        Self::ALL
            .iter()
            .find_map(|protocol| protocol.strip(input).map(|rest| (*protocol, rest)))
    }

    /// Archive root address for a container file: `zip://<path>|`.
    pub fn archive_root_address(archive_file_path: &str) -> String {
        Self::archive_address(archive_file_path, "")
    }

    /// Trailing separators on the container path are dropped so the
    /// delimiter is never escaped.
    pub fn archive_address(archive_file_path: &str, inner_path: &str) -> String {
        format!(
            "{}{}{}{}",
            Protocol::Archive.prefix(),
            archive_file_path.trim_end_matches(SEPARATOR),
            ARCHIVE_DELIMITER,
            inner_path
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_is_case_insensitive() {
        let (protocol, rest) = Protocol::detect("SEARCH://report").unwrap();
        assert_eq!(protocol, Protocol::Search);
        assert_eq!(rest, "report");

        let (protocol, rest) = Protocol::detect("Zip://C:\\a.zip|x").unwrap();
        assert_eq!(protocol, Protocol::Archive);
        assert_eq!(rest, "C:\\a.zip|x");
    }

    #[test]
    fn test_detect_plain_path() {
        assert!(Protocol::detect("C:\\Users").is_none());
        assert!(Protocol::detect("tag:").is_none());
        assert!(Protocol::detect("").is_none());
    }

    #[test]
    fn test_prefixes_are_distinct() {
        for a in Protocol::ALL {
            for b in Protocol::ALL {
                if a != b {
                    assert!(!a.prefix().starts_with(b.prefix()));
                }
            }
        }
    }

    #[test]
    fn test_strip_does_not_split_multibyte_chars() {
        assert!(Protocol::Tag.strip("tä").is_none());
        assert!(Protocol::Tag.strip("タグ://x").is_none());
    }

    #[test]
    fn test_archive_address_trims_container_separator() {
        assert_eq!(
            Protocol::archive_address("C:\\a.zip\\", "dir"),
            "zip://C:\\a.zip|dir"
        );
        assert_eq!(Protocol::archive_root_address("C:\\a.zip\\\\"), "zip://C:\\a.zip|");
    }
}

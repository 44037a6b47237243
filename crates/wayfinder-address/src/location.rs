//! Typed navigation targets

use serde::{Deserialize, Serialize};

use crate::path::SEPARATOR;
use crate::protocol::Protocol;

/// A resolved, re-navigable location.
///
/// Locations are never converted in place: moving between kinds always goes
/// through resolving a new address string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Location {
    Local {
        path: String,
    },
    /// `inner_path` is empty at the archive root.
    Archive {
        archive_file_path: String,
        inner_path: String,
    },
    Search {
        keyword: String,
    },
    ContentSearch {
        keyword: String,
    },
    /// An empty `tag_name` is the all-tags view.
    Tag {
        tag_name: String,
    },
    Library {
        library_id: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationKind {
    Local,
    Archive,
    Search,
    ContentSearch,
    Tag,
    Library,
}

impl Location {
    pub fn local(path: impl Into<String>) -> Self {
        Location::Local { path: path.into() }
    }

    /// Trailing separators on the container path are dropped; a `\` right
    /// before the delimiter would escape it.
    pub fn archive(archive_file_path: impl Into<String>, inner_path: impl Into<String>) -> Self {
        let mut archive_file_path = archive_file_path.into();
        let trimmed = archive_file_path.trim_end_matches(SEPARATOR).len();
        archive_file_path.truncate(trimmed);

        Location::Archive {
            archive_file_path,
            inner_path: inner_path.into(),
        }
    }

    pub fn archive_root(archive_file_path: impl Into<String>) -> Self {
        Self::archive(archive_file_path, String::new())
    }

    pub fn search(keyword: impl Into<String>) -> Self {
        Location::Search {
            keyword: keyword.into(),
        }
    }

    pub fn content_search(keyword: impl Into<String>) -> Self {
        Location::ContentSearch {
            keyword: keyword.into(),
        }
    }

    pub fn tag(tag_name: impl Into<String>) -> Self {
        Location::Tag {
            tag_name: tag_name.into(),
        }
    }

    pub fn all_tags() -> Self {
        Self::tag(String::new())
    }

    pub fn library(library_id: impl Into<String>) -> Self {
        Location::Library {
            library_id: library_id.into(),
        }
    }

    pub fn kind(&self) -> LocationKind {
        match self {
            Location::Local { .. } => LocationKind::Local,
            Location::Archive { .. } => LocationKind::Archive,
            Location::Search { .. } => LocationKind::Search,
            Location::ContentSearch { .. } => LocationKind::ContentSearch,
            Location::Tag { .. } => LocationKind::Tag,
            Location::Library { .. } => LocationKind::Library,
        }
    }

    /// Canonical address string. Resolving it yields an equal location.
    pub fn address(&self) -> String {
        match self {
            Location::Local { path } => path.clone(),
            Location::Archive {
                archive_file_path,
                inner_path,
            } => Protocol::archive_address(archive_file_path, inner_path),
            Location::Search { keyword } => format!("{}{}", Protocol::Search.prefix(), keyword),
            Location::ContentSearch { keyword } => {
                format!("{}{}", Protocol::ContentSearch.prefix(), keyword)
            }
            Location::Tag { tag_name } => format!("{}{}", Protocol::Tag.prefix(), tag_name),
            Location::Library { library_id } => {
                format!("{}{}", Protocol::Library.prefix(), library_id)
            }
        }
    }

    /// Views with no filesystem parent: searches, tags and libraries.
    pub fn is_virtual(&self) -> bool {
        self.kind().is_virtual()
    }

    pub fn is_archive_root(&self) -> bool {
        matches!(self, Location::Archive { inner_path, .. } if inner_path.is_empty())
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.address())
    }
}

impl LocationKind {
    pub fn is_virtual(&self) -> bool {
        matches!(
            self,
            LocationKind::Search
                | LocationKind::ContentSearch
                | LocationKind::Tag
                | LocationKind::Library
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LocationKind::Local => "local",
            LocationKind::Archive => "archive",
            LocationKind::Search => "search",
            LocationKind::ContentSearch => "content_search",
            LocationKind::Tag => "tag",
            LocationKind::Library => "library",
        }
    }
}

impl std::fmt::Display for LocationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for LocationKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "local" => Ok(LocationKind::Local),
            "archive" => Ok(LocationKind::Archive),
            "search" => Ok(LocationKind::Search),
            "content_search" => Ok(LocationKind::ContentSearch),
            "tag" => Ok(LocationKind::Tag),
            "library" => Ok(LocationKind::Library),
            _ => Err(format!("Unknown location kind: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_addresses() {
        assert_eq!(Location::local("C:\\Data").address(), "C:\\Data");
        assert_eq!(
            Location::archive("C:\\a.zip", "docs/x").address(),
            "zip://C:\\a.zip|docs/x"
        );
        assert_eq!(Location::archive_root("C:\\a.zip").address(), "zip://C:\\a.zip|");
        assert_eq!(Location::search("q").address(), "search://q");
        assert_eq!(Location::content_search("q").address(), "content://q");
        assert_eq!(Location::all_tags().address(), "tag://");
        assert_eq!(Location::library("music").address(), "library://music");
    }

    #[test]
    fn test_virtual_kinds() {
        assert!(!Location::local("C:\\").is_virtual());
        assert!(!Location::archive_root("C:\\a.zip").is_virtual());
        assert!(Location::search("q").is_virtual());
        assert!(Location::tag("red").is_virtual());
        assert!(Location::library("docs").is_virtual());
    }

    #[test]
    fn test_kind_string_roundtrip() {
        for kind in [
            LocationKind::Local,
            LocationKind::Archive,
            LocationKind::Search,
            LocationKind::ContentSearch,
            LocationKind::Tag,
            LocationKind::Library,
        ] {
            assert_eq!(kind.as_str().parse::<LocationKind>().unwrap(), kind);
        }
        assert!("folder".parse::<LocationKind>().is_err());
    }

    #[test]
    fn test_serde_tagging() {
        let json = serde_json::to_string(&Location::tag("red")).unwrap();
        assert_eq!(json, r#"{"kind":"tag","tag_name":"red"}"#);
    }
}

//! Breadcrumb trails
//!
//! Local and archive locations decompose into one clickable segment per path
//! token. Virtual views (searches, tags, libraries) render as a single badge.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::location::Location;
use crate::path::{split_components, split_path, SEPARATOR};
use crate::protocol::Protocol;

/// Joiner placed between rendered segments. Display only.
pub const DISPLAY_SEPARATOR: &str = " \\ ";

const ELISION_MARKER: &str = "…";
const ALL_TAGS_LABEL: &str = "All tags";

/// One clickable unit of a breadcrumb trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub display_text: String,
    pub navigable_address: String,
    /// The currently open segment. Clicking it enters edit mode.
    pub is_terminal: bool,
}

impl Segment {
    fn new(display_text: impl Into<String>, navigable_address: impl Into<String>) -> Self {
        Self {
            display_text: display_text.into(),
            navigable_address: navigable_address.into(),
            is_terminal: false,
        }
    }
}

/// How a trail should be laid out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "layout", rename_all = "snake_case")]
pub enum BreadcrumbLayout {
    Full {
        segments: Vec<Segment>,
    },
    /// Root on the left, right-aligned tail, everything between elided.
    Elided {
        head: Vec<Segment>,
        tail: Vec<Segment>,
    },
}

impl BreadcrumbLayout {
    pub fn is_elided(&self) -> bool {
        matches!(self, BreadcrumbLayout::Elided { .. })
    }

    /// Segments in display order, skipping the elided middle.
    pub fn visible_segments(&self) -> impl Iterator<Item = &Segment> {
        let (first, second): (&[Segment], &[Segment]) = match self {
            BreadcrumbLayout::Full { segments } => (segments.as_slice(), [].as_slice()),
            BreadcrumbLayout::Elided { head, tail } => (head.as_slice(), tail.as_slice()),
        };
        first.iter().chain(second.iter())
    }

    pub fn terminal(&self) -> Option<&Segment> {
        self.visible_segments().find(|s| s.is_terminal)
    }

    /// Plain-text rendering, e.g. `C: \ Users \ me` or `C: … f \ g`.
    pub fn render(&self) -> String {
        let join = |segments: &[Segment]| {
            segments
                .iter()
                .map(|s| s.display_text.as_str())
                .collect::<Vec<_>>()
                .join(DISPLAY_SEPARATOR)
        };

        match self {
            BreadcrumbLayout::Full { segments } => join(segments.as_slice()),
            BreadcrumbLayout::Elided { head, tail } => {
                format!(
                    "{} {} {}",
                    join(head.as_slice()),
                    ELISION_MARKER,
                    join(tail.as_slice())
                )
            }
        }
    }
}

/// Resolves library ids to display names for the library badge.
pub trait LibraryCatalog {
    fn display_name(&self, library_id: &str) -> Option<String>;
}

impl LibraryCatalog for HashMap<String, String> {
    fn display_name(&self, library_id: &str) -> Option<String> {
        self.get(library_id).cloned()
    }
}

struct NoCatalog;

impl LibraryCatalog for NoCatalog {
    fn display_name(&self, _library_id: &str) -> Option<String> {
        None
    }
}

#[derive(Debug, Clone, Copy)]
pub struct BreadcrumbBuilder {
    elision_threshold: usize,
    elision_tail: usize,
}

impl BreadcrumbBuilder {
    pub const DEFAULT_ELISION_THRESHOLD: usize = 10;
    pub const DEFAULT_ELISION_TAIL: usize = 6;

    pub fn new() -> Self {
        Self::with_elision(Self::DEFAULT_ELISION_THRESHOLD, Self::DEFAULT_ELISION_TAIL)
    }

    /// Elide once the token count exceeds `threshold`, keeping `tail` tokens.
    pub fn with_elision(threshold: usize, tail: usize) -> Self {
        Self {
            elision_threshold: threshold,
            elision_tail: tail.max(1),
        }
    }

    pub fn build(&self, location: &Location) -> Vec<Segment> {
        self.build_with(location, &NoCatalog)
    }

    pub fn build_with(&self, location: &Location, catalog: &dyn LibraryCatalog) -> Vec<Segment> {
        let mut segments = match location {
            Location::Local { path } => local_segments(path),
            Location::Archive {
                archive_file_path,
                inner_path,
            } => archive_segments(archive_file_path, inner_path),
            Location::Search { keyword } | Location::ContentSearch { keyword } => {
                vec![Segment::new(keyword.as_str(), location.address())]
            }
            Location::Tag { tag_name } => {
                let label = if tag_name.is_empty() {
                    ALL_TAGS_LABEL
                } else {
                    tag_name.as_str()
                };
                vec![Segment::new(label, location.address())]
            }
            Location::Library { library_id } => {
                let label = catalog
                    .display_name(library_id)
                    .unwrap_or_else(|| library_id.clone());
                vec![Segment::new(label, location.address())]
            }
        };

        if let Some(last) = segments.last_mut() {
            last.is_terminal = true;
        }

        segments
    }

    pub fn layout(&self, location: &Location) -> BreadcrumbLayout {
        self.layout_with(location, &NoCatalog)
    }

    pub fn layout_with(
        &self,
        location: &Location,
        catalog: &dyn LibraryCatalog,
    ) -> BreadcrumbLayout {
        self.split(self.build_with(location, catalog))
    }

    /// Split a built trail into head and tail once it is too long to show whole.
    pub fn split(&self, mut segments: Vec<Segment>) -> BreadcrumbLayout {
        if segments.len() <= self.elision_threshold || segments.len() <= self.elision_tail + 1 {
            return BreadcrumbLayout::Full { segments };
        }

        let tail = segments.split_off(segments.len() - self.elision_tail);
        segments.truncate(1);

        BreadcrumbLayout::Elided {
            head: segments,
            tail,
        }
    }
}

impl Default for BreadcrumbBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn local_segments(path: &str) -> Vec<Segment> {
    let split = split_path(path);
    let mut segments = Vec::with_capacity(split.token_count());

    if let (Some((_, root)), Some(address)) = (split.root, split.root_address()) {
        segments.push(Segment::new(root.text, address));
    }

    for token in &split.components {
        segments.push(Segment::new(token.text, &path[..token.end]));
    }

    segments
}

fn archive_segments(archive_file_path: &str, inner_path: &str) -> Vec<Segment> {
    let mut segments = local_segments(archive_file_path);

    // Clicking the container enters it instead of revealing it in its folder.
    if let Some(container) = segments.last_mut() {
        container.navigable_address = Protocol::archive_root_address(archive_file_path);
    }

    for token in split_components(inner_path, 0, &['/', SEPARATOR]) {
        segments.push(Segment::new(
            token.text,
            Protocol::archive_address(archive_file_path, &inner_path[..token.end]),
        ));
    }

    segments
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::AddressResolver;

    fn addresses(segments: &[Segment]) -> Vec<&str> {
        segments
            .iter()
            .map(|s| s.navigable_address.as_str())
            .collect()
    }

    fn rejoin(segments: &[Segment]) -> String {
        segments
            .iter()
            .map(|s| s.display_text.as_str())
            .collect::<Vec<_>>()
            .join(&SEPARATOR.to_string())
    }

    #[test]
    fn test_local_segments() {
        let segments = BreadcrumbBuilder::new().build(&Location::local("C:\\Users\\me\\Music"));

        assert_eq!(
            addresses(&segments),
            vec!["C:\\", "C:\\Users", "C:\\Users\\me", "C:\\Users\\me\\Music"]
        );
        assert_eq!(segments[0].display_text, "C:");
        assert!(segments[3].is_terminal);
        assert!(segments[..3].iter().all(|s| !s.is_terminal));
    }

    #[test]
    fn test_unc_root_absorbs_share() {
        let segments =
            BreadcrumbBuilder::new().build(&Location::local("\\\\nas\\media\\photos"));

        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].display_text, "\\\\nas\\media");
        assert_eq!(segments[0].navigable_address, "\\\\nas\\media");
        assert_eq!(segments[1].navigable_address, "\\\\nas\\media\\photos");
    }

    #[test]
    fn test_local_roundtrip() {
        let resolver = AddressResolver::new();
        let builder = BreadcrumbBuilder::new();

        for path in [
            "C:\\Users\\me\\Documents",
            "D:",
            "C:\\",
            "\\Windows\\System32",
            "\\\\server\\share\\dir\\file",
            "relative\\path\\here",
            "single",
        ] {
            let segments = builder.build(&resolver.resolve(path));
            assert_eq!(rejoin(&segments), path);
        }
    }

    #[test]
    fn test_bare_and_driveless_roots() {
        let builder = BreadcrumbBuilder::new();

        let segments = builder.build(&Location::local("C:\\"));
        assert_eq!(addresses(&segments), vec!["C:\\"]);
        assert!(segments[0].is_terminal);

        let segments = builder.build(&Location::local("\\Windows\\System32"));
        assert_eq!(
            addresses(&segments),
            vec!["\\", "\\Windows", "\\Windows\\System32"]
        );
        assert_eq!(segments[0].display_text, "");
    }

    #[test]
    fn test_archive_segments() {
        let location = Location::archive("C:\\Downloads\\data.zip", "folder\\sub");
        let segments = BreadcrumbBuilder::new().build(&location);

        assert_eq!(
            addresses(&segments),
            vec![
                "C:\\",
                "C:\\Downloads",
                "zip://C:\\Downloads\\data.zip|",
                "zip://C:\\Downloads\\data.zip|folder",
                "zip://C:\\Downloads\\data.zip|folder\\sub",
            ]
        );
        assert_eq!(segments[2].display_text, "data.zip");
        assert!(segments[4].is_terminal);
    }

    #[test]
    fn test_archive_root_container_is_terminal() {
        let segments =
            BreadcrumbBuilder::new().build(&Location::archive_root("C:\\Data\\a.zip"));

        assert_eq!(segments.len(), 3);
        assert_eq!(segments[2].navigable_address, "zip://C:\\Data\\a.zip|");
        assert!(segments[2].is_terminal);
    }

    #[test]
    fn test_archive_inner_accepts_both_separators() {
        let location = Location::archive("C:\\a.zip", "x/y\\z");
        let segments = BreadcrumbBuilder::new().build(&location);

        let inner: Vec<_> = segments[2..].iter().map(|s| s.display_text.as_str()).collect();
        assert_eq!(inner, vec!["x", "y", "z"]);
        assert_eq!(segments[3].navigable_address, "zip://C:\\a.zip|x/y");
    }

    #[test]
    fn test_virtual_views_are_single_badges() {
        let builder = BreadcrumbBuilder::new();

        for (location, label) in [
            (Location::search("annual report"), "annual report"),
            (Location::content_search("C:\\not\\split"), "C:\\not\\split"),
            (Location::tag("red"), "red"),
            (Location::all_tags(), "All tags"),
            (Location::library("lib-7"), "lib-7"),
        ] {
            let segments = builder.build(&location);
            assert_eq!(segments.len(), 1);
            assert_eq!(segments[0].display_text, label);
            assert_eq!(segments[0].navigable_address, location.address());
            assert!(segments[0].is_terminal);
        }
    }

    #[test]
    fn test_library_badge_uses_catalog() {
        let mut names = HashMap::new();
        names.insert("lib-7".to_string(), "Music".to_string());

        let segments = BreadcrumbBuilder::new().build_with(&Location::library("lib-7"), &names);
        assert_eq!(segments[0].display_text, "Music");
        assert_eq!(segments[0].navigable_address, "library://lib-7");
    }

    #[test]
    fn test_long_path_elision() {
        let location = Location::local("C:\\a\\b\\c\\d\\e\\f\\g\\h\\i\\j\\k");
        let layout = BreadcrumbBuilder::new().layout(&location);

        match &layout {
            BreadcrumbLayout::Elided { head, tail } => {
                assert_eq!(head.len(), 1);
                assert_eq!(head[0].display_text, "C:");
                assert_eq!(tail.len(), 6);
                assert_eq!(tail[0].display_text, "f");
                assert!(tail[5].is_terminal);
            }
            BreadcrumbLayout::Full { .. } => panic!("Expected elided layout"),
        }
        assert_eq!(layout.render(), "C: … f \\ g \\ h \\ i \\ j \\ k");
    }

    #[test]
    fn test_short_path_is_not_elided() {
        let layout = BreadcrumbBuilder::new().layout(&Location::local("C:\\a\\b\\c\\d\\e\\f\\g\\h\\i"));
        assert!(!layout.is_elided());
        assert_eq!(layout.visible_segments().count(), 10);
        assert_eq!(layout.terminal().unwrap().display_text, "i");
    }

    #[test]
    fn test_archive_elision_counts_inner_tokens() {
        let location = Location::archive("C:\\x\\y\\a.zip", "1/2/3/4/5/6/7");
        let layout = BreadcrumbBuilder::new().layout(&location);
        assert!(layout.is_elided());
    }
}

//! Up-navigation
//!
//! Inside an archive, "up" walks out one inner folder at a time and only
//! leaves the container once the archive root is reached.

use crate::location::Location;
use crate::path::{parent_of, SEPARATOR};

const INNER_SEPARATORS: [char; 2] = ['/', SEPARATOR];

#[derive(Debug, Clone, Copy, Default)]
pub struct UpNavigator;

impl UpNavigator {
    pub fn new() -> Self {
        Self
    }

    /// Parent of `location`, or `None` when "up" should be disabled.
    ///
    /// `dir_exists` is consulted only when leaving to a local directory.
    pub fn up<F>(&self, location: &Location, dir_exists: F) -> Option<Location>
    where
        F: Fn(&str) -> bool,
    {
        match location {
            Location::Local { path } => existing_parent(path, &dir_exists).map(Location::local),
            Location::Archive {
                archive_file_path,
                inner_path,
            } => {
                let inner = inner_path.trim_end_matches(INNER_SEPARATORS);
                if inner.is_empty() {
                    return existing_parent(archive_file_path, &dir_exists).map(Location::local);
                }

                let parent_inner = match inner.rfind(INNER_SEPARATORS) {
                    Some(idx) => inner[..idx].trim_end_matches(INNER_SEPARATORS),
                    None => "",
                };
                Some(Location::archive(archive_file_path.as_str(), parent_inner))
            }
            Location::Search { .. }
            | Location::ContentSearch { .. }
            | Location::Tag { .. }
            | Location::Library { .. } => None,
        }
    }

    pub fn can_go_up<F>(&self, location: &Location, dir_exists: F) -> bool
    where
        F: Fn(&str) -> bool,
    {
        self.up(location, dir_exists).is_some()
    }
}

fn existing_parent<F>(path: &str, dir_exists: &F) -> Option<String>
where
    F: Fn(&str) -> bool,
{
    parent_of(path).filter(|parent| !parent.is_empty() && dir_exists(parent))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::AddressResolver;

    fn always(_: &str) -> bool {
        true
    }

    fn never(_: &str) -> bool {
        false
    }

    #[test]
    fn test_local_up() {
        let up = UpNavigator::new();
        assert_eq!(
            up.up(&Location::local("C:\\a\\b"), always),
            Some(Location::local("C:\\a"))
        );
        assert_eq!(
            up.up(&Location::local("C:\\a"), always),
            Some(Location::local("C:\\"))
        );
        assert_eq!(up.up(&Location::local("C:\\"), always), None);
        assert_eq!(up.up(&Location::local("\\\\srv\\share"), always), None);
    }

    #[test]
    fn test_local_up_requires_existing_parent() {
        let up = UpNavigator::new();
        assert_eq!(up.up(&Location::local("C:\\gone\\child"), never), None);

        let only_c = |p: &str| p == "C:\\";
        assert_eq!(
            up.up(&Location::local("C:\\a"), only_c),
            Some(Location::local("C:\\"))
        );
    }

    #[test]
    fn test_archive_walks_out_one_level_at_a_time() {
        let resolver = AddressResolver::new();
        let up = UpNavigator::new();

        let location = resolver.resolve("zip://C:\\Data\\archive.zip|docs/readme.txt");
        assert_eq!(
            location,
            Location::archive("C:\\Data\\archive.zip", "docs/readme.txt")
        );

        let location = up.up(&location, always).unwrap();
        assert_eq!(location, Location::archive("C:\\Data\\archive.zip", "docs"));

        let location = up.up(&location, always).unwrap();
        assert!(location.is_archive_root());

        let location = up.up(&location, |p: &str| p == "C:\\Data").unwrap();
        assert_eq!(location, Location::local("C:\\Data"));
    }

    #[test]
    fn test_archive_inner_pop_never_depends_on_oracle() {
        let up = UpNavigator::new();
        let location = Location::archive("C:\\a.zip", "x\\y");
        assert_eq!(up.up(&location, never), Some(Location::archive("C:\\a.zip", "x")));
        assert_eq!(
            up.up(&Location::archive("C:\\a.zip", "x/"), never),
            Some(Location::archive_root("C:\\a.zip"))
        );
    }

    #[test]
    fn test_archive_root_with_missing_parent() {
        let up = UpNavigator::new();
        assert_eq!(up.up(&Location::archive_root("C:\\Data\\a.zip"), never), None);
        assert_eq!(up.up(&Location::archive_root("a.zip"), always), None);
    }

    #[test]
    fn test_depth_plus_one_ups_leave_the_archive() {
        let up = UpNavigator::new();
        let inner = "one/two\\three/four";
        let depth = inner.split(['/', '\\']).count();

        let mut location = Location::archive("D:\\backups\\set.zip", inner);
        for _ in 0..depth {
            location = up.up(&location, always).unwrap();
            assert_eq!(location.kind(), crate::LocationKind::Archive);
        }
        assert!(location.is_archive_root());

        location = up.up(&location, always).unwrap();
        assert_eq!(location, Location::local("D:\\backups"));
    }

    #[test]
    fn test_virtual_views_have_no_parent() {
        let up = UpNavigator::new();
        for location in [
            Location::search("x"),
            Location::content_search("x"),
            Location::tag("x"),
            Location::all_tags(),
            Location::library("x"),
        ] {
            assert!(!up.can_go_up(&location, always));
        }
    }
}

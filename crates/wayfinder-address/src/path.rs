//! Windows-style path tokenizing
//!
//! Paths are treated as opaque text. Tokens are slices of the original string,
//! so the address of any prefix is just `&path[..token.end]`.

/// Separator between local path components.
pub const SEPARATOR: char = '\\';

const UNC_PREFIX: &str = "\\\\";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Token<'a> {
    pub text: &'a str,
    /// Byte offset just past this token in the source path.
    pub end: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RootKind {
    /// `X:`
    Drive,
    /// `\\server\share`
    Unc,
    /// Leading `\` with no drive
    Rooted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SplitPath<'a> {
    pub root: Option<(RootKind, Token<'a>)>,
    pub components: Vec<Token<'a>>,
}

impl<'a> SplitPath<'a> {
    pub fn token_count(&self) -> usize {
        self.components.len() + usize::from(self.root.is_some())
    }

    /// Address a click on the root token navigates to.
    pub fn root_address(&self) -> Option<String> {
        self.root.map(|(kind, token)| match kind {
            RootKind::Drive => format!("{}{}", &token.text[..2], SEPARATOR),
            RootKind::Unc => token.text.to_string(),
            RootKind::Rooted => SEPARATOR.to_string(),
        })
    }

    /// All tokens in order, root first.
    pub fn tokens(&self) -> impl Iterator<Item = Token<'a>> + '_ {
        self.root
            .iter()
            .map(|(_, token)| *token)
            .chain(self.components.iter().copied())
    }
}

/// Split a local path into its root token and remaining components.
///
/// Empty components (doubled or trailing separators) are skipped.
pub(crate) fn split_path(path: &str) -> SplitPath<'_> {
    let (root, rest_start) = detect_root(path);
    SplitPath {
        root,
        components: split_components(path, rest_start, &[SEPARATOR]),
    }
}

/// Split `text[start..]` on any of `separators`, keeping absolute offsets.
pub(crate) fn split_components<'a>(
    text: &'a str,
    start: usize,
    separators: &[char],
) -> Vec<Token<'a>> {
    let mut tokens = Vec::new();
    let mut token_start = start;

    for (idx, ch) in text[start..].char_indices() {
        let idx = start + idx;
        if separators.contains(&ch) {
            if idx > token_start {
                tokens.push(Token {
                    text: &text[token_start..idx],
                    end: idx,
                });
            }
            token_start = idx + ch.len_utf8();
        }
    }

    if text.len() > token_start {
        tokens.push(Token {
            text: &text[token_start..],
            end: text.len(),
        });
    }

    tokens
}

fn detect_root(path: &str) -> (Option<(RootKind, Token<'_>)>, usize) {
    if let Some(after_prefix) = path.strip_prefix(UNC_PREFIX) {
        // The root absorbs the server and the share name.
        let offset = UNC_PREFIX.len();
        let mut parts = split_components(path, offset, &[SEPARATOR]).into_iter();
        return match (parts.next(), parts.next()) {
            (Some(_server), Some(share)) => (
                Some((
                    RootKind::Unc,
                    Token {
                        text: &path[..share.end],
                        end: share.end,
                    },
                )),
                share.end,
            ),
            (Some(server), None) => (
                Some((
                    RootKind::Unc,
                    Token {
                        text: &path[..server.end],
                        end: server.end,
                    },
                )),
                server.end,
            ),
            _ if after_prefix.is_empty() => (None, path.len()),
            _ => (None, offset),
        };
    }

    // A bare root keeps its separator so the token alone rejoins to the path.
    let bytes = path.as_bytes();
    if bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':' {
        let end = if path.len() == 3 && bytes[2] == b'\\' { 3 } else { 2 };
        return (
            Some((
                RootKind::Drive,
                Token {
                    text: &path[..end],
                    end,
                },
            )),
            end,
        );
    }

    if path.starts_with(SEPARATOR) {
        let end = if path.len() == 1 { 1 } else { 0 };
        return (
            Some((
                RootKind::Rooted,
                Token {
                    text: &path[..end],
                    end,
                },
            )),
            1,
        );
    }

    (None, 0)
}

/// Parent directory of a local path, or `None` at a drive/UNC root.
pub fn parent_of(path: &str) -> Option<String> {
    let split = split_path(path);
    match split.components.len() {
        0 => None,
        1 => split.root_address(),
        n => Some(path[..split.components[n - 2].end].to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(split: &SplitPath<'_>) -> Vec<String> {
        split.tokens().map(|t| t.text.to_string()).collect()
    }

    #[test]
    fn test_split_drive_path() {
        let split = split_path("C:\\Users\\me\\Documents");
        assert_eq!(split.root.map(|(k, _)| k), Some(RootKind::Drive));
        assert_eq!(texts(&split), vec!["C:", "Users", "me", "Documents"]);
        assert_eq!(split.root_address().as_deref(), Some("C:\\"));
        assert_eq!(split.components[1].end, "C:\\Users\\me".len());
    }

    #[test]
    fn test_split_unc_path() {
        let split = split_path("\\\\server\\share\\team\\notes");
        assert_eq!(split.root.map(|(k, _)| k), Some(RootKind::Unc));
        assert_eq!(texts(&split), vec!["\\\\server\\share", "team", "notes"]);
        assert_eq!(split.root_address().as_deref(), Some("\\\\server\\share"));
    }

    #[test]
    fn test_split_relative_path() {
        let split = split_path("projects\\wayfinder");
        assert!(split.root.is_none());
        assert_eq!(texts(&split), vec!["projects", "wayfinder"]);
        assert_eq!(split.token_count(), 2);
    }

    #[test]
    fn test_split_skips_empty_components() {
        let split = split_path("C:\\a\\\\b\\");
        assert_eq!(texts(&split), vec!["C:", "a", "b"]);
    }

    #[test]
    fn test_split_bare_roots() {
        let split = split_path("C:\\");
        assert_eq!(texts(&split), vec!["C:\\"]);
        assert_eq!(split.root_address().as_deref(), Some("C:\\"));

        let split = split_path("\\Windows\\System32");
        assert_eq!(split.root.map(|(k, _)| k), Some(RootKind::Rooted));
        assert_eq!(texts(&split), vec!["", "Windows", "System32"]);
        assert_eq!(split.root_address().as_deref(), Some("\\"));
        assert_eq!(split.components[0].end, "\\Windows".len());

        assert_eq!(texts(&split_path("\\")), vec!["\\"]);
    }

    #[test]
    fn test_parent_of() {
        assert_eq!(parent_of("C:\\a\\b").as_deref(), Some("C:\\a"));
        assert_eq!(parent_of("C:\\a").as_deref(), Some("C:\\"));
        assert_eq!(parent_of("C:\\"), None);
        assert_eq!(parent_of("C:"), None);
        assert_eq!(
            parent_of("\\\\srv\\share\\x").as_deref(),
            Some("\\\\srv\\share")
        );
        assert_eq!(parent_of("\\\\srv\\share"), None);
        assert_eq!(parent_of("a\\b").as_deref(), Some("a"));
        assert_eq!(parent_of("a"), None);
        assert_eq!(parent_of("\\Windows\\System32").as_deref(), Some("\\Windows"));
        assert_eq!(parent_of("\\Windows").as_deref(), Some("\\"));
        assert_eq!(parent_of("\\"), None);
        assert_eq!(parent_of(""), None);
    }
}

//! Navigation requests

use serde::{Deserialize, Serialize};
use wayfinder_address::Location;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClickKind {
    #[default]
    Left,
    Middle,
    CtrlLeft,
}

impl ClickKind {
    /// Middle and Ctrl+Left always ask for a new tab.
    pub fn wants_new_tab(&self) -> bool {
        matches!(self, ClickKind::Middle | ClickKind::CtrlLeft)
    }
}

/// UI surface a navigation came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavigationSource {
    Drive,
    Favorite,
    Library,
    Breadcrumb,
    AddressBar,
    FileList,
    TagView,
    History,
    Up,
}

impl NavigationSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            NavigationSource::Drive => "drive",
            NavigationSource::Favorite => "favorite",
            NavigationSource::Library => "library",
            NavigationSource::Breadcrumb => "breadcrumb",
            NavigationSource::AddressBar => "address_bar",
            NavigationSource::FileList => "file_list",
            NavigationSource::TagView => "tag_view",
            NavigationSource::History => "history",
            NavigationSource::Up => "up",
        }
    }
}

impl std::fmt::Display for NavigationSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationRequest {
    pub target: Location,
    pub source: NavigationSource,
    pub click_kind: ClickKind,
}

impl NavigationRequest {
    /// A plain left-click request.
    pub fn new(target: Location, source: NavigationSource) -> Self {
        Self {
            target,
            source,
            click_kind: ClickKind::Left,
        }
    }

    pub fn with_click(mut self, click_kind: ClickKind) -> Self {
        self.click_kind = click_kind;
        self
    }
}

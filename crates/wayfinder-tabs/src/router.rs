//! Tab affinity routing
//!
//! 1. Middle / Ctrl+Left → open a new tab
//! 2. A tab already bound to the target → switch to it
//! 3. Active tab of the same kind → navigate it in place
//! 4. Otherwise → open a new tab
//!
//! Regular files never reach the router; callers open those with the default
//! handler instead.

use serde::{Deserialize, Serialize};

use crate::request::NavigationRequest;
use crate::tab::{Tab, TabBinding, TabKind};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "tab_id", rename_all = "snake_case")]
pub enum RoutingDecision {
    ReuseCurrent,
    SwitchTo(String),
    OpenNew,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TabAffinityRouter;

impl TabAffinityRouter {
    pub fn new() -> Self {
        Self
    }

    /// Route `request` against a snapshot of the open tabs. Never fails.
    pub fn route(
        &self,
        request: &NavigationRequest,
        open_tabs: &[Tab],
        active_tab_id: Option<&str>,
    ) -> RoutingDecision {
        let decision = self.decide(request, open_tabs, active_tab_id);

        tracing::debug!(
            target_address = %request.target,
            source = %request.source,
            click = ?request.click_kind,
            decision = ?decision,
            "Routed navigation"
        );

        decision
    }

    fn decide(
        &self,
        request: &NavigationRequest,
        open_tabs: &[Tab],
        active_tab_id: Option<&str>,
    ) -> RoutingDecision {
        if request.click_kind.wants_new_tab() {
            return RoutingDecision::OpenNew;
        }

        let target = TabBinding::for_location(&request.target);
        let active = active_tab_id.and_then(|id| open_tabs.iter().find(|tab| tab.id == id));

        // Prefer the active tab when several tabs show the target.
        let bound = active
            .filter(|tab| tab.binding == target)
            .or_else(|| open_tabs.iter().find(|tab| tab.binding == target));
        if let Some(tab) = bound {
            return RoutingDecision::SwitchTo(tab.id.clone());
        }

        match active {
            Some(tab) if Self::same_kind(&tab.binding, &target) => RoutingDecision::ReuseCurrent,
            _ => RoutingDecision::OpenNew,
        }
    }

    /// Both path tabs, or both bound to the same library.
    fn same_kind(current: &TabBinding, target: &TabBinding) -> bool {
        match (current.kind(), target.kind()) {
            (TabKind::Path, TabKind::Path) => true,
            (TabKind::Library, TabKind::Library) => current == target,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::{ClickKind, NavigationSource};
    use wayfinder_address::Location;

    fn tabs() -> Vec<Tab> {
        vec![
            Tab::with_id("projects", &Location::local("C:\\Projects")).unwrap(),
            Tab::with_id("music", &Location::library("music")).unwrap(),
            Tab::with_id("search", &Location::search("invoice")).unwrap(),
        ]
    }

    fn left(target: Location) -> NavigationRequest {
        NavigationRequest::new(target, NavigationSource::FileList)
    }

    #[test]
    fn test_middle_click_always_opens_new() {
        let router = TabAffinityRouter::new();
        let request = left(Location::local("C:\\Projects")).with_click(ClickKind::Middle);

        assert_eq!(
            router.route(&request, &tabs(), Some("projects")),
            RoutingDecision::OpenNew
        );
    }

    #[test]
    fn test_ctrl_click_opens_new() {
        let router = TabAffinityRouter::new();
        let request = left(Location::local("D:\\")).with_click(ClickKind::CtrlLeft);

        assert_eq!(
            router.route(&request, &tabs(), Some("projects")),
            RoutingDecision::OpenNew
        );
    }

    #[test]
    fn test_switches_to_tab_bound_to_target() {
        let router = TabAffinityRouter::new();

        assert_eq!(
            router.route(&left(Location::local("C:\\Projects")), &tabs(), Some("search")),
            RoutingDecision::SwitchTo("projects".to_string())
        );
        assert_eq!(
            router.route(&left(Location::library("music")), &tabs(), Some("projects")),
            RoutingDecision::SwitchTo("music".to_string())
        );
        assert_eq!(
            router.route(&left(Location::search("invoice")), &tabs(), None),
            RoutingDecision::SwitchTo("search".to_string())
        );
    }

    #[test]
    fn test_prefers_active_tab_among_duplicates() {
        let router = TabAffinityRouter::new();
        let mut open = tabs();
        open.push(Tab::with_id("projects-2", &Location::local("C:\\Projects")).unwrap());

        assert_eq!(
            router.route(&left(Location::local("C:\\Projects")), &open, Some("projects-2")),
            RoutingDecision::SwitchTo("projects-2".to_string())
        );
    }

    #[test]
    fn test_reuses_active_path_tab() {
        let router = TabAffinityRouter::new();

        assert_eq!(
            router.route(&left(Location::local("C:\\Windows")), &tabs(), Some("projects")),
            RoutingDecision::ReuseCurrent
        );
        // Searches and tags live in path tabs too
        assert_eq!(
            router.route(&left(Location::tag("red")), &tabs(), Some("search")),
            RoutingDecision::ReuseCurrent
        );
    }

    #[test]
    fn test_kind_mismatch_opens_new() {
        let router = TabAffinityRouter::new();

        assert_eq!(
            router.route(&left(Location::library("video")), &tabs(), Some("projects")),
            RoutingDecision::OpenNew
        );
        assert_eq!(
            router.route(&left(Location::local("C:\\Windows")), &tabs(), Some("music")),
            RoutingDecision::OpenNew
        );
        assert_eq!(
            router.route(&left(Location::library("video")), &tabs(), Some("music")),
            RoutingDecision::OpenNew
        );
    }

    #[test]
    fn test_no_active_tab_opens_new() {
        let router = TabAffinityRouter::new();

        assert_eq!(
            router.route(&left(Location::local("E:\\")), &[], None),
            RoutingDecision::OpenNew
        );
        assert_eq!(
            router.route(&left(Location::local("E:\\")), &tabs(), Some("closed")),
            RoutingDecision::OpenNew
        );
    }
}

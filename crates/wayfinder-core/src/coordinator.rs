//! Navigation mode coordination
//!
//! The coordinator is the single entry point for a navigation: it resolves
//! the address, checks the target, consults the tab router, then updates the
//! pane history it is handed. It owns no tabs and no histories itself.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use wayfinder_address::{
    AddressResolver, BreadcrumbBuilder, BreadcrumbLayout, Location, UpNavigator,
};
use wayfinder_navigation::NavigationHistory;
use wayfinder_tabs::{NavigationRequest, RoutingDecision, Tab, TabAffinityRouter};

use crate::config::Config;
use crate::error::CoreError;
use crate::probe::FileSystemProbe;
use crate::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NavigationMode {
    Path,
    Library,
    Tag,
}

impl NavigationMode {
    /// Mode a location is shown in. Searches and archives belong to Path mode.
    pub fn of(location: &Location) -> Self {
        match location {
            Location::Library { .. } => NavigationMode::Library,
            Location::Tag { .. } => NavigationMode::Tag,
            _ => NavigationMode::Path,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            NavigationMode::Path => "path",
            NavigationMode::Library => "library",
            NavigationMode::Tag => "tag",
        }
    }
}

impl std::fmt::Display for NavigationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Everything the shell needs to render one pane.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    pub location: Location,
    pub address: String,
    pub mode: NavigationMode,
    pub breadcrumb: BreadcrumbLayout,
    pub can_back: bool,
    pub can_forward: bool,
    pub can_up: bool,
}

#[derive(Debug, Clone)]
pub enum NavigationOutcome {
    /// The active pane navigated in place
    Navigated(ViewState),
    /// Another tab already shows the target; bring it forward
    SwitchTo { tab_id: String },
    /// Open a new tab with this history, already showing the target
    OpenNew {
        view: ViewState,
        history: NavigationHistory,
    },
    /// The target is a regular file; hand it to the default handler
    OpenFile { path: String },
}

pub struct NavigationModeCoordinator {
    resolver: AddressResolver,
    breadcrumbs: BreadcrumbBuilder,
    up: UpNavigator,
    router: TabAffinityRouter,
    libraries: HashMap<String, String>,
    home_address: String,
    history_limit: usize,
    mode: NavigationMode,
}

impl NavigationModeCoordinator {
    pub fn new(config: &Config) -> Self {
        Self {
            resolver: AddressResolver::new(),
            breadcrumbs: config.breadcrumb_builder(),
            up: UpNavigator::new(),
            router: TabAffinityRouter::new(),
            libraries: HashMap::new(),
            home_address: config.home_address.clone(),
            history_limit: config.history_limit,
            mode: NavigationMode::Path,
        }
    }

    /// Current mode of the pane last shown.
    pub fn mode(&self) -> NavigationMode {
        self.mode
    }

    pub fn home_address(&self) -> &str {
        &self.home_address
    }

    /// Register a display name for the library badge.
    pub fn register_library(&mut self, library_id: impl Into<String>, name: impl Into<String>) {
        self.libraries.insert(library_id.into(), name.into());
    }

    pub fn resolve(&self, raw: &str) -> Location {
        self.resolver.resolve(raw)
    }

    /// Render `pane` and make its mode current.
    pub fn show(&mut self, pane: &NavigationHistory, probe: &dyn FileSystemProbe) -> ViewState {
        let view = self.view_of(pane, probe);
        if view.mode != self.mode {
            tracing::debug!(from = %self.mode, to = %view.mode, "Navigation mode changed");
            self.mode = view.mode;
        }
        view
    }

    /// Resolve, check and route one request against the open tabs.
    ///
    /// On `Navigated` the pane has already been pushed. On `OpenNew` the
    /// returned history belongs to the new tab and `pane` is untouched.
    pub fn navigate(
        &mut self,
        pane: &mut NavigationHistory,
        request: &NavigationRequest,
        open_tabs: &[Tab],
        active_tab_id: Option<&str>,
        probe: &dyn FileSystemProbe,
    ) -> Result<NavigationOutcome> {
        if let Some(path) = check_target(&request.target, probe)? {
            tracing::info!(path = %path, "Target is a file, opening with default handler");
            return Ok(NavigationOutcome::OpenFile { path });
        }

        let address = request.target.address();
        let outcome = match self.router.route(request, open_tabs, active_tab_id) {
            RoutingDecision::ReuseCurrent => {
                pane.push(address.as_str());
                NavigationOutcome::Navigated(self.show(pane, probe))
            }
            RoutingDecision::SwitchTo(tab_id) => NavigationOutcome::SwitchTo { tab_id },
            RoutingDecision::OpenNew => {
                let history = NavigationHistory::with_limit(address.as_str(), self.history_limit);
                let view = self.show(&history, probe);
                NavigationOutcome::OpenNew { view, history }
            }
        };

        tracing::info!(
            address = %address,
            source = %request.source,
            mode = %self.mode,
            "Navigation applied"
        );

        Ok(outcome)
    }

    pub fn go_back(
        &mut self,
        pane: &mut NavigationHistory,
        probe: &dyn FileSystemProbe,
    ) -> Option<ViewState> {
        pane.back()?;
        Some(self.show(pane, probe))
    }

    pub fn go_forward(
        &mut self,
        pane: &mut NavigationHistory,
        probe: &dyn FileSystemProbe,
    ) -> Option<ViewState> {
        pane.forward()?;
        Some(self.show(pane, probe))
    }

    /// Navigate the pane to its parent. `None` when up is disabled.
    pub fn go_up(
        &mut self,
        pane: &mut NavigationHistory,
        probe: &dyn FileSystemProbe,
    ) -> Option<ViewState> {
        let current = self.resolve(&pane.current().address);
        let parent = self.up.up(&current, |p| probe.dir_exists(p))?;
        pane.push(parent.address());
        Some(self.show(pane, probe))
    }

    /// Return to the last path location shown in the pane, or home.
    pub fn enter_path_mode(
        &mut self,
        pane: &mut NavigationHistory,
        probe: &dyn FileSystemProbe,
    ) -> ViewState {
        let current = self.resolve(&pane.current().address);
        if NavigationMode::of(&current) != NavigationMode::Path {
            let address = self
                .last_in_pane(pane, |location| !location.is_virtual())
                .unwrap_or_else(|| self.home_address.clone());
            pane.push(address);
        }
        self.show(pane, probe)
    }

    /// Show all tags, unless a tag view is already showing.
    pub fn enter_tag_mode(
        &mut self,
        pane: &mut NavigationHistory,
        probe: &dyn FileSystemProbe,
    ) -> ViewState {
        let current = self.resolve(&pane.current().address);
        if NavigationMode::of(&current) != NavigationMode::Tag {
            pane.push(Location::all_tags().address());
        }
        self.show(pane, probe)
    }

    pub fn enter_library_mode(
        &mut self,
        pane: &mut NavigationHistory,
        library_id: &str,
        probe: &dyn FileSystemProbe,
    ) -> Result<ViewState> {
        if library_id.trim().is_empty() {
            return Err(CoreError::Config("library id cannot be empty".to_string()));
        }
        pane.push(Location::library(library_id).address());
        Ok(self.show(pane, probe))
    }

    fn view_of(&self, pane: &NavigationHistory, probe: &dyn FileSystemProbe) -> ViewState {
        let location = self.resolve(&pane.current().address);

        ViewState {
            address: location.address(),
            mode: NavigationMode::of(&location),
            breadcrumb: self.breadcrumbs.layout_with(&location, &self.libraries),
            can_back: pane.can_back(),
            can_forward: pane.can_forward(),
            can_up: self.up.can_go_up(&location, |p| probe.dir_exists(p)),
            location,
        }
    }

    fn last_in_pane<F>(&self, pane: &NavigationHistory, accept: F) -> Option<String>
    where
        F: Fn(&Location) -> bool,
    {
        pane.back_entries()
            .find(|entry| accept(&self.resolve(&entry.address)))
            .map(|entry| entry.address.clone())
    }
}

/// `Some(path)` when a local target is a regular file.
fn check_target(location: &Location, probe: &dyn FileSystemProbe) -> Result<Option<String>> {
    match location {
        Location::Local { path } => {
            if probe.dir_exists(path) {
                Ok(None)
            } else if probe.file_exists(path) {
                Ok(Some(path.clone()))
            } else {
                Err(CoreError::TargetNotFound(path.clone()))
            }
        }
        Location::Archive {
            archive_file_path, ..
        } => {
            if probe.file_exists(archive_file_path) {
                Ok(None)
            } else {
                Err(CoreError::TargetNotFound(archive_file_path.clone()))
            }
        }
        _ => Ok(None),
    }
}

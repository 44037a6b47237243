//! Shell state container
//!
//! Owns the open tabs, one history pane per tab, the recent-locations log and
//! the coordinator. The view layer only renders the `ViewState`s returned here.

use parking_lot::RwLock;
use std::sync::Arc;

use wayfinder_address::Location;
use wayfinder_navigation::{NavigationHistory, RecentLocation, RecentLocations};
use wayfinder_session::{Session, SessionStore, SessionTab};
use wayfinder_storage::Database;
use wayfinder_tabs::{ClickKind, NavigationRequest, NavigationSource, Tab};

use crate::config::Config;
use crate::coordinator::{NavigationModeCoordinator, NavigationOutcome, ViewState};
use crate::error::CoreError;
use crate::probe::FileSystemProbe;
use crate::Result;

const CLOSED_TAB_LIMIT: usize = 20;

struct ClosedTab {
    tab: SessionTab,
    index: usize,
}

pub struct Shell {
    config: Config,
    recent: RecentLocations,
    sessions: SessionStore,
    probe: Box<dyn FileSystemProbe + Send + Sync>,
    coordinator: Arc<RwLock<NavigationModeCoordinator>>,
    session: Arc<RwLock<Session>>,
    recently_closed: Arc<RwLock<Vec<ClosedTab>>>,
}

impl Shell {
    /// Open the shell's database under `config.database_path`.
    pub fn new(config: Config, probe: Box<dyn FileSystemProbe + Send + Sync>) -> Result<Self> {
        if let Some(parent) = config.database_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let db = Database::open(&config.database_path)?;
        Ok(Self::with_database(config, db, probe))
    }

    pub fn with_database(
        config: Config,
        db: Database,
        probe: Box<dyn FileSystemProbe + Send + Sync>,
    ) -> Self {
        let coordinator = NavigationModeCoordinator::new(&config);

        Self {
            recent: RecentLocations::new(db.clone()),
            sessions: SessionStore::with_history_limit(db, config.history_limit),
            probe,
            coordinator: Arc::new(RwLock::new(coordinator)),
            session: Arc::new(RwLock::new(Session::default_session())),
            recently_closed: Arc::new(RwLock::new(Vec::new())),
            config,
        }
    }

    /// Restore the last session, or start one tab at the home address.
    pub fn initialize(&self) -> Result<ViewState> {
        let mut session = self
            .sessions
            .load_latest()?
            .unwrap_or_else(Session::default_session);

        if session.tab_count() == 0 {
            let home = self.coordinator.read().resolve(&self.config.home_address);
            session.open_tab(SessionTab::new(
                Tab::new(&home)?,
                NavigationHistory::with_limit(home.address(), self.config.history_limit),
            ));
        }

        self.sessions.save(&session)?;
        *self.session.write() = session;

        tracing::info!(tab_count = self.session.read().tab_count(), "Shell initialized");

        self.active_view().ok_or(CoreError::NoActiveTab)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn register_library(&self, library_id: impl Into<String>, name: impl Into<String>) {
        self.coordinator.write().register_library(library_id, name);
    }

    // === Views ===

    pub fn active_view(&self) -> Option<ViewState> {
        let mut coordinator = self.coordinator.write();
        let session = self.session.read();
        let pane = &session.active()?.history;
        Some(coordinator.show(pane, self.probe()))
    }

    pub fn session(&self) -> Session {
        self.session.read().clone()
    }

    pub fn tabs(&self) -> Vec<Tab> {
        self.session.read().tab_snapshot()
    }

    pub fn active_tab_id(&self) -> Option<String> {
        self.session.read().active_tab_id().map(str::to_owned)
    }

    // === Navigation ===

    /// Resolve `raw` and navigate to it.
    pub fn navigate(
        &self,
        raw: &str,
        source: NavigationSource,
        click_kind: ClickKind,
    ) -> Result<NavigationOutcome> {
        let target = self.coordinator.read().resolve(raw);
        self.navigate_to(NavigationRequest::new(target, source).with_click(click_kind))
    }

    pub fn navigate_to(&self, request: NavigationRequest) -> Result<NavigationOutcome> {
        let mut coordinator = self.coordinator.write();
        let mut session = self.session.write();

        let open_tabs = session.tab_snapshot();
        let active_tab_id = session.active_tab_id().map(str::to_owned);

        // With no active tab the router never reuses, so a scratch pane is never pushed.
        let mut scratch;
        let pane = match session.active_mut() {
            Some(active) => &mut active.history,
            None => {
                scratch = NavigationHistory::new(request.target.address());
                &mut scratch
            }
        };

        let outcome = coordinator.navigate(
            pane,
            &request,
            &open_tabs,
            active_tab_id.as_deref(),
            self.probe(),
        )?;

        match &outcome {
            NavigationOutcome::Navigated(view) => {
                if let Some(active) = session.active_mut() {
                    active.tab.bind(&view.location)?;
                }
                session.touch();
            }
            NavigationOutcome::SwitchTo { tab_id } => {
                session.activate(tab_id)?;
            }
            NavigationOutcome::OpenNew { view, history } => {
                let tab = Tab::new(&view.location)?;
                tracing::info!(tab_id = %tab.id, address = %view.address, "Opened tab");
                session.open_tab(SessionTab::new(tab, history.clone()));
            }
            NavigationOutcome::OpenFile { .. } => return Ok(outcome),
        }

        self.record_visit(&request.target);
        self.sessions.save(&session)?;

        Ok(outcome)
    }

    pub fn go_back(&self) -> Result<Option<ViewState>> {
        self.step_active(|coordinator, pane, probe| coordinator.go_back(pane, probe))
    }

    pub fn go_forward(&self) -> Result<Option<ViewState>> {
        self.step_active(|coordinator, pane, probe| coordinator.go_forward(pane, probe))
    }

    pub fn go_up(&self) -> Result<Option<ViewState>> {
        self.step_active(|coordinator, pane, probe| coordinator.go_up(pane, probe))
    }

    // === Modes ===

    pub fn enter_path_mode(&self) -> Result<ViewState> {
        self.step_active(|coordinator, pane, probe| {
            Some(coordinator.enter_path_mode(pane, probe))
        })?
        .ok_or(CoreError::NoActiveTab)
    }

    pub fn enter_tag_mode(&self) -> Result<ViewState> {
        self.step_active(|coordinator, pane, probe| Some(coordinator.enter_tag_mode(pane, probe)))?
            .ok_or(CoreError::NoActiveTab)
    }

    pub fn enter_library_mode(&self, library_id: &str) -> Result<ViewState> {
        if library_id.trim().is_empty() {
            return Err(CoreError::Config("library id cannot be empty".to_string()));
        }

        self.step_active(|coordinator, pane, probe| {
            coordinator.enter_library_mode(pane, library_id, probe).ok()
        })?
        .ok_or(CoreError::NoActiveTab)
    }

    // === Tabs ===

    pub fn activate_tab(&self, tab_id: &str) -> Result<ViewState> {
        {
            let mut session = self.session.write();
            session.activate(tab_id)?;
            self.sessions.save(&session)?;
        }
        self.active_view().ok_or(CoreError::NoActiveTab)
    }

    /// Close a tab. Returns the view of the tab activated in its place.
    pub fn close_tab(&self, tab_id: &str) -> Result<Option<ViewState>> {
        {
            let mut session = self.session.write();
            let index = session
                .tabs()
                .iter()
                .position(|t| t.tab.id == tab_id)
                .unwrap_or(session.tab_count());

            let closed = session.close_tab(tab_id)?;
            self.sessions.save(&session)?;

            let mut stack = self.recently_closed.write();
            stack.push(ClosedTab { tab: closed, index });
            if stack.len() > CLOSED_TAB_LIMIT {
                let overflow = stack.len() - CLOSED_TAB_LIMIT;
                stack.drain(0..overflow);
            }
        }

        tracing::info!(tab_id = %tab_id, "Closed tab");
        Ok(self.active_view())
    }

    /// Reopen the most recently closed tab, with its history, where it was.
    pub fn reopen_closed_tab(&self) -> Result<Option<ViewState>> {
        let Some(closed) = self.recently_closed.write().pop() else {
            return Ok(None);
        };

        {
            let mut session = self.session.write();
            let tab_id = closed.tab.tab.id.clone();
            session.open_tab(closed.tab);
            session.move_tab(&tab_id, closed.index)?;
            self.sessions.save(&session)?;
        }

        Ok(self.active_view())
    }

    pub fn move_tab(&self, tab_id: &str, new_index: usize) -> Result<()> {
        let mut session = self.session.write();
        session.move_tab(tab_id, new_index)?;
        self.sessions.save(&session)?;
        Ok(())
    }

    // === Recent locations ===

    pub fn recent_locations(&self) -> Result<Vec<RecentLocation>> {
        Ok(self.recent.recent(self.config.recent_limit)?)
    }

    pub fn search_recent(&self, query: &str) -> Result<Vec<RecentLocation>> {
        Ok(self.recent.search(query, self.config.recent_limit)?)
    }

    pub fn clear_recent(&self) -> Result<()> {
        Ok(self.recent.clear_all()?)
    }

    /// Run `step` on the active pane, then rebind the tab and persist.
    fn step_active<F>(&self, step: F) -> Result<Option<ViewState>>
    where
        F: FnOnce(
            &mut NavigationModeCoordinator,
            &mut NavigationHistory,
            &dyn FileSystemProbe,
        ) -> Option<ViewState>,
    {
        let mut coordinator = self.coordinator.write();
        let mut session = self.session.write();

        let Some(active) = session.active_mut() else {
            return Ok(None);
        };
        let Some(view) = step(&mut *coordinator, &mut active.history, self.probe()) else {
            return Ok(None);
        };
        active.tab.bind(&view.location)?;
        session.touch();

        self.record_visit(&view.location);
        self.sessions.save(&session)?;

        Ok(Some(view))
    }

    fn probe(&self) -> &dyn FileSystemProbe {
        self.probe.as_ref()
    }

    fn record_visit(&self, location: &Location) {
        if let Err(e) = self.recent.record_visit(location) {
            tracing::warn!(address = %location, error = %e, "Failed to record visit");
        }
    }
}

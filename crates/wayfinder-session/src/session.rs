//! Session data structure

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use wayfinder_navigation::NavigationHistory;
use wayfinder_tabs::{Tab, TabError};

use crate::error::SessionError;
use crate::Result;

/// A tab plus the history of the pane it hosts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionTab {
    pub tab: Tab,
    pub history: NavigationHistory,
}

impl SessionTab {
    pub fn new(tab: Tab, history: NavigationHistory) -> Self {
        Self { tab, history }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Unique identifier
    pub id: String,
    /// Human-readable name
    pub name: String,
    /// When the session was created
    pub created_at: DateTime<Utc>,
    /// Last modification time
    pub updated_at: DateTime<Utc>,
    /// Tabs in display order
    tabs: Vec<SessionTab>,
    active_tab_id: Option<String>,
}

impl Session {
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(SessionError::EmptyName);
        }

        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4().to_string(),
            name,
            created_at: now,
            updated_at: now,
            tabs: Vec::new(),
            active_tab_id: None,
        })
    }

    pub fn default_session() -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            name: "Default".to_string(),
            created_at: now,
            updated_at: now,
            tabs: Vec::new(),
            active_tab_id: None,
        }
    }

    pub(crate) fn restore(
        id: String,
        name: String,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
        tabs: Vec<SessionTab>,
        active_tab_id: Option<String>,
    ) -> Self {
        // A stale active id falls back to the first tab.
        let active_tab_id = active_tab_id
            .filter(|id| tabs.iter().any(|t| &t.tab.id == id))
            .or_else(|| tabs.first().map(|t| t.tab.id.clone()));

        Self {
            id,
            name,
            created_at,
            updated_at,
            tabs,
            active_tab_id,
        }
    }

    pub fn tabs(&self) -> &[SessionTab] {
        &self.tabs
    }

    /// Plain tab list, as read by the affinity router.
    pub fn tab_snapshot(&self) -> Vec<Tab> {
        self.tabs.iter().map(|t| t.tab.clone()).collect()
    }

    pub fn tab_count(&self) -> usize {
        self.tabs.len()
    }

    pub fn tab(&self, tab_id: &str) -> Option<&SessionTab> {
        self.tabs.iter().find(|t| t.tab.id == tab_id)
    }

    pub fn tab_mut(&mut self, tab_id: &str) -> Option<&mut SessionTab> {
        self.tabs.iter_mut().find(|t| t.tab.id == tab_id)
    }

    pub fn active_tab_id(&self) -> Option<&str> {
        self.active_tab_id.as_deref()
    }

    pub fn active(&self) -> Option<&SessionTab> {
        self.active_tab_id.as_deref().and_then(|id| self.tab(id))
    }

    pub fn active_mut(&mut self) -> Option<&mut SessionTab> {
        let id = self.active_tab_id.clone()?;
        self.tab_mut(&id)
    }

    /// Append a tab and make it active.
    pub fn open_tab(&mut self, tab: SessionTab) {
        self.active_tab_id = Some(tab.tab.id.clone());
        self.tabs.push(tab);
        self.touch();
    }

    pub fn activate(&mut self, tab_id: &str) -> Result<()> {
        if self.tab(tab_id).is_none() {
            return Err(TabError::NotFound(tab_id.to_string()).into());
        }
        self.active_tab_id = Some(tab_id.to_string());
        self.touch();
        Ok(())
    }

    /// Remove a tab. Closing the active tab activates its right neighbour,
    /// or the new last tab.
    pub fn close_tab(&mut self, tab_id: &str) -> Result<SessionTab> {
        let index = self
            .tabs
            .iter()
            .position(|t| t.tab.id == tab_id)
            .ok_or_else(|| TabError::NotFound(tab_id.to_string()))?;

        let closed = self.tabs.remove(index);

        if self.active_tab_id.as_deref() == Some(tab_id) {
            self.active_tab_id = self
                .tabs
                .get(index.min(self.tabs.len().saturating_sub(1)))
                .map(|t| t.tab.id.clone());
        }

        self.touch();
        Ok(closed)
    }

    /// Move a tab to a new position, clamped to the end.
    pub fn move_tab(&mut self, tab_id: &str, new_index: usize) -> Result<()> {
        let index = self
            .tabs
            .iter()
            .position(|t| t.tab.id == tab_id)
            .ok_or_else(|| TabError::NotFound(tab_id.to_string()))?;

        let tab = self.tabs.remove(index);
        let insert_index = new_index.min(self.tabs.len());
        self.tabs.insert(insert_index, tab);
        self.touch();
        Ok(())
    }

    pub fn rename(&mut self, name: impl Into<String>) -> Result<()> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(SessionError::EmptyName);
        }
        self.name = name;
        self.touch();
        Ok(())
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wayfinder_address::Location;

    fn session_tab(id: &str, address: &str) -> SessionTab {
        SessionTab::new(
            Tab::with_id(id, &Location::local(address)).unwrap(),
            NavigationHistory::new(address),
        )
    }

    fn ids(session: &Session) -> Vec<&str> {
        session.tabs().iter().map(|t| t.tab.id.as_str()).collect()
    }

    #[test]
    fn test_new_session() {
        let session = Session::new("Work").unwrap();
        assert_eq!(session.name, "Work");
        assert_eq!(session.tab_count(), 0);
        assert!(session.active().is_none());
        assert!(matches!(Session::new("  "), Err(SessionError::EmptyName)));
    }

    #[test]
    fn test_open_tab_activates_it() {
        let mut session = Session::default_session();
        session.open_tab(session_tab("a", "C:\\"));
        session.open_tab(session_tab("b", "D:\\"));

        assert_eq!(session.active_tab_id(), Some("b"));
        session.activate("a").unwrap();
        assert_eq!(session.active().unwrap().history.current().address, "C:\\");
        assert!(session.activate("missing").is_err());
    }

    #[test]
    fn test_close_active_tab_picks_neighbour() {
        let mut session = Session::default_session();
        session.open_tab(session_tab("a", "A:\\"));
        session.open_tab(session_tab("b", "B:\\"));
        session.open_tab(session_tab("c", "C:\\"));

        session.activate("b").unwrap();
        session.close_tab("b").unwrap();
        assert_eq!(session.active_tab_id(), Some("c"));

        session.close_tab("c").unwrap();
        assert_eq!(session.active_tab_id(), Some("a"));

        session.close_tab("a").unwrap();
        assert_eq!(session.active_tab_id(), None);
    }

    #[test]
    fn test_move_tab() {
        let mut session = Session::default_session();
        session.open_tab(session_tab("a", "A:\\"));
        session.open_tab(session_tab("b", "B:\\"));
        session.open_tab(session_tab("c", "C:\\"));

        session.move_tab("c", 0).unwrap();
        assert_eq!(ids(&session), vec!["c", "a", "b"]);

        session.move_tab("c", 99).unwrap();
        assert_eq!(ids(&session), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_restore_repairs_stale_active_id() {
        let session = Session::restore(
            "s".to_string(),
            "S".to_string(),
            Utc::now(),
            Utc::now(),
            vec![session_tab("a", "A:\\")],
            Some("gone".to_string()),
        );
        assert_eq!(session.active_tab_id(), Some("a"));
    }
}

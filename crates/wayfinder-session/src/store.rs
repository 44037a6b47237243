//! Session persistence
//!
//! Sessions are written whole inside one transaction: the session row is
//! upserted and its tab rows are replaced.

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::OptionalExtension;
use serde::{Deserialize, Serialize};

use wayfinder_navigation::NavigationHistory;
use wayfinder_storage::Database;
use wayfinder_tabs::{Tab, TabBinding};

use crate::error::SessionError;
use crate::session::{Session, SessionTab};
use crate::Result;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSummary {
    pub id: String,
    pub name: String,
    pub updated_at: DateTime<Utc>,
    pub tab_count: usize,
}

struct TabRow {
    id: String,
    binding: String,
    history: String,
    created_at: String,
    updated_at: String,
}

pub struct SessionStore {
    db: Database,
    history_limit: Option<usize>,
}

impl SessionStore {
    /// Restored histories keep the limit they were saved with.
    pub fn new(db: Database) -> Self {
        Self {
            db,
            history_limit: None,
        }
    }

    /// Restored histories are trimmed to `limit`.
    pub fn with_history_limit(db: Database, limit: usize) -> Self {
        Self {
            db,
            history_limit: Some(limit),
        }
    }

    pub fn save(&self, session: &Session) -> Result<()> {
        let rows = session
            .tabs()
            .iter()
            .map(|t| -> Result<TabRow> {
                Ok(TabRow {
                    id: t.tab.id.clone(),
                    binding: serde_json::to_string(&t.tab.binding)?,
                    history: serde_json::to_string(&t.history)?,
                    created_at: timestamp(t.tab.created_at),
                    updated_at: timestamp(t.tab.updated_at),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        self.db.transaction(|conn| {
            conn.execute(
                "INSERT INTO sessions (id, name, created_at, updated_at, active_tab_id)
                 VALUES (?1, ?2, ?3, ?4, ?5)
                 ON CONFLICT(id) DO UPDATE
                 SET name = excluded.name,
                     updated_at = excluded.updated_at,
                     active_tab_id = excluded.active_tab_id",
                rusqlite::params![
                    session.id,
                    session.name,
                    timestamp(session.created_at),
                    timestamp(session.updated_at),
                    session.active_tab_id(),
                ],
            )?;

            conn.execute(
                "DELETE FROM session_tabs WHERE session_id = ?1",
                [session.id.as_str()],
            )?;

            let mut stmt = conn.prepare(
                "INSERT INTO session_tabs
                 (id, session_id, position, binding, history, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            )?;
            for (position, row) in rows.iter().enumerate() {
                stmt.execute(rusqlite::params![
                    row.id,
                    session.id,
                    position as i64,
                    row.binding,
                    row.history,
                    row.created_at,
                    row.updated_at,
                ])?;
            }

            Ok(())
        })?;

        tracing::debug!(
            session_id = %session.id,
            tab_count = session.tab_count(),
            "Saved session"
        );

        Ok(())
    }

    pub fn load(&self, session_id: &str) -> Result<Session> {
        let header = self.db.with_connection(|conn| {
            Ok(conn
                .query_row(
                    "SELECT id, name, created_at, updated_at, active_tab_id
                     FROM sessions WHERE id = ?1",
                    [session_id],
                    |row| {
                        Ok((
                            row.get::<_, String>(0)?,
                            row.get::<_, String>(1)?,
                            row.get::<_, String>(2)?,
                            row.get::<_, String>(3)?,
                            row.get::<_, Option<String>>(4)?,
                        ))
                    },
                )
                .optional()?)
        })?;

        let (id, name, created_at, updated_at, active_tab_id) =
            header.ok_or_else(|| SessionError::NotFound(session_id.to_string()))?;

        let tabs = self
            .load_tab_rows(&id)?
            .into_iter()
            .filter_map(|row| restore_tab(row, self.history_limit))
            .collect();

        tracing::info!(session_id = %id, session_name = %name, "Restored session");

        Ok(Session::restore(
            id,
            name,
            parse_timestamp(&created_at),
            parse_timestamp(&updated_at),
            tabs,
            active_tab_id,
        ))
    }

    /// The most recently updated session, if any was saved.
    pub fn load_latest(&self) -> Result<Option<Session>> {
        let latest: Option<String> = self.db.with_connection(|conn| {
            Ok(conn
                .query_row(
                    "SELECT id FROM sessions ORDER BY updated_at DESC LIMIT 1",
                    [],
                    |row| row.get(0),
                )
                .optional()?)
        })?;

        latest.map(|id| self.load(&id)).transpose()
    }

    pub fn list(&self) -> Result<Vec<SessionSummary>> {
        Ok(self.db.with_connection(|conn| {
            let mut stmt = conn.prepare(
                "SELECT s.id, s.name, s.updated_at, COUNT(t.id)
                 FROM sessions s LEFT JOIN session_tabs t ON t.session_id = s.id
                 GROUP BY s.id
                 ORDER BY s.updated_at DESC",
            )?;

            let summaries = stmt
                .query_map([], |row| {
                    let updated_str: String = row.get(2)?;
                    Ok(SessionSummary {
                        id: row.get(0)?,
                        name: row.get(1)?,
                        updated_at: parse_timestamp(&updated_str),
                        tab_count: row.get::<_, i64>(3)? as usize,
                    })
                })?
                .filter_map(|r| r.ok())
                .collect();

            Ok(summaries)
        })?)
    }

    pub fn delete(&self, session_id: &str) -> Result<()> {
        let removed = self.db.with_connection(|conn| {
            Ok(conn.execute("DELETE FROM sessions WHERE id = ?1", [session_id])?)
        })?;

        if removed == 0 {
            return Err(SessionError::NotFound(session_id.to_string()));
        }
        Ok(())
    }

    fn load_tab_rows(&self, session_id: &str) -> Result<Vec<TabRow>> {
        Ok(self.db.with_connection(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, binding, history, created_at, updated_at FROM session_tabs
                 WHERE session_id = ?1
                 ORDER BY position",
            )?;

            let rows = stmt
                .query_map([session_id], |row| {
                    Ok(TabRow {
                        id: row.get(0)?,
                        binding: row.get(1)?,
                        history: row.get(2)?,
                        created_at: row.get(3)?,
                        updated_at: row.get(4)?,
                    })
                })?
                .filter_map(|r| r.ok())
                .collect();

            Ok(rows)
        })?)
    }
}

impl Clone for SessionStore {
    fn clone(&self) -> Self {
        Self {
            db: self.db.clone(),
            history_limit: self.history_limit,
        }
    }
}

/// Rebuild a tab row. Unreadable bindings drop the tab; unreadable history
/// restarts at the tab's bound address.
fn restore_tab(row: TabRow, history_limit: Option<usize>) -> Option<SessionTab> {
    let binding: TabBinding = match serde_json::from_str(&row.binding) {
        Ok(binding) => binding,
        Err(e) => {
            tracing::warn!(tab_id = %row.id, error = %e, "Dropping tab with unreadable binding");
            return None;
        }
    };

    let mut history =
        serde_json::from_str::<NavigationHistory>(&row.history).unwrap_or_else(|e| {
            tracing::warn!(tab_id = %row.id, error = %e, "Resetting unreadable tab history");
            NavigationHistory::new(binding.address())
        });
    if let Some(limit) = history_limit {
        history.set_limit(limit);
    }

    let tab = Tab {
        id: row.id,
        kind: binding.kind(),
        binding,
        created_at: parse_timestamp(&row.created_at),
        updated_at: parse_timestamp(&row.updated_at),
    };

    Some(SessionTab::new(tab, history))
}

fn timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

fn parse_timestamp(value: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}

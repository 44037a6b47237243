//! Recently visited locations

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::Result;
use wayfinder_address::{Location, LocationKind};
use wayfinder_storage::Database;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecentLocation {
    pub id: i64,
    pub address: String,
    pub kind: LocationKind,
    pub visited_at: DateTime<Utc>,
    pub visit_count: i32,
}

pub struct RecentLocations {
    db: Database,
}

impl RecentLocations {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Record a visit, bumping the count if the address was seen before.
    pub fn record_visit(&self, location: &Location) -> Result<()> {
        let address = location.address();
        let kind = location.kind();

        Ok(self.db.with_connection(|conn| {
            conn.execute(
                "INSERT INTO recent_locations (address, kind, visited_at, visit_count)
                 VALUES (?1, ?2, ?3, 1)
                 ON CONFLICT(address) DO UPDATE
                 SET kind = excluded.kind,
                     visited_at = excluded.visited_at,
                     visit_count = visit_count + 1",
                rusqlite::params![address, kind.as_str(), timestamp(Utc::now())],
            )?;
            Ok(())
        })?)
    }

    /// Most recently visited first.
    pub fn recent(&self, limit: usize) -> Result<Vec<RecentLocation>> {
        self.query(
            "SELECT id, address, kind, visited_at, visit_count FROM recent_locations
             ORDER BY visited_at DESC, id DESC
             LIMIT ?1",
            rusqlite::params![limit as i64],
        )
    }

    /// Case-insensitive substring match on the address.
    pub fn search(&self, query: &str, limit: usize) -> Result<Vec<RecentLocation>> {
        let pattern = format!("%{}%", query.to_lowercase());
        self.query(
            "SELECT id, address, kind, visited_at, visit_count FROM recent_locations
             WHERE LOWER(address) LIKE ?1
             ORDER BY visited_at DESC, visit_count DESC
             LIMIT ?2",
            rusqlite::params![pattern, limit as i64],
        )
    }

    pub fn delete(&self, id: i64) -> Result<()> {
        Ok(self.db.with_connection(|conn| {
            conn.execute("DELETE FROM recent_locations WHERE id = ?1", [id])?;
            Ok(())
        })?)
    }

    /// Forget visits older than `cutoff`.
    pub fn clear_before(&self, cutoff: DateTime<Utc>) -> Result<usize> {
        Ok(self.db.with_connection(|conn| {
            Ok(conn.execute(
                "DELETE FROM recent_locations WHERE visited_at < ?1",
                [timestamp(cutoff)],
            )?)
        })?)
    }

    pub fn clear_all(&self) -> Result<()> {
        Ok(self.db.with_connection(|conn| {
            conn.execute("DELETE FROM recent_locations", [])?;
            Ok(())
        })?)
    }

    fn query(&self, sql: &str, params: impl rusqlite::Params) -> Result<Vec<RecentLocation>> {
        Ok(self.db.with_connection(|conn| {
            let mut stmt = conn.prepare(sql)?;

            let entries: Vec<RecentLocation> = stmt
                .query_map(params, |row| {
                    let kind_str: String = row.get(2)?;
                    let kind = kind_str.parse().unwrap_or(LocationKind::Local);

                    let visited_str: String = row.get(3)?;
                    let visited_at = DateTime::parse_from_rfc3339(&visited_str)
                        .map(|dt| dt.with_timezone(&Utc))
                        .unwrap_or_else(|_| Utc::now());

                    Ok(RecentLocation {
                        id: row.get(0)?,
                        address: row.get(1)?,
                        kind,
                        visited_at,
                        visit_count: row.get(4)?,
                    })
                })?
                .filter_map(|r| r.ok())
                .collect();

            Ok(entries)
        })?)
    }
}

impl Clone for RecentLocations {
    fn clone(&self) -> Self {
        Self {
            db: self.db.clone(),
        }
    }
}

/// Fixed-width timestamps so text ordering matches time ordering.
fn timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

//! Shell configuration

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use wayfinder_address::BreadcrumbBuilder;
use wayfinder_navigation::NavigationHistory;

use crate::error::CoreError;
use crate::Result;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Path to the database file
    pub database_path: PathBuf,
    /// Where Path mode lands when no path location is in the pane's history
    pub home_address: String,
    /// Maximum entries kept per pane history
    pub history_limit: usize,
    /// Breadcrumbs longer than this many tokens are elided
    pub elision_threshold: usize,
    /// Tokens kept on the right of an elided breadcrumb
    pub elision_tail: usize,
    /// Number of recent locations listed
    pub recent_limit: usize,
}

impl Config {
    pub fn new(data_dir: PathBuf) -> Self {
        let home_address = dirs::home_dir()
            .map(|h| h.to_string_lossy().into_owned())
            .unwrap_or_else(|| "C:\\".to_string());

        Self {
            database_path: data_dir.join("wayfinder.db"),
            home_address,
            history_limit: NavigationHistory::DEFAULT_LIMIT,
            elision_threshold: BreadcrumbBuilder::DEFAULT_ELISION_THRESHOLD,
            elision_tail: BreadcrumbBuilder::DEFAULT_ELISION_TAIL,
            recent_limit: 20,
        }
    }

    pub fn data_dir() -> PathBuf {
        dirs::data_local_dir()
            .map(|d| d.join("Wayfinder"))
            .unwrap_or_else(|| PathBuf::from(".wayfinder"))
    }

    /// Read a JSON config file. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.home_address.trim().is_empty() {
            return Err(CoreError::Config("home_address cannot be empty".to_string()));
        }
        if self.history_limit == 0 {
            return Err(CoreError::Config("history_limit must be positive".to_string()));
        }
        if self.elision_tail == 0 || self.elision_tail >= self.elision_threshold {
            return Err(CoreError::Config(
                "elision_tail must be positive and below elision_threshold".to_string(),
            ));
        }
        Ok(())
    }

    pub fn breadcrumb_builder(&self) -> BreadcrumbBuilder {
        BreadcrumbBuilder::with_elision(self.elision_threshold, self.elision_tail)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(Self::data_dir())
    }
}

// Platform data and home directories
mod dirs {
    use std::path::PathBuf;

    pub fn data_local_dir() -> Option<PathBuf> {
        #[cfg(target_os = "windows")]
        {
            std::env::var("LOCALAPPDATA").ok().map(PathBuf::from)
        }
        #[cfg(target_os = "macos")]
        {
            std::env::var("HOME")
                .ok()
                .map(|h| PathBuf::from(h).join("Library/Application Support"))
        }
        #[cfg(target_os = "linux")]
        {
            std::env::var("XDG_DATA_HOME")
                .ok()
                .map(PathBuf::from)
                .or_else(|| {
                    std::env::var("HOME")
                        .ok()
                        .map(|h| PathBuf::from(h).join(".local/share"))
                })
        }
        #[cfg(not(any(target_os = "windows", target_os = "macos", target_os = "linux")))]
        {
            None
        }
    }

    pub fn home_dir() -> Option<PathBuf> {
        #[cfg(target_os = "windows")]
        {
            std::env::var("USERPROFILE").ok().map(PathBuf::from)
        }
        #[cfg(not(target_os = "windows"))]
        {
            std::env::var("HOME").ok().map(PathBuf::from)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(&dir.path().join("absent.json")).unwrap();
        assert_eq!(config.history_limit, NavigationHistory::DEFAULT_LIMIT);
        assert_eq!(config.elision_threshold, 10);
        assert_eq!(config.elision_tail, 6);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let mut config = Config::new(dir.path().to_path_buf());
        config.home_address = "D:\\Work".to_string();
        config.history_limit = 50;
        config.save(&path).unwrap();

        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded.home_address, "D:\\Work");
        assert_eq!(loaded.history_limit, 50);
        assert_eq!(loaded.database_path, dir.path().join("wayfinder.db"));
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "home_address": "E:\\" }"#).unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.home_address, "E:\\");
        assert_eq!(config.recent_limit, 20);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "elision_threshold": 4, "elision_tail": 6 }"#).unwrap();

        assert!(matches!(Config::load(&path), Err(CoreError::Config(_))));
    }

    #[test]
    fn test_malformed_json_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert!(matches!(
            Config::load(&path),
            Err(CoreError::Serialization(_))
        ));
    }
}

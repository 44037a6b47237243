//! Tab data structure

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use wayfinder_address::Location;

use crate::error::TabError;
use crate::Result;

/// What a tab is showing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum TabBinding {
    /// Any addressable location: paths, archives, searches, tags
    Address(String),
    /// A library aggregation, matched by id
    Library(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TabKind {
    Path,
    Library,
}

impl TabBinding {
    pub fn for_location(location: &Location) -> Self {
        match location {
            Location::Library { library_id } => TabBinding::Library(library_id.clone()),
            other => TabBinding::Address(other.address()),
        }
    }

    pub fn kind(&self) -> TabKind {
        match self {
            TabBinding::Address(_) => TabKind::Path,
            TabBinding::Library(_) => TabKind::Library,
        }
    }

    /// Exact match: address equality, or library id equality.
    pub fn matches(&self, location: &Location) -> bool {
        *self == Self::for_location(location)
    }

    /// Address to re-navigate this binding.
    pub fn address(&self) -> String {
        match self {
            TabBinding::Address(address) => address.clone(),
            TabBinding::Library(library_id) => Location::library(library_id.as_str()).address(),
        }
    }
}

impl TabKind {
    pub fn of(location: &Location) -> Self {
        match location {
            Location::Library { .. } => TabKind::Library,
            _ => TabKind::Path,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tab {
    /// Unique identifier
    pub id: String,
    /// Current binding
    pub binding: TabBinding,
    /// Path tab or library tab, always consistent with `binding`
    pub kind: TabKind,
    /// When the tab was opened
    pub created_at: DateTime<Utc>,
    /// Last time the binding changed
    pub updated_at: DateTime<Utc>,
}

impl Tab {
    pub fn new(location: &Location) -> Result<Self> {
        Self::with_id(Uuid::new_v4().to_string(), location)
    }

    pub fn with_id(id: impl Into<String>, location: &Location) -> Result<Self> {
        let binding = Self::validated_binding(location)?;
        let now = Utc::now();

        Ok(Self {
            id: id.into(),
            kind: binding.kind(),
            binding,
            created_at: now,
            updated_at: now,
        })
    }

    /// Rebind after navigating this tab in place.
    pub fn bind(&mut self, location: &Location) -> Result<()> {
        let binding = Self::validated_binding(location)?;

        tracing::debug!(
            tab_id = %self.id,
            from = %self.binding.address(),
            to = %binding.address(),
            "Tab rebound"
        );

        self.kind = binding.kind();
        self.binding = binding;
        self.updated_at = Utc::now();
        Ok(())
    }

    pub fn address(&self) -> String {
        self.binding.address()
    }

    fn validated_binding(location: &Location) -> Result<TabBinding> {
        let binding = TabBinding::for_location(location);
        match &binding {
            TabBinding::Address(address) if address.is_empty() => Err(TabError::EmptyAddress),
            TabBinding::Library(id) if id.is_empty() => Err(TabError::EmptyAddress),
            _ => Ok(binding),
        }
    }
}

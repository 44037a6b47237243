//! Wayfinder Navigation State
//!
//! - [`NavigationHistory`]: per-pane back/forward stack with browser semantics
//! - [`RecentLocations`]: persisted log of visited locations

mod error;
mod history;
mod recent;

pub use error::NavigationError;
pub use history::{HistoryEntry, NavigationHistory};
pub use recent::{RecentLocation, RecentLocations};

pub type Result<T> = std::result::Result<T, NavigationError>;

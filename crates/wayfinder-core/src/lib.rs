//! Wayfinder Core
//!
//! Wires address resolution, breadcrumbs, up-navigation, history and tab
//! affinity into the state the shell renders. Every navigation is resolved,
//! routed and applied before the next one is accepted.

mod config;
mod coordinator;
mod error;
mod probe;
mod shell;

pub use config::Config;
pub use coordinator::{NavigationMode, NavigationModeCoordinator, NavigationOutcome, ViewState};
pub use error::CoreError;
pub use probe::{FileSystemProbe, LocalFileSystem};
pub use shell::Shell;

// Re-export engine components
pub use wayfinder_address::{
    validate_address, AddressError, AddressResolver, BreadcrumbBuilder, BreadcrumbLayout,
    LibraryCatalog, Location, LocationKind, Segment, UpNavigator,
};
pub use wayfinder_navigation::{HistoryEntry, NavigationHistory, RecentLocation, RecentLocations};
pub use wayfinder_session::{Session, SessionStore, SessionSummary, SessionTab};
pub use wayfinder_storage::{Database, StorageError};
pub use wayfinder_tabs::{
    ClickKind, NavigationRequest, NavigationSource, RoutingDecision, Tab, TabAffinityRouter,
    TabBinding, TabKind,
};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
pub fn init_logging() {
    init_logging_with("info");
}

/// Initialize logging, using `default_filter` when `RUST_LOG` is unset.
pub fn init_logging_with(default_filter: &str) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    fmt().with_env_filter(filter).with_target(true).init();
}

//! Wayfinder Tab Affinity
//!
//! Decides, for every navigation request, whether the active tab is reused,
//! an existing tab is brought forward, or a new tab is opened. The tab
//! collection itself belongs to the caller; the router only reads it.

mod error;
mod request;
mod router;
mod tab;

pub use error::TabError;
pub use request::{ClickKind, NavigationRequest, NavigationSource};
pub use router::{RoutingDecision, TabAffinityRouter};
pub use tab::{Tab, TabBinding, TabKind};

pub type Result<T> = std::result::Result<T, TabError>;

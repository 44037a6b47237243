//! Wayfinder Sessions
//!
//! A session is the set of open tabs, their order, the active tab and each
//! tab's back/forward history. Saving and restoring it makes navigation
//! resumable across restarts.

mod error;
mod session;
mod store;

pub use error::SessionError;
pub use session::{Session, SessionTab};
pub use store::{SessionStore, SessionSummary};

pub type Result<T> = std::result::Result<T, SessionError>;

//! Wayfinder Address Engine
//!
//! Turns a raw address string into a typed [`Location`] and derives everything
//! the shell renders from it:
//! - `content://`, `search://`, `tag://`, `library://` → virtual views
//! - `zip://<archive>|<inner>` → a folder inside an archive container
//! - anything else → a local filesystem path, stored verbatim
//!
//! Resolution is total: every string maps to exactly one location kind.

mod breadcrumb;
mod error;
mod location;
mod path;
mod protocol;
mod resolver;
mod up;
mod validate;

pub use breadcrumb::{
    BreadcrumbBuilder, BreadcrumbLayout, LibraryCatalog, Segment, DISPLAY_SEPARATOR,
};
pub use error::AddressError;
pub use location::{Location, LocationKind};
pub use path::{parent_of, SEPARATOR};
pub use protocol::{Protocol, ARCHIVE_DELIMITER};
pub use resolver::AddressResolver;
pub use up::UpNavigator;
pub use validate::validate_address;

pub type Result<T> = std::result::Result<T, AddressError>;

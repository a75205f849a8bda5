//! Foundation utilities shared across vrz crates.
//!
//! Nothing here knows about objects, the index, or refs; it's the layer
//! those crates build on: signatures/dates, atomic lock-file writes, and
//! glob matching for `.vrzignore`.

pub mod date;
mod error;
pub mod lockfile;
pub mod wildmatch;

pub use date::{GitDate, Signature};
pub use error::{LockError, UtilError};
pub use lockfile::LockFile;

pub type Result<T> = std::result::Result<T, UtilError>;

//! # lsmeta
//!
//! Lists the immediate children of one directory and describes each with its
//! name, joined path, lstat/stat metadata and, for symbolic links, the stored
//! target and whether it resolves.
//!
//! The output is a single value in a small text format (a strict subset of
//! common structured-data syntax) meant to be parsed by a host process.
//!
//! # Quick Start
//!
//! ```rust
//! let dir = tempfile::tempdir().unwrap();
//! std::fs::write(dir.path().join("notes.txt"), "hi").unwrap();
//!
//! let listing = lsmeta::listing()
//!     .path(dir.path())
//!     .run()
//!     .unwrap();
//!
//! assert_eq!(listing.entries.len(), 1);
//! assert_eq!(listing.entries[0].stat.size, 2);
//! let text = listing.to_bytes();
//! assert!(text.starts_with(b"[{\"name\": \"notes.txt\""));
//! ```
//!
//! # Variants
//!
//! [`Variant::Local`] and [`Variant::Remote`] are presets over the two
//! switches in [`ListingConfig`]: whether a failed readlink is fatal, and
//! whether a failed directory read goes to the error channel. The engine is
//! the same for both.

#![forbid(unsafe_code)]

pub mod engine;
pub mod value;

mod builder;
mod entry;
mod error;
mod results;
mod traits;

// ── Public re-exports ─────────────────────────────────────────────────────────

pub use builder::ListingBuilder;
pub use engine::{ListingConfig, Variant};
pub use entry::{DirectoryEntry, LinkInfo, Stat};
pub use error::ListingError;
pub use results::Listing;
pub use traits::{Filesystem, OsFilesystem};
pub use value::Value;

// ── Entry point ───────────────────────────────────────────────────────────────

/// Create a new [`ListingBuilder`] to configure and run a listing.
///
/// # Example
///
/// ```rust
/// use lsmeta::{ListingError, Variant};
///
/// let err = lsmeta::listing()
///     .path("/definitely/not/here")
///     .variant(Variant::Remote)
///     .run()
///     .unwrap_err();
///
/// assert!(matches!(err, ListingError::DirectoryRead { .. }));
/// assert_eq!(err.errno(), 2);
/// ```
pub fn listing() -> ListingBuilder {
    ListingBuilder::default()
}

use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};

use crate::entry::Stat;

/// The filesystem primitives the engine needs.
///
/// Implement this to list something other than the local filesystem, or to
/// inject failures in tests. Every call is made exactly once per entry; the
/// engine never retries.
///
/// # Example
///
/// ```rust
/// use std::ffi::OsString;
/// use std::io;
/// use std::path::{Path, PathBuf};
/// use lsmeta::{Filesystem, Stat};
///
/// struct Empty;
///
/// impl Filesystem for Empty {
///     fn read_dir(&self, _dir: &Path) -> io::Result<Vec<OsString>> {
///         Ok(Vec::new())
///     }
///     fn symlink_metadata(&self, _path: &Path) -> io::Result<Stat> {
///         Err(io::Error::from_raw_os_error(2))
///     }
///     fn read_link(&self, _path: &Path) -> io::Result<PathBuf> {
///         Err(io::Error::from_raw_os_error(2))
///     }
///     fn metadata(&self, _path: &Path) -> io::Result<Stat> {
///         Err(io::Error::from_raw_os_error(2))
///     }
/// }
///
/// let listing = lsmeta::listing().path("/anywhere").filesystem(Empty).run().unwrap();
/// assert!(listing.entries.is_empty());
/// ```
pub trait Filesystem {
    /// Names directly inside `dir`, excluding `.` and `..`, in the order the
    /// underlying API returns them.
    fn read_dir(&self, dir: &Path) -> io::Result<Vec<OsString>>;

    /// Metadata of `path` itself, without following a final symlink.
    fn symlink_metadata(&self, path: &Path) -> io::Result<Stat>;

    /// The raw text stored in the symlink at `path`.
    fn read_link(&self, path: &Path) -> io::Result<PathBuf>;

    /// Metadata of whatever `path` finally resolves to.
    fn metadata(&self, path: &Path) -> io::Result<Stat>;
}

/// [`Filesystem`] over `std::fs`.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsFilesystem;

impl Filesystem for OsFilesystem {
    fn read_dir(&self, dir: &Path) -> io::Result<Vec<OsString>> {
        std::fs::read_dir(dir)?
            .map(|entry| entry.map(|e| e.file_name()))
            .collect()
    }

    fn symlink_metadata(&self, path: &Path) -> io::Result<Stat> {
        std::fs::symlink_metadata(path).map(|md| Stat::from_metadata(&md))
    }

    fn read_link(&self, path: &Path) -> io::Result<PathBuf> {
        std::fs::read_link(path)
    }

    fn metadata(&self, path: &Path) -> io::Result<Stat> {
        std::fs::metadata(path).map(|md| Stat::from_metadata(&md))
    }
}

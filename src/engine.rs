use std::ffi::OsString;
use std::path::Path;

use tracing::{debug, trace};

use crate::entry::{DirectoryEntry, LinkInfo};
use crate::error::ListingError;
use crate::results::Listing;
use crate::traits::Filesystem;

// ---------------------------------------------------------------------------
// ListingConfig
// ---------------------------------------------------------------------------

/// The two switches that separate the local and remote behaviours.
///
/// Both variants run through the same engine; only these flags differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListingConfig {
    /// A failed readlink is fatal (`LinkTarget`) instead of marking the link
    /// broken with a null target. Only the stat of the target is guarded.
    pub strict_link_target_read: bool,

    /// A failed directory read is reported as a payload on the error channel
    /// with exit status 1, rather than propagating as a fault.
    pub report_errors_on_channel: bool,
}

/// Preset combinations of [`ListingConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Variant {
    /// Runs next to the host. No error channel, strict readlink.
    Local,

    /// Runs on a remote machine. Error channel, lenient readlink.
    #[default]
    Remote,
}

impl Variant {
    pub fn config(self) -> ListingConfig {
        match self {
            Variant::Local => ListingConfig {
                strict_link_target_read:  true,
                report_errors_on_channel: false,
            },
            Variant::Remote => ListingConfig {
                strict_link_target_read:  false,
                report_errors_on_channel: true,
            },
        }
    }
}

impl Default for ListingConfig {
    fn default() -> Self {
        Variant::default().config()
    }
}

// ---------------------------------------------------------------------------
// run()
// ---------------------------------------------------------------------------

/// List `dir` and describe every child, in enumeration order.
///
/// Any describer failure aborts the whole listing; there are no partial
/// results.
pub(crate) fn run(fs: &dyn Filesystem, dir: &Path, config: ListingConfig) -> Result<Listing, ListingError> {
    let names = enumerate(fs, dir)?;
    debug!(path = %dir.display(), count = names.len(), "enumerated directory");

    let entries = names
        .into_iter()
        .map(|name| describe(fs, dir, name, config))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Listing { entries })
}

// ---------------------------------------------------------------------------
// Enumerator
// ---------------------------------------------------------------------------

/// Names directly inside `dir`. No sorting, no filtering by type.
pub(crate) fn enumerate(fs: &dyn Filesystem, dir: &Path) -> Result<Vec<OsString>, ListingError> {
    fs.read_dir(dir).map_err(|source| ListingError::DirectoryRead {
        path: dir.to_path_buf(),
        source,
    })
}

// ---------------------------------------------------------------------------
// Describer
// ---------------------------------------------------------------------------

/// Build the record for `name` inside `parent`.
pub(crate) fn describe(
    fs: &dyn Filesystem,
    parent: &Path,
    name: OsString,
    config: ListingConfig,
) -> Result<DirectoryEntry, ListingError> {
    let abspath = parent.join(&name);

    let mut stat = fs
        .symlink_metadata(&abspath)
        .map_err(|source| ListingError::EntryStat {
            path: abspath.clone(),
            source,
        })?;

    let link = if stat.is_symlink() {
        // Strict: only the stat of the target is guarded, readlink is fatal.
        // Lenient: readlink and stat are guarded together and any failure
        // leaves a null target.
        let resolved = if config.strict_link_target_read {
            let target = fs
                .read_link(&abspath)
                .map_err(|source| ListingError::LinkTarget {
                    path: abspath.clone(),
                    source,
                })?;
            fs.metadata(&abspath)
                .map(|target_stat| (target.clone(), target_stat))
                .map_err(|source| (Some(target), source))
        } else {
            fs.read_link(&abspath)
                .and_then(|target| fs.metadata(&abspath).map(|target_stat| (target, target_stat)))
                .map_err(|source| (None, source))
        };

        match resolved {
            Ok((target, target_stat)) => {
                stat = target_stat;
                Some(LinkInfo { target: Some(target), broken: false })
            }
            Err((target, source)) => {
                let err = ListingError::LinkResolution { path: abspath.clone(), source };
                debug!(error = %err, errno = err.errno(), "broken link");
                Some(LinkInfo { target, broken: true })
            }
        }
    } else {
        None
    };

    trace!(path = %abspath.display(), mode = stat.mode, "described entry");

    Ok(DirectoryEntry {
        name,
        abspath,
        link,
        stat,
    })
}

use std::path::PathBuf;

use crate::engine::{run, ListingConfig, Variant};
use crate::error::ListingError;
use crate::results::Listing;
use crate::traits::{Filesystem, OsFilesystem};

// ---------------------------------------------------------------------------
// ListingBuilder
// ---------------------------------------------------------------------------

/// Entry point for configuring and executing a directory listing.
///
/// Created via [`lsmeta::listing()`](crate::listing). Configure with chained
/// builder methods, then call [`run()`](ListingBuilder::run) to execute.
///
/// # Example
///
/// ```rust,ignore
/// let listing = lsmeta::listing()
///     .path("/var/log")
///     .variant(Variant::Local)
///     .run()?;
/// listing.write_to(&mut std::io::stdout())?;
/// ```
pub struct ListingBuilder {
    path:       Option<PathBuf>,
    config:     ListingConfig,
    filesystem: Box<dyn Filesystem>,
}

impl Default for ListingBuilder {
    fn default() -> Self {
        Self {
            path:       None,
            config:     ListingConfig::default(),
            filesystem: Box::new(OsFilesystem),
        }
    }
}

impl ListingBuilder {
    // ── Target ────────────────────────────────────────────────────────────

    /// The directory whose children are listed. Used verbatim as the
    /// parent of every `abspath`.
    pub fn path(mut self, p: impl Into<PathBuf>) -> Self {
        self.path = Some(p.into());
        self
    }

    /// Replace the real filesystem, e.g. with a fake in tests.
    pub fn filesystem(mut self, fs: impl Filesystem + 'static) -> Self {
        self.filesystem = Box::new(fs);
        self
    }

    // ── Behaviour ─────────────────────────────────────────────────────────

    /// Apply both flags of a preset. Later flag calls override it.
    pub fn variant(mut self, v: Variant) -> Self {
        self.config = v.config();
        self
    }

    /// See [`ListingConfig::strict_link_target_read`].
    pub fn strict_link_target_read(mut self, yes: bool) -> Self {
        self.config.strict_link_target_read = yes;
        self
    }

    /// See [`ListingConfig::report_errors_on_channel`].
    pub fn report_errors_on_channel(mut self, yes: bool) -> Self {
        self.config.report_errors_on_channel = yes;
        self
    }

    /// The configuration `run()` will use.
    pub fn config(&self) -> ListingConfig {
        self.config
    }

    // ── Execute ───────────────────────────────────────────────────────────

    /// List the directory and describe every child.
    ///
    /// # Errors
    ///
    /// `InvalidSource` if no path was set, `DirectoryRead` if the directory
    /// cannot be read, `EntryStat` if any child cannot be lstat'ed, and
    /// `LinkTarget` if a readlink fails under `strict_link_target_read`.
    /// Broken links are not errors.
    pub fn run(self) -> Result<Listing, ListingError> {
        let path = self.path.ok_or_else(|| {
            ListingError::InvalidSource("no path provided".into())
        })?;

        run(self.filesystem.as_ref(), &path, self.config)
    }
}

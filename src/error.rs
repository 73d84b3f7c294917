use std::path::PathBuf;
use thiserror::Error;

use crate::value::Value;

#[derive(Error, Debug)]
pub enum ListingError {
    // Enumeration
    #[error("cannot read directory {}", path.display())]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Per-entry
    #[error("cannot stat {}", path.display())]
    EntryStat {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot read link target of {}", path.display())]
    LinkTarget {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot resolve link {}", path.display())]
    LinkResolution {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Config
    #[error("invalid source: {0}")]
    InvalidSource(String),
}

impl ListingError {
    /// The path this error occurred at, if applicable.
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::DirectoryRead { path, .. }
            | Self::EntryStat { path, .. }
            | Self::LinkTarget { path, .. }
            | Self::LinkResolution { path, .. } => Some(path),
            Self::InvalidSource(_) => None,
        }
    }

    /// Whether the engine or the process boundary recovers from this error.
    ///
    /// Link resolution failures become `broken = true` on the entry, and a
    /// failed directory read can be reported on the error channel. Everything
    /// else aborts the listing.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::DirectoryRead { .. } | Self::LinkResolution { .. })
    }

    fn io_source(&self) -> Option<&std::io::Error> {
        match self {
            Self::DirectoryRead { source, .. }
            | Self::EntryStat { source, .. }
            | Self::LinkTarget { source, .. }
            | Self::LinkResolution { source, .. } => Some(source),
            Self::InvalidSource(_) => None,
        }
    }

    /// Raw platform error number, or 0 when the error carries none.
    pub fn errno(&self) -> i32 {
        self.io_source()
            .and_then(std::io::Error::raw_os_error)
            .unwrap_or(0)
    }

    /// Platform description of the error, e.g. `No such file or directory`.
    pub fn message(&self) -> String {
        match self.io_source() {
            Some(source) => strip_os_error_suffix(source),
            None         => self.to_string(),
        }
    }

    /// The `{"errno": .., "message": ..}` mapping written to the error channel.
    pub fn to_payload(&self) -> Value {
        Value::Map(vec![
            ("errno",   Value::Int(i64::from(self.errno()))),
            ("message", Value::str(self.message())),
        ])
    }
}

/// `io::Error`'s Display appends ` (os error N)` to the strerror text.
fn strip_os_error_suffix(err: &std::io::Error) -> String {
    let text = err.to_string();
    match err.raw_os_error() {
        Some(code) => {
            let suffix = format!(" (os error {code})");
            text.strip_suffix(&suffix).map_or_else(|| text.clone(), str::to_owned)
        }
        None => text,
    }
}

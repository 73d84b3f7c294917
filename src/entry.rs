use std::ffi::OsString;
use std::os::unix::ffi::OsStrExt;
use std::path::PathBuf;

use crate::value::Value;

/// File type bits of `st_mode`.
const S_IFMT: u32 = 0o170_000;
/// Symbolic link type.
const S_IFLNK: u32 = 0o120_000;

/// One child of the listed directory.
///
/// Built once by the describer and never mutated. `link` is present iff the
/// entry's own (lstat) metadata says it is a symbolic link.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectoryEntry {
    /// Base name as returned by the directory read.
    pub name: OsString,

    /// Parent joined with `name`. Not canonicalized.
    pub abspath: PathBuf,

    /// Link resolution status, for symbolic links only.
    pub link: Option<LinkInfo>,

    /// The link's own metadata if broken, the target's if it resolved,
    /// the entry's own otherwise.
    pub stat: Stat,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkInfo {
    /// Raw text stored in the link. `None` when reading it failed.
    pub target: Option<PathBuf>,

    /// Following the link to its final metadata failed.
    pub broken: bool,
}

/// The metadata block of an entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stat {
    pub mode:  u32,
    pub uid:   u32,
    pub gid:   u32,
    pub size:  u64,
    pub atime: f64,
    pub mtime: f64,
    pub ctime: f64,
}

impl Stat {
    /// Whether the type bits in `mode` say "symbolic link".
    pub fn is_symlink(&self) -> bool {
        self.mode & S_IFMT == S_IFLNK
    }

    pub(crate) fn from_metadata(md: &std::fs::Metadata) -> Self {
        use std::os::unix::fs::MetadataExt;

        Self {
            mode:  md.mode(),
            uid:   md.uid(),
            gid:   md.gid(),
            size:  md.size(),
            atime: seconds(md.atime(), md.atime_nsec()),
            mtime: seconds(md.mtime(), md.mtime_nsec()),
            ctime: seconds(md.ctime(), md.ctime_nsec()),
        }
    }

    pub fn to_value(&self) -> Value {
        Value::Map(vec![
            ("mode",  Value::UInt(u64::from(self.mode))),
            ("uid",   Value::UInt(u64::from(self.uid))),
            ("gid",   Value::UInt(u64::from(self.gid))),
            ("size",  Value::UInt(self.size)),
            ("atime", Value::Float(self.atime)),
            ("mtime", Value::Float(self.mtime)),
            ("ctime", Value::Float(self.ctime)),
        ])
    }
}

fn seconds(secs: i64, nsec: i64) -> f64 {
    secs as f64 + nsec as f64 * 1e-9
}

impl LinkInfo {
    pub fn to_value(&self) -> Value {
        let target = self
            .target
            .as_ref()
            .map(|t| Value::str(t.as_os_str().as_bytes()));
        Value::Map(vec![
            ("target", target.into()),
            ("broken", self.broken.into()),
        ])
    }
}

impl DirectoryEntry {
    /// Key order: name, abspath, link (symlinks only), stat.
    pub fn to_value(&self) -> Value {
        let mut pairs = vec![
            ("name",    Value::str(self.name.as_bytes())),
            ("abspath", Value::str(self.abspath.as_os_str().as_bytes())),
        ];
        if let Some(link) = &self.link {
            pairs.push(("link", link.to_value()));
        }
        pairs.push(("stat", self.stat.to_value()));
        Value::Map(pairs)
    }
}

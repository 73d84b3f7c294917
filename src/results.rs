use std::io::{self, Write};

use crate::entry::DirectoryEntry;
use crate::value::{self, Value};

/// The output of one listing: every child of the directory, in the order
/// the directory read returned them.
#[derive(Debug, Clone, PartialEq)]
pub struct Listing {
    pub entries: Vec<DirectoryEntry>,
}

impl Listing {
    pub fn to_value(&self) -> Value {
        Value::Seq(self.entries.iter().map(DirectoryEntry::to_value).collect())
    }

    /// The serialized document, ending at the closing bracket.
    pub fn to_bytes(&self) -> Vec<u8> {
        value::to_bytes(&self.to_value())
    }

    /// Serialize into `out` in a single write.
    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        out.write_all(&self.to_bytes())?;
        out.flush()
    }
}

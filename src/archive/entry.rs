//! Archive entry module.
//!
//! This module contains the representation of one raw entry taken
//! out of the mailbox archive.

/// Represents one raw inbox entry of the mailbox archive. The entry
/// is transient: it only lives between container decoding and record
/// parsing, then gets discarded.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ArchiveEntry {
    /// Represents the path of the entry inside the container.
    pub path: String,
    /// Represents the full markup content of the entry.
    pub content: String,
}

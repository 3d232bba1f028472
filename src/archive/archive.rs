//! Archive module.
//!
//! This module contains everything needed to extract inbox entries
//! out of a compressed mailbox export.

use log::{debug, trace, warn};
use serde::{Deserialize, Serialize};
use std::{
    io::{self, Cursor, Read},
    result,
};
use thiserror::Error;
use zip::ZipArchive;

use super::ArchiveEntry;

#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot open mailbox archive")]
    OpenArchiveError(#[source] zip::result::ZipError),
    #[error("cannot read archive entry at index {1}")]
    ReadEntryError(#[source] zip::result::ZipError, usize),
    #[error("cannot read content of archive entry {1}")]
    ReadEntryContentError(#[source] io::Error, String),
    #[error("archive entry {0} exceeds the size limit of {1} bytes")]
    EntryTooLargeError(String, u64),
    #[error("archive contains more than {0} entries")]
    TooManyEntriesError(usize),
}

pub type Result<T> = result::Result<T, Error>;

/// Represents the default directory prefix of inbox entries inside
/// the container.
pub const DEFAULT_ENTRY_PREFIX: &str = "Inbox/";

/// Represents the default file suffix of message entries.
pub const DEFAULT_ENTRY_SUFFIX: &str = ".xml";

const DEFAULT_MAX_ENTRIES: usize = 100_000;
const DEFAULT_MAX_ENTRY_SIZE: u64 = 4 * 1024 * 1024;

/// Represents the archive reading configuration.
#[derive(Debug, Default, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArchiveConfig {
    /// Represents the directory prefix of inbox entries. Defaults to
    /// [`DEFAULT_ENTRY_PREFIX`].
    pub entry_prefix: Option<String>,
    /// Represents the file suffix of message entries. Defaults to
    /// [`DEFAULT_ENTRY_SUFFIX`].
    pub entry_suffix: Option<String>,
    /// Represents the maximum number of container entries before the
    /// archive gets rejected.
    pub max_entries: Option<usize>,
    /// Represents the maximum decompressed size in bytes of one
    /// entry before the archive gets rejected.
    pub max_entry_size: Option<u64>,
}

impl ArchiveConfig {
    pub fn entry_prefix(&self) -> &str {
        self.entry_prefix.as_deref().unwrap_or(DEFAULT_ENTRY_PREFIX)
    }

    pub fn entry_suffix(&self) -> &str {
        self.entry_suffix.as_deref().unwrap_or(DEFAULT_ENTRY_SUFFIX)
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries.unwrap_or(DEFAULT_MAX_ENTRIES)
    }

    pub fn max_entry_size(&self) -> u64 {
        self.max_entry_size.unwrap_or(DEFAULT_MAX_ENTRY_SIZE)
    }
}

/// Extracts the inbox entries of the given mailbox archive. Entries
/// are read fully into memory as text, in whatever order the
/// container exposes: ordering only gets established later, when a
/// classified view is built.
pub fn read_entries(bytes: &[u8], config: &ArchiveConfig) -> Result<Vec<ArchiveEntry>> {
    let mut archive = ZipArchive::new(Cursor::new(bytes)).map_err(Error::OpenArchiveError)?;

    if archive.len() > config.max_entries() {
        return Err(Error::TooManyEntriesError(config.max_entries()));
    }

    let max_size = config.max_entry_size();
    let mut entries = Vec::new();

    for index in 0..archive.len() {
        let mut file = archive
            .by_index(index)
            .map_err(|err| Error::ReadEntryError(err, index))?;

        if !file.is_file() {
            continue;
        }

        let path = file.name().to_owned();

        if !path.starts_with(config.entry_prefix()) || !path.ends_with(config.entry_suffix()) {
            trace!("skipping non-inbox entry {:?}", path);
            continue;
        }

        if file.size() > max_size {
            return Err(Error::EntryTooLargeError(path, max_size));
        }

        // the declared size comes from the container header and can
        // lie, so the actual read is capped as well
        let mut buf = Vec::new();
        let read = file
            .by_ref()
            .take(max_size + 1)
            .read_to_end(&mut buf)
            .map_err(|err| Error::ReadEntryContentError(err, path.clone()))?;
        if read as u64 > max_size {
            return Err(Error::EntryTooLargeError(path, max_size));
        }

        // an undecodable entry is a bad message, not a bad container:
        // it gets skipped like any other unparsable entry
        let content = match String::from_utf8(buf) {
            Ok(content) => content,
            Err(_) => {
                warn!("skipping undecodable archive entry {:?}", path);
                continue;
            }
        };

        trace!("extracted inbox entry {:?}", path);
        entries.push(ArchiveEntry { path, content });
    }

    debug!("extracted {} inbox entries", entries.len());
    Ok(entries)
}

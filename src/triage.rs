//! Triage module.
//!
//! This module contains the archive load state machine and the
//! classification facade exposed to hosts. A session owns one
//! immutable record set at a time: classification queries never
//! mutate it, and a new archive load replaces it wholesale.

use chrono::{DateTime, Local};
use log::{debug, warn};
use rayon::prelude::*;
use std::{collections::HashSet, fs, io, path::PathBuf, result};
use thiserror::Error;

use crate::{
    archive,
    domain::{record::parser, view::formatter},
    ArchiveConfig, Category, CategoryRule, ClassifiedView, Record, Records, Ruleset, RulesetConfig,
};

#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot read mailbox archive at {1}")]
    ReadArchiveFileError(#[source] io::Error, PathBuf),

    #[error(transparent)]
    ArchiveError(#[from] archive::Error),
}

pub type Result<T> = result::Result<T, Error>;

/// Represents the load state of a triage session. The state is plain
/// data so a host polling it from another thread always observes a
/// coherent value.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum LoadState {
    #[default]
    Unloaded,
    Loading,
    Loaded,
    LoadFailed,
}

/// Represents a triage session over one mailbox archive.
#[derive(Debug)]
pub struct Triage {
    archive_config: ArchiveConfig,
    ruleset: Ruleset,
    state: LoadState,
    /// Represents the last successfully loaded record set. `None`
    /// until a first load succeeded; a failed reload leaves it
    /// untouched and still shown, only the state reports the
    /// failure.
    records: Option<Records>,
}

impl Triage {
    pub fn new(archive_config: ArchiveConfig, ruleset_config: RulesetConfig) -> Self {
        Self {
            archive_config,
            ruleset: Ruleset::new(ruleset_config),
            state: LoadState::Unloaded,
            records: None,
        }
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    /// Returns the ordered rule list so a host can render category
    /// controls.
    pub fn rules(&self) -> &[CategoryRule] {
        self.ruleset.rules()
    }

    /// Returns the number of records of the last successful load,
    /// `None` until a first archive load succeeded.
    pub fn record_count(&self) -> Option<usize> {
        self.records.as_ref().map(|records| records.len())
    }

    /// Reads the mailbox archive at the given path and loads it. An
    /// unreadable file is an archive-level failure, same as an
    /// invalid container.
    pub fn load_file<P: Into<PathBuf>>(&mut self, path: P) -> Result<usize> {
        let path = path.into();
        debug!("loading mailbox archive at {:?}", path);
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(err) => {
                self.state = LoadState::LoadFailed;
                return Err(Error::ReadArchiveFileError(err, path));
            }
        };
        self.load_bytes(&bytes)
    }

    /// Runs one full archive load: container decoding, per-entry
    /// parsing, deduplication, then one atomic swap of the record
    /// set. An invalid container fails the load and publishes
    /// nothing, leaving any previously loaded set untouched; an
    /// unparsable entry only gets skipped. Returns the number of
    /// loaded records.
    pub fn load_bytes(&mut self, bytes: &[u8]) -> Result<usize> {
        self.state = LoadState::Loading;

        let entries = match archive::read_entries(bytes, &self.archive_config) {
            Ok(entries) => entries,
            Err(err) => {
                self.state = LoadState::LoadFailed;
                return Err(err.into());
            }
        };

        // entries parse independently into immutable records, so the
        // batch fans out across threads
        let mut records: Vec<Record> = entries
            .par_iter()
            .filter_map(
                |entry| match parser::parse_record(&entry.path, &entry.content) {
                    Ok(record) => Some(record),
                    Err(err) => {
                        warn!("skipping archive entry: {}", err);
                        None
                    }
                },
            )
            .collect();

        let total = records.len();
        let mut seen = HashSet::new();
        records.retain(|record| seen.insert(record.id.clone()));
        if records.len() < total {
            debug!("dropped {} duplicated records", total - records.len());
        }

        let count = records.len();
        self.records = Some(Records { records });
        self.state = LoadState::Loaded;
        debug!("loaded {} records", count);
        Ok(count)
    }

    /// Classifies and ranks the loaded records for one category.
    /// `None` until a first archive load succeeded; after a failed
    /// reload the previously loaded set keeps being served. An empty
    /// category yields [`ClassifiedView::Empty`], not `None`.
    pub fn classified_view(
        &self,
        category: Category,
        now: DateTime<Local>,
    ) -> Option<ClassifiedView> {
        self.records
            .as_ref()
            .map(|records| formatter::rank(records, &self.ruleset, category, now))
    }

    /// Same as [`Triage::classified_view`], keyed by the category
    /// identifier a host-side control usually carries.
    pub fn classified_view_by_name(
        &self,
        name: &str,
        now: DateTime<Local>,
    ) -> Option<ClassifiedView> {
        Category::from_name(name).and_then(|category| self.classified_view(category, now))
    }
}

//! Classified view module.
//!
//! This module contains the representation of the sorted, filtered
//! projection of records for one category.

use serde::Serialize;

use crate::Icon;

/// Represents one displayable row of a classified view.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct ViewRecord {
    /// Represents the icon selected by the rule's icon policy.
    pub icon: Icon,
    /// Represents the sender address label.
    pub addr_label: String,
    /// Represents the sender display name label, `None` when the
    /// source message carries no display name.
    pub name_label: Option<String>,
    /// Represents the subject label.
    pub subject_label: String,
    /// Represents the rendered received time, empty for records with
    /// no parsable timestamp.
    pub display_timestamp: String,
    /// Represents the display hint for messages received within the
    /// last day. Purely presentational: it affects neither order nor
    /// category.
    pub recent: bool,
}

/// Represents the outcome of one classification query. An empty
/// category is a normal value, explicitly distinct from the absence
/// of a loaded record set.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub enum ClassifiedView {
    /// No loaded record matches the category.
    Empty,
    /// The matching records, most recent first.
    Ranked(Vec<ViewRecord>),
}

impl ClassifiedView {
    pub fn records(&self) -> &[ViewRecord] {
        match self {
            Self::Empty => &[],
            Self::Ranked(records) => records,
        }
    }

    pub fn len(&self) -> usize {
        self.records().len()
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

//! Records module.
//!
//! This module contains the representation of the list of message
//! records produced by one archive load.

use serde::Serialize;
use std::ops;

use super::Record;

/// Represents the list of message records. The list is owned by the
/// triage session and replaced wholesale on the next archive load.
#[derive(Debug, Default, Serialize)]
pub struct Records {
    pub records: Vec<Record>,
}

impl ops::Deref for Records {
    type Target = Vec<Record>;

    fn deref(&self) -> &Self::Target {
        &self.records
    }
}

impl ops::DerefMut for Records {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.records
    }
}

impl FromIterator<Record> for Records {
    fn from_iter<T: IntoIterator<Item = Record>>(iter: T) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

//! Record parser module.
//!
//! This module turns the markup payload of one archive entry into a
//! normalized message record. Missing fields get documented defaults
//! so one sloppy message never aborts a batch; only markup that is
//! not well-formed at all raises an error.

use log::trace;
use quick_xml::de::from_str;
use serde::Deserialize;
use std::result;
use thiserror::Error;

use super::{record, Record, DEFAULT_SUBJECT_PLACEHOLDER};

#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot parse message entry {1}")]
    ParseEntryError(#[source] quick_xml::DeError, String),
}

pub type Result<T> = result::Result<T, Error>;

/// Represents the raw markup shape of one message entry. Every field
/// is optional: absence is handled by defaulting, not by erroring.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename = "message")]
struct RawMessage {
    subject: Option<String>,
    #[serde(rename = "receivedTime")]
    received_time: Option<String>,
    from: Option<RawFrom>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawFrom {
    #[serde(rename = "@email")]
    email: Option<String>,
    #[serde(rename = "@name")]
    name: Option<String>,
}

/// Parses one archive entry into a message record. The entry path is
/// only used to point at the offending entry in error reports.
pub fn parse_record(path: &str, content: &str) -> Result<Record> {
    trace!(">> build record from archive entry {:?}", path);

    let raw: RawMessage =
        from_str(content).map_err(|err| Error::ParseEntryError(err, path.to_owned()))?;

    let mut record = Record::default();

    let from = raw.from.unwrap_or_default();
    record.sender_addr = from.email.unwrap_or_default().trim().to_lowercase();
    record.sender_name = from.name.unwrap_or_default().trim().to_owned();

    record.subject = match raw.subject.as_deref().map(str::trim) {
        Some(subject) if !subject.is_empty() => subject.to_owned(),
        _ => DEFAULT_SUBJECT_PLACEHOLDER.to_owned(),
    };

    record.received_at = raw
        .received_time
        .as_deref()
        .and_then(record::parse_received_time);

    record.id = record.hash();

    trace!("record: {:?}", record);
    trace!("<< build record from archive entry");
    Ok(record)
}

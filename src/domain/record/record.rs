//! Record module.
//!
//! This module contains the representation of the normalized message
//! record, the durable unit of work of the whole pipeline.

use chrono::{DateTime, Local, NaiveDateTime, TimeZone};
use serde::{Serialize, Serializer};

/// Represents the subject used when the source message carries none.
pub const DEFAULT_SUBJECT_PLACEHOLDER: &str = "(no subject)";

fn date<S: Serializer>(date: &Option<DateTime<Local>>, s: S) -> Result<S::Ok, S::Error> {
    match date {
        Some(date) => s.serialize_str(&date.to_rfc3339()),
        None => s.serialize_none(),
    }
}

/// Represents the normalized message record extracted from one
/// archive entry. The record is just a message subset, and is mostly
/// used for classification and listings. It is immutable after
/// creation: a new archive load replaces the whole record set.
#[derive(Clone, Debug, Default, Eq, Serialize)]
pub struct Record {
    /// Represents the identifier, also used as the deduplication
    /// key across archive entries.
    pub id: String,
    /// Represents the lower-cased sender email address. Empty when
    /// the source message carries none, never absent.
    pub sender_addr: String,
    /// Represents the sender display name. Empty when the source
    /// message carries none, never absent.
    pub sender_name: String,
    /// Represents the Subject field, defaulted to
    /// [`DEFAULT_SUBJECT_PLACEHOLDER`] when missing.
    pub subject: String,
    #[serde(serialize_with = "date")]
    /// Represents the received time. `None` is the invalid-timestamp
    /// sentinel: such records sort last and are never recent.
    pub received_at: Option<DateTime<Local>>,
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.sender_addr == other.sender_addr
            && self.sender_name == other.sender_name
            && self.subject == other.subject
            && self.received_at == other.received_at
    }
}

impl Record {
    /// Builds the record hash using the sender address, the sender
    /// display name, the subject and the received time. The same
    /// message exported under two entry paths collapses to the same
    /// hash.
    pub fn hash(&self) -> String {
        let date = self
            .received_at
            .map(|date| date.to_rfc3339())
            .unwrap_or_default();
        let hash = md5::compute(
            self.sender_addr.clone() + &self.sender_name + &self.subject + &date,
        );
        format!("{:x}", hash)
    }
}

/// Parses the source date string of a message entry. This is the
/// single conversion point for the export's timestamp format: bad
/// input yields the `None` sentinel, never an error, so the sort and
/// recency logic downstream stays total.
pub fn parse_received_time(date: &str) -> Option<DateTime<Local>> {
    let date = date.trim();
    if date.is_empty() {
        return None;
    }

    DateTime::parse_from_rfc3339(date)
        .or_else(|_| DateTime::parse_from_rfc2822(date))
        .ok()
        .map(|date| date.with_timezone(&Local))
        .or_else(|| {
            NaiveDateTime::parse_from_str(date, "%Y-%m-%d %H:%M:%S")
                .or_else(|_| NaiveDateTime::parse_from_str(date, "%Y-%m-%dT%H:%M:%S"))
                .ok()
                .and_then(|naive| Local.from_local_datetime(&naive).earliest())
        })
}

#[cfg(test)]
mod tests {
    use chrono::{Datelike, Timelike};

    use super::*;

    #[test]
    fn parse_received_time_from_known_formats() {
        let date = parse_received_time("2022-12-05T09:30:00+01:00").unwrap();
        assert_eq!(2022, date.year());

        let date = parse_received_time("Mon, 5 Dec 2022 09:30:00 +0100").unwrap();
        assert_eq!(9, date.with_timezone(&chrono::FixedOffset::east_opt(3600).unwrap()).hour());

        let date = parse_received_time("2022-12-05 09:30:00").unwrap();
        assert_eq!(5, date.day());

        let date = parse_received_time("2022-12-05T09:30:00").unwrap();
        assert_eq!(30, date.minute());
    }

    #[test]
    fn parse_received_time_sentinel_on_bad_input() {
        assert_eq!(None, parse_received_time(""));
        assert_eq!(None, parse_received_time("   "));
        assert_eq!(None, parse_received_time("yesterday"));
        assert_eq!(None, parse_received_time("2022-13-40 99:99:99"));
    }

    #[test]
    fn same_message_under_two_paths_shares_one_hash() {
        let record = Record {
            sender_addr: "jane.doe@example.edu".into(),
            sender_name: "Jane Doe".into(),
            subject: "Hello".into(),
            received_at: parse_received_time("2022-12-05 09:30:00"),
            ..Record::default()
        };

        assert_eq!(record.hash(), record.clone().hash());

        let other = Record {
            subject: "Hello again".into(),
            ..record.clone()
        };
        assert_ne!(record.hash(), other.hash());
    }
}

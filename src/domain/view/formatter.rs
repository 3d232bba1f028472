//! View formatter module.
//!
//! This module contains the ranking and rendering of classified
//! views. Everything here is pure: the same record set and the same
//! clock always produce the same view, so queries can be repeated
//! and run concurrently without coordination.

use chrono::{DateTime, Duration, Local};
use std::cmp::Ordering;

use crate::{Category, CategoryRule, ClassifiedView, Record, Records, Ruleset, ViewRecord};

/// Represents the age under which a record gets the recent display
/// hint.
pub const RECENT_WINDOW_HOURS: i64 = 24;

const DISPLAY_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Builds the classified view of the given record set for one
/// category: matching records only, most recent first, records with
/// no parsable timestamp last. The clock is a parameter so the
/// recency hint stays deterministic under test.
pub fn rank(
    records: &Records,
    ruleset: &Ruleset,
    category: Category,
    now: DateTime<Local>,
) -> ClassifiedView {
    let mut matched: Vec<&Record> = records
        .iter()
        .filter(|record| ruleset.matches(category, record))
        .collect();

    if matched.is_empty() {
        return ClassifiedView::Empty;
    }

    matched.sort_by(|a, b| match (a.received_at, b.received_at) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });

    let rule = ruleset.rule(category);
    ClassifiedView::Ranked(
        matched
            .into_iter()
            .map(|record| view_record(record, rule, now))
            .collect(),
    )
}

fn view_record(record: &Record, rule: &CategoryRule, now: DateTime<Local>) -> ViewRecord {
    let recent = record
        .received_at
        .map(|date| now.signed_duration_since(date) <= Duration::hours(RECENT_WINDOW_HOURS))
        .unwrap_or_default();

    ViewRecord {
        icon: rule.icon_policy.icon_for(&record.sender_name),
        addr_label: record.sender_addr.clone(),
        name_label: match record.sender_name.as_str() {
            "" => None,
            name => Some(name.to_owned()),
        },
        subject_label: record.subject.clone(),
        display_timestamp: record
            .received_at
            .map(|date| date.format(DISPLAY_TIMESTAMP_FORMAT).to_string())
            .unwrap_or_default(),
        recent,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use crate::{Icon, RulesetConfig};

    use super::*;

    fn ruleset() -> Ruleset {
        Ruleset::new(RulesetConfig {
            faculty_domain: "example.edu".into(),
            lms_domain: "lms.example.edu".into(),
            events_domain: "events.example.com".into(),
            system_local_parts: HashSet::from_iter(["noreply".to_string()]),
            ..RulesetConfig::default()
        })
    }

    fn record(addr: &str, name: &str, subject: &str, received_at: Option<DateTime<Local>>) -> Record {
        let mut record = Record {
            sender_addr: addr.into(),
            sender_name: name.into(),
            subject: subject.into(),
            received_at,
            ..Record::default()
        };
        record.id = record.hash();
        record
    }

    #[test]
    fn rank_sorts_most_recent_first_and_sentinel_last() {
        let now = Local::now();
        let records = Records::from_iter([
            record(
                "a@example.edu",
                "Jane Doe",
                "three days old",
                Some(now - Duration::days(3)),
            ),
            record(
                "b@example.edu",
                "John Roe",
                "one hour old",
                Some(now - Duration::hours(1)),
            ),
            record(
                "c@example.edu",
                "Kim Lee",
                "ten days old",
                Some(now - Duration::days(10)),
            ),
            record("d@example.edu", "Sam Poe", "no date", None),
        ]);

        let view = rank(&records, &ruleset(), Category::Faculty, now);
        let subjects: Vec<_> = view
            .records()
            .iter()
            .map(|record| record.subject_label.as_str())
            .collect();

        assert_eq!(
            vec!["one hour old", "three days old", "ten days old", "no date"],
            subjects
        );
    }

    #[test]
    fn rank_flags_records_from_the_last_day_as_recent() {
        let now = Local::now();
        let records = Records::from_iter([
            record(
                "a@example.edu",
                "Jane Doe",
                "recent",
                Some(now - Duration::hours(2)),
            ),
            record(
                "b@example.edu",
                "John Roe",
                "stale",
                Some(now - Duration::hours(30)),
            ),
            record("c@example.edu", "Sam Poe", "no date", None),
        ]);

        let view = rank(&records, &ruleset(), Category::Faculty, now);
        let recents: Vec<_> = view
            .records()
            .iter()
            .map(|record| (record.subject_label.as_str(), record.recent))
            .collect();

        assert_eq!(
            vec![("recent", true), ("stale", false), ("no date", false)],
            recents
        );
    }

    #[test]
    fn rank_renders_view_fields() {
        let now = Local::now();
        let records = Records::from_iter([
            record(
                "jane.doe@example.edu",
                "Jane Doe",
                "Office hours",
                Some(now - Duration::hours(1)),
            ),
            record("records@example.edu", "Office of Records", "Transcript", None),
            record("anon@example.edu", "", "Anonymous tip", None),
        ]);

        let view = rank(&records, &ruleset(), Category::Faculty, now);
        let records = view.records();

        assert_eq!(Icon::Individual, records[0].icon);
        assert_eq!(Some("Jane Doe".to_owned()), records[0].name_label);
        assert!(!records[0].display_timestamp.is_empty());

        assert_eq!(Icon::Institution, records[1].icon);
        assert_eq!("", records[1].display_timestamp);

        assert_eq!(None, records[2].name_label);
    }

    #[test]
    fn rank_returns_the_empty_marker() {
        let now = Local::now();

        let view = rank(&Records::default(), &ruleset(), Category::Lms, now);
        assert_eq!(ClassifiedView::Empty, view);
        assert!(view.is_empty());
        assert_eq!(0, view.len());

        // records exist, none of them matches the category
        let records = Records::from_iter([record(
            "deals@shop.example.net",
            "",
            "Sale",
            Some(now),
        )]);
        assert_eq!(
            ClassifiedView::Empty,
            rank(&records, &ruleset(), Category::Lms, now)
        );
    }
}

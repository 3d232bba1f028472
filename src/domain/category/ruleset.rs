//! Ruleset module.
//!
//! This module contains the ordered classification ruleset: the pure
//! classification function plus the configuration it evaluates
//! against. Domains and the excluded local-part set vary across
//! deployments, so none of them is hard-coded.

use log::trace;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::Record;

use super::{Category, CategoryRule, Icon, IconPolicy};

pub const DEFAULT_FACULTY_COLOR: &str = "#2563eb";
pub const DEFAULT_LMS_COLOR: &str = "#16a34a";
pub const DEFAULT_EVENTS_COLOR: &str = "#d97706";
pub const DEFAULT_EXTERNAL_COLOR: &str = "#64748b";

/// Represents the classification configuration.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesetConfig {
    /// Represents the institutional domain of faculty senders.
    pub faculty_domain: String,
    /// Represents the learning management platform domain.
    pub lms_domain: String,
    /// Represents the events platform domain.
    pub events_domain: String,
    /// Represents the no-reply/system local parts at the
    /// institutional domain. Mail from them classifies as events
    /// instead of faculty.
    pub system_local_parts: HashSet<String>,

    /// Represents the display color overrides, one per rule.
    pub faculty_color: Option<String>,
    pub lms_color: Option<String>,
    pub events_color: Option<String>,
    pub external_color: Option<String>,
}

/// Represents the ordered classification ruleset. Rules are
/// evaluated top to bottom, first match wins, and the last rule is
/// the negation of the first three: classification is total by
/// construction and has no error path.
#[derive(Clone, Debug)]
pub struct Ruleset {
    config: RulesetConfig,
    rules: [CategoryRule; 4],
}

impl Ruleset {
    pub fn new(config: RulesetConfig) -> Self {
        // address matching is case-insensitive, normalize once
        let config = RulesetConfig {
            faculty_domain: config.faculty_domain.trim().to_lowercase(),
            lms_domain: config.lms_domain.trim().to_lowercase(),
            events_domain: config.events_domain.trim().to_lowercase(),
            system_local_parts: config
                .system_local_parts
                .iter()
                .map(|local| local.trim().to_lowercase())
                .collect(),
            ..config
        };

        let rules = [
            CategoryRule {
                category: Category::Faculty,
                label: "University/Faculty".into(),
                color: config
                    .faculty_color
                    .clone()
                    .unwrap_or_else(|| DEFAULT_FACULTY_COLOR.into()),
                icon_policy: IconPolicy::NameTokens,
            },
            CategoryRule {
                category: Category::Lms,
                label: "Campus LMS".into(),
                color: config
                    .lms_color
                    .clone()
                    .unwrap_or_else(|| DEFAULT_LMS_COLOR.into()),
                icon_policy: IconPolicy::Fixed(Icon::Courseware),
            },
            CategoryRule {
                category: Category::Events,
                label: "Campus Events".into(),
                color: config
                    .events_color
                    .clone()
                    .unwrap_or_else(|| DEFAULT_EVENTS_COLOR.into()),
                icon_policy: IconPolicy::Fixed(Icon::Megaphone),
            },
            CategoryRule {
                category: Category::External,
                label: "External Resources".into(),
                color: config
                    .external_color
                    .clone()
                    .unwrap_or_else(|| DEFAULT_EXTERNAL_COLOR.into()),
                icon_policy: IconPolicy::Fixed(Icon::Globe),
            },
        ];

        Self { config, rules }
    }

    /// Returns the ordered rule list, so a host can render category
    /// controls straight from the data.
    pub fn rules(&self) -> &[CategoryRule] {
        &self.rules
    }

    pub fn rule(&self, category: Category) -> &CategoryRule {
        match category {
            Category::Faculty => &self.rules[0],
            Category::Lms => &self.rules[1],
            Category::Events => &self.rules[2],
            Category::External => &self.rules[3],
        }
    }

    /// Classifies the record into exactly one category.
    pub fn classify(&self, record: &Record) -> Category {
        let addr = record.sender_addr.trim().to_lowercase();

        let category = if self.is_faculty(&addr) {
            Category::Faculty
        } else if self.is_lms(&addr) {
            Category::Lms
        } else if self.is_events(&addr) {
            Category::Events
        } else {
            Category::External
        };

        trace!("classified {:?} as {}", record.sender_addr, category);
        category
    }

    /// Returns true when the record classifies into the given
    /// category. Precedence is baked in: a record matching an
    /// earlier rule never matches a later one.
    pub fn matches(&self, category: Category, record: &Record) -> bool {
        self.classify(record) == category
    }

    fn is_faculty(&self, addr: &str) -> bool {
        match addr.rsplit_once('@') {
            Some((local, domain)) => {
                !self.config.faculty_domain.is_empty()
                    && domain == self.config.faculty_domain
                    && !self.config.system_local_parts.contains(local)
            }
            None => false,
        }
    }

    fn is_lms(&self, addr: &str) -> bool {
        match addr.rsplit_once('@') {
            Some((_, domain)) => {
                !self.config.lms_domain.is_empty() && domain == self.config.lms_domain
            }
            None => false,
        }
    }

    fn is_events(&self, addr: &str) -> bool {
        match addr.rsplit_once('@') {
            Some((local, domain)) => {
                let system_sender = !self.config.faculty_domain.is_empty()
                    && domain == self.config.faculty_domain
                    && self.config.system_local_parts.contains(local);
                let events_platform = !self.config.events_domain.is_empty()
                    && domain == self.config.events_domain;
                system_sender || events_platform
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn ruleset() -> Ruleset {
        Ruleset::new(RulesetConfig {
            faculty_domain: "example.edu".into(),
            lms_domain: "lms.example.edu".into(),
            events_domain: "events.example.com".into(),
            system_local_parts: HashSet::from_iter(["noreply".to_string(), "newsletter".into()]),
            ..RulesetConfig::default()
        })
    }

    fn record(addr: &str) -> Record {
        Record {
            sender_addr: addr.into(),
            ..Record::default()
        }
    }

    #[test]
    fn classify_follows_rule_precedence() {
        let ruleset = ruleset();

        assert_eq!(
            Category::Faculty,
            ruleset.classify(&record("jane.doe@example.edu"))
        );
        assert_eq!(
            Category::Lms,
            ruleset.classify(&record("courses@lms.example.edu"))
        );
        assert_eq!(
            Category::Events,
            ruleset.classify(&record("noreply@example.edu"))
        );
        assert_eq!(
            Category::Events,
            ruleset.classify(&record("invites@events.example.com"))
        );
        assert_eq!(
            Category::External,
            ruleset.classify(&record("deals@shop.example.net"))
        );
    }

    #[test]
    fn classify_is_case_insensitive() {
        let ruleset = ruleset();

        assert_eq!(
            Category::Faculty,
            ruleset.classify(&record("Jane.Doe@Example.EDU"))
        );
        assert_eq!(
            Category::Events,
            ruleset.classify(&record("NoReply@EXAMPLE.edu"))
        );
    }

    #[test]
    fn classify_is_total() {
        let ruleset = ruleset();
        let addrs = [
            "jane.doe@example.edu",
            "courses@lms.example.edu",
            "noreply@example.edu",
            "newsletter@example.edu",
            "invites@events.example.com",
            "someone@elsewhere.org",
            "no-at-sign",
            "",
            "@example.edu",
            "weird@",
        ];

        for addr in addrs {
            let record = record(addr);
            let matched: Vec<_> = Category::ALL
                .into_iter()
                .filter(|category| ruleset.matches(*category, &record))
                .collect();
            assert_eq!(1, matched.len(), "addr {:?} matched {:?}", addr, matched);
            assert_eq!(matched[0], ruleset.classify(&record));
        }
    }

    #[test]
    fn unconfigured_ruleset_classifies_everything_external() {
        let ruleset = Ruleset::new(RulesetConfig::default());

        assert_eq!(
            Category::External,
            ruleset.classify(&record("jane.doe@example.edu"))
        );
        assert_eq!(Category::External, ruleset.classify(&record("")));
    }

    #[test]
    fn faculty_icon_follows_name_tokens() {
        let ruleset = ruleset();
        let policy = ruleset.rule(Category::Faculty).icon_policy;

        assert_eq!(Icon::Individual, policy.icon_for("Jane Doe"));
        assert_eq!(Icon::Institution, policy.icon_for("Office of Records"));
        assert_eq!(Icon::Institution, policy.icon_for(""));
        assert_eq!(Icon::Institution, policy.icon_for("   "));
        assert_eq!(Icon::Institution, policy.icon_for("Jane"));
    }

    #[test]
    fn rules_expose_display_metadata_in_order() {
        let ruleset = ruleset();
        let categories: Vec<_> = ruleset.rules().iter().map(|rule| rule.category).collect();

        assert_eq!(Category::ALL.to_vec(), categories);
        assert_eq!("University/Faculty", ruleset.rule(Category::Faculty).label);
        assert_eq!(DEFAULT_LMS_COLOR, ruleset.rule(Category::Lms).color);
    }
}

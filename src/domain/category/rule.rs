//! Category rule module.
//!
//! This module contains the immutable rule descriptors and their
//! display metadata. Rules carry no predicate of their own: the
//! predicates live in the ruleset so rule definitions cannot couple
//! to each other.

use serde::Serialize;

use super::Category;

/// Represents the icon variants handed to the presentation layer.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub enum Icon {
    Individual,
    Institution,
    Courseware,
    Megaphone,
    Globe,
}

impl Icon {
    /// Returns the glyph the presentation layer renders for the
    /// icon.
    pub fn glyph(&self) -> &'static str {
        match self {
            Icon::Individual => "👤",
            Icon::Institution => "🏛️",
            Icon::Courseware => "📚",
            Icon::Megaphone => "📣",
            Icon::Globe => "🌐",
        }
    }
}

/// Represents the icon selection policy of a rule.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub enum IconPolicy {
    /// Every record of the category shares the same icon.
    Fixed(Icon),
    /// The icon derives from the sender display name: exactly two
    /// whitespace-separated tokens mean an individual, any other
    /// token count an institution.
    NameTokens,
}

impl IconPolicy {
    pub fn icon_for(&self, sender_name: &str) -> Icon {
        match self {
            IconPolicy::Fixed(icon) => *icon,
            IconPolicy::NameTokens => {
                if sender_name.split_whitespace().count() == 2 {
                    Icon::Individual
                } else {
                    Icon::Institution
                }
            }
        }
    }
}

/// Represents one ordered classification rule with its display
/// metadata, exposed as data so a host can render category controls
/// without re-implementing classification.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct CategoryRule {
    /// Represents the category the rule classifies into.
    pub category: Category,
    /// Represents the human-readable label of the rule.
    pub label: String,
    /// Represents the display color of the rule.
    pub color: String,
    /// Represents the icon selection policy of the rule.
    pub icon_policy: IconPolicy,
}

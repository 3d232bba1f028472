//! Category module.
//!
//! This module contains the category variants a message record can
//! classify into.

use serde::Serialize;
use std::fmt;

/// Represents the category variants. The four variants partition the
/// whole input space: [`Category::External`] matches exactly when
/// the other three do not, so every record belongs to one and only
/// one category.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
pub enum Category {
    /// Mail sent by a person at the institutional domain.
    Faculty,
    /// Mail sent by the learning management platform.
    Lms,
    /// Mail sent by campus system senders or the events platform.
    Events,
    /// Everything else.
    External,
}

impl Category {
    /// Represents the rule evaluation order: top to bottom, catch-all
    /// last.
    pub const ALL: [Category; 4] = [
        Category::Faculty,
        Category::Lms,
        Category::Events,
        Category::External,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Faculty => "faculty",
            Category::Lms => "lms",
            Category::Events => "events",
            Category::External => "external",
        }
    }

    /// Finds the category matching the given identifier, used by the
    /// host-facing category selection API.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "faculty" => Some(Category::Faculty),
            "lms" => Some(Category::Lms),
            "events" => Some(Category::Events),
            "external" => Some(Category::External),
            _ => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

//! Validation failure categories.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A single validation rule that a raw name failed.
///
/// Variant order is display priority: when only one message can be shown,
/// the smallest failing code wins (see [`ReasonSet::primary`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReasonCode {
    /// Trimmed input is zero-length.
    Empty,
    /// Trimmed length is outside the configured bounds.
    LengthOutOfRange,
    /// Input contains something other than accepted letters and whitespace.
    InvalidCharacters,
    /// Input contains a blocklisted term.
    ProhibitedContent,
    /// A participant with the same name (ignoring case) already exists.
    Duplicate,
    /// Input is made only of whitespace.
    WhitespaceOnly,
}

impl ReasonCode {
    /// Every code, in priority order.
    pub const ALL: [Self; 6] = [
        Self::Empty,
        Self::LengthOutOfRange,
        Self::InvalidCharacters,
        Self::ProhibitedContent,
        Self::Duplicate,
        Self::WhitespaceOnly,
    ];

    /// Returns the code as a static snake_case string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::LengthOutOfRange => "length_out_of_range",
            Self::InvalidCharacters => "invalid_characters",
            Self::ProhibitedContent => "prohibited_content",
            Self::Duplicate => "duplicate",
            Self::WhitespaceOnly => "whitespace_only",
        }
    }

    /// Returns the message shown to a player who entered a rejected name.
    #[must_use]
    pub const fn message(&self) -> &'static str {
        match self {
            Self::Empty => "Please enter a name",
            Self::LengthOutOfRange => "The name is too short or too long",
            Self::InvalidCharacters => "Only letters and spaces are allowed",
            Self::ProhibitedContent => "Offensive words are not allowed",
            Self::Duplicate => "That name has already been added",
            Self::WhitespaceOnly => "Enter a valid name",
        }
    }
}

impl fmt::Display for ReasonCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered set of [`ReasonCode`]s.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReasonSet(BTreeSet<ReasonCode>);

impl ReasonSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `code` to the set.
    pub fn insert(&mut self, code: ReasonCode) {
        self.0.insert(code);
    }

    /// Adds `code` when `failed` is true.
    pub fn flag(&mut self, code: ReasonCode, failed: bool) {
        if failed {
            self.insert(code);
        }
    }

    /// Returns `true` if `code` is in the set.
    #[must_use]
    pub fn contains(&self, code: ReasonCode) -> bool {
        self.0.contains(&code)
    }

    /// Returns the highest-priority reason, if any.
    #[must_use]
    pub fn primary(&self) -> Option<ReasonCode> {
        self.0.first().copied()
    }

    /// Number of reasons.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if no rule failed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates reasons in priority order.
    pub fn iter(&self) -> impl Iterator<Item = ReasonCode> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<ReasonCode> for ReasonSet {
    fn from_iter<I: IntoIterator<Item = ReasonCode>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for ReasonSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for code in self.iter() {
            if !first {
                f.write_str(", ")?;
            }
            write!(f, "{code}")?;
            first = false;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primary_follows_priority_order() {
        let set = ReasonSet::from_iter([
            ReasonCode::WhitespaceOnly,
            ReasonCode::Duplicate,
            ReasonCode::InvalidCharacters,
        ]);
        assert_eq!(set.primary(), Some(ReasonCode::InvalidCharacters));
        assert_eq!(ReasonSet::new().primary(), None);
    }

    #[test]
    fn flag_only_inserts_failures() {
        let mut set = ReasonSet::new();
        set.flag(ReasonCode::Empty, false);
        set.flag(ReasonCode::Duplicate, true);
        assert_eq!(set.len(), 1);
        assert!(set.contains(ReasonCode::Duplicate));
        assert!(!set.contains(ReasonCode::Empty));
    }

    #[test]
    fn serializes_as_snake_case_list() {
        let set = ReasonSet::from_iter([ReasonCode::ProhibitedContent, ReasonCode::Empty]);
        let json = serde_json::to_string(&set).unwrap_or_default();
        assert_eq!(json, r#"["empty","prohibited_content"]"#);
    }

    #[test]
    fn display_joins_codes() {
        let set = ReasonSet::from_iter([ReasonCode::Duplicate, ReasonCode::LengthOutOfRange]);
        assert_eq!(set.to_string(), "length_out_of_range, duplicate");
    }

    #[test]
    fn all_is_sorted() {
        let mut sorted = ReasonCode::ALL;
        sorted.sort();
        assert_eq!(sorted, ReasonCode::ALL);
    }
}

//! Validated participant name.
//!
//! [`Participant`] is a newtype around the cleaned display name so that raw,
//! unvalidated input cannot be confused with a roster entry. The only way to
//! obtain one outside this crate is through the validator.

use std::fmt;

use serde::Serialize;

/// A validated, normalized display name in the draw pool.
///
/// Equality is exact on the cleaned form; use [`Participant::matches`] for
/// the case-insensitive comparison the roster uniqueness rule relies on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Participant(String);

impl Participant {
    /// Wraps a name that has already been cleaned by the validator.
    #[must_use]
    pub(crate) fn from_cleaned(cleaned: impl Into<String>) -> Self {
        Self(cleaned.into())
    }

    /// Returns the display name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if `name` equals this participant ignoring case and
    /// surrounding whitespace.
    #[must_use]
    pub fn matches(&self, name: &str) -> bool {
        self.0.to_lowercase() == name.trim().to_lowercase()
    }
}

impl fmt::Display for Participant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Participant {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<Participant> for String {
    fn from(participant: Participant) -> Self {
        participant.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_ignores_case_and_padding() {
        let p = Participant::from_cleaned("José Núñez");
        assert!(p.matches("josé núñez"));
        assert!(p.matches("  JOSÉ NÚÑEZ "));
        assert!(!p.matches("Jose Nunez"));
    }

    #[test]
    fn display_is_cleaned_name() {
        let p = Participant::from_cleaned("Ana");
        assert_eq!(format!("{p}"), "Ana");
        assert_eq!(String::from(p), "Ana");
    }

    #[test]
    fn serializes_transparently() {
        let p = Participant::from_cleaned("Beto");
        let json = serde_json::to_string(&p).unwrap_or_default();
        assert_eq!(json, r#""Beto""#);
    }
}

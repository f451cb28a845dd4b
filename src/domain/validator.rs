//! Name validation and normalization.
//!
//! [`NameValidator`] is a pure function object: it checks raw input against
//! the rules in [`ValidatorConfig`] and the current roster, and produces the
//! cleaned form that is stored in the pool. Every rule is evaluated; the
//! resulting [`Validation`] reports all failures at once.

use serde::Serialize;

use super::{Participant, ReasonCode, ReasonSet};

/// Accented letters accepted in names in addition to ASCII letters.
pub const DEFAULT_EXTRA_LETTERS: &str = "áéíóúÁÉÍÓÚñÑ";

/// Offensive terms rejected as substrings of a name (case-insensitive).
pub const DEFAULT_BLOCKLIST: &[&str] = &[
    "idiota",
    "tonto",
    "estupido",
    "malo",
    "feo",
    "burro",
    "pendejo",
    "imbecil",
    "menso",
    "tarado",
    "zopenco",
    "gilipollas",
    "cretino",
    "subnormal",
    "maldito",
    "malparido",
    "hijo de puta",
    "cabron",
    "cabrón",
    "coño",
    "joder",
    "mierda",
    "puta",
    "puto",
    "chinga tu madre",
    "chingada",
    "chingar",
    "verga",
    "pija",
    "culo",
    "carajo",
    "pendeja",
    "zorra",
    "perra",
    "maricón",
    "marica",
    "mariconazo",
    "capullo",
    "jilipollas",
    "joputa",
    "hijueputa",
    "malparida",
    "vergas",
    "chingadas",
    "chingas",
    "torpe",
    "tonta",
    "tontos",
    "tontas",
    "idiotas",
    "imbeciles",
    "imbéciles",
    "estúpida",
    "estúpidos",
    "estúpidas",
];

/// Default minimum name length, in characters.
pub const DEFAULT_MIN_LEN: usize = 3;

/// Default maximum name length, in characters.
pub const DEFAULT_MAX_LEN: usize = 30;

/// Rule data for [`NameValidator`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatorConfig {
    /// Minimum trimmed length, in characters.
    pub min_len: usize,
    /// Maximum trimmed length, in characters.
    pub max_len: usize,
    /// Non-ASCII letters accepted alongside `a-z` and `A-Z`.
    pub extra_letters: String,
    /// Lowercased, trimmed blocklist terms.
    pub blocklist: Vec<String>,
}

impl ValidatorConfig {
    /// Adds blocklist terms, normalizing them the same way as the defaults.
    #[must_use]
    pub fn with_blocked_terms<I, S>(mut self, terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for term in terms {
            let term = term.as_ref().trim().to_lowercase();
            if !term.is_empty() && !self.blocklist.contains(&term) {
                self.blocklist.push(term);
            }
        }
        self
    }

    /// Sets the accepted length range.
    #[must_use]
    pub fn with_length_range(mut self, min_len: usize, max_len: usize) -> Self {
        self.min_len = min_len;
        self.max_len = max_len;
        self
    }
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            min_len: DEFAULT_MIN_LEN,
            max_len: DEFAULT_MAX_LEN,
            extra_letters: DEFAULT_EXTRA_LETTERS.to_string(),
            blocklist: Vec::new(),
        }
        .with_blocked_terms(DEFAULT_BLOCKLIST)
    }
}

/// Outcome of validating one raw name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Validation {
    /// `true` when no rule failed.
    pub valid: bool,
    /// Normalized form of the input, computed even when invalid.
    pub cleaned_name: String,
    /// Every failed rule.
    pub reasons: ReasonSet,
}

/// Checks raw names against formatting and content rules.
#[derive(Debug, Clone, Default)]
pub struct NameValidator {
    config: ValidatorConfig,
}

impl NameValidator {
    /// Creates a validator over the given rule data.
    #[must_use]
    pub const fn new(config: ValidatorConfig) -> Self {
        Self { config }
    }

    /// Returns the rule data.
    #[must_use]
    pub const fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Validates `raw` against the rules and the `existing` roster.
    #[must_use]
    pub fn validate(&self, raw: &str, existing: &[Participant]) -> Validation {
        let trimmed = raw.trim();
        let lowered = trimmed.to_lowercase();
        let cleaned_name = clean_name(trimmed);
        let len = trimmed.chars().count();

        let mut reasons = ReasonSet::new();
        reasons.flag(ReasonCode::Empty, trimmed.is_empty());
        reasons.flag(
            ReasonCode::LengthOutOfRange,
            len < self.config.min_len || len > self.config.max_len,
        );
        reasons.flag(
            ReasonCode::InvalidCharacters,
            trimmed.is_empty() || !trimmed.chars().all(|c| self.is_allowed(c)),
        );
        reasons.flag(
            ReasonCode::ProhibitedContent,
            self.config
                .blocklist
                .iter()
                .any(|term| lowered.contains(term.as_str())),
        );
        reasons.flag(
            ReasonCode::Duplicate,
            !trimmed.is_empty()
                && existing
                    .iter()
                    .any(|p| p.matches(trimmed) || p.matches(&cleaned_name)),
        );
        reasons.flag(
            ReasonCode::WhitespaceOnly,
            raw.chars().all(char::is_whitespace),
        );

        Validation {
            valid: reasons.is_empty(),
            cleaned_name,
            reasons,
        }
    }

    fn is_allowed(&self, c: char) -> bool {
        c.is_ascii_alphabetic() || c.is_whitespace() || self.config.extra_letters.contains(c)
    }
}

/// Normalizes a name: lowercase everything, then capitalize the first letter
/// of each whitespace-separated word and rejoin with single spaces.
#[must_use]
pub fn clean_name(raw: &str) -> String {
    raw.split_whitespace()
        .map(|word| {
            let lower = word.to_lowercase();
            let mut chars = lower.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

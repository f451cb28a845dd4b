//! Game error types with stable numeric codes.
//!
//! Each fallible operation has its own narrow error enum so callers can
//! match exhaustively on what that operation can actually return:
//!
//! - [`ValidationError`] from `add_name`
//! - [`RemovalError`] from `remove_name` / `remove_at`
//! - [`DrawError`] from `draw` / `start_new_cycle`
//!
//! [`GameError`] aggregates them so the console can report any refused
//! operation the same way, as `[code] message`. None of these errors is
//! fatal: a failed operation never changes pool state.

use crate::domain::{Participant, ReasonSet};

/// A raw name was rejected by the validator.
///
/// Carries every failing rule, not only the first one.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid name: {reasons}")]
pub struct ValidationError {
    /// All validation rules the input failed.
    pub reasons: ReasonSet,
}

impl ValidationError {
    /// Wraps a non-empty set of failure reasons.
    #[must_use]
    pub const fn new(reasons: ReasonSet) -> Self {
        Self { reasons }
    }
}

/// Removal of a participant was refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RemovalError {
    /// The participant was already drawn in the current cycle and is locked.
    #[error("{0} was already drawn and cannot be removed")]
    AlreadyDrawn(Participant),

    /// No participant matches the given name or roster position.
    #[error("no participant matches {0:?}")]
    NotFound(String),
}

/// A draw (or a new cycle) could not be performed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DrawError {
    /// The roster is smaller than the configured minimum.
    #[error("at least {required} participants are needed to draw, have {actual}")]
    InsufficientParticipants {
        /// Minimum roster size.
        required: usize,
        /// Current roster size.
        actual: usize,
    },

    /// Every participant has already been drawn in this cycle.
    #[error("every participant has already been drawn")]
    PoolExhausted,
}

/// Configuration could not be loaded.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// An environment variable holds a value outside its accepted set.
    #[error("invalid value {value:?} for {key}")]
    InvalidValue {
        /// Variable name.
        key: String,
        /// Offending value.
        value: String,
    },

    /// Name length bounds are inverted or zero.
    #[error("invalid name length range {min}..={max}")]
    InvalidLengthRange {
        /// Configured minimum.
        min: usize,
        /// Configured maximum.
        max: usize,
    },
}

/// Aggregate error for any pool operation.
///
/// # Error Codes
///
/// | Range     | Category   |
/// |-----------|------------|
/// | 1000–1999 | Validation |
/// | 2000–2999 | Removal    |
/// | 3000–3999 | Draw       |
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    /// See [`ValidationError`].
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// See [`RemovalError`].
    #[error(transparent)]
    Removal(#[from] RemovalError),

    /// See [`DrawError`].
    #[error(transparent)]
    Draw(#[from] DrawError),
}

impl GameError {
    /// Returns the numeric error code for this error.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::Validation(_) => 1001,
            Self::Removal(RemovalError::AlreadyDrawn(_)) => 2001,
            Self::Removal(RemovalError::NotFound(_)) => 2002,
            Self::Draw(DrawError::InsufficientParticipants { .. }) => 3001,
            Self::Draw(DrawError::PoolExhausted) => 3002,
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::ReasonCode;

    #[test]
    fn error_codes_are_stable() {
        let validation = GameError::from(ValidationError::new(ReasonSet::from_iter([
            ReasonCode::Empty,
        ])));
        assert_eq!(validation.error_code(), 1001);

        let drawn = GameError::from(RemovalError::AlreadyDrawn(Participant::from_cleaned(
            "Ana",
        )));
        assert_eq!(drawn.error_code(), 2001);
        assert_eq!(
            GameError::from(RemovalError::NotFound("x".to_string())).error_code(),
            2002
        );
        assert_eq!(
            GameError::from(DrawError::InsufficientParticipants {
                required: 2,
                actual: 1
            })
            .error_code(),
            3001
        );
        assert_eq!(GameError::from(DrawError::PoolExhausted).error_code(), 3002);
    }

    #[test]
    fn display_lists_reasons() {
        let err = ValidationError::new(ReasonSet::from_iter([
            ReasonCode::LengthOutOfRange,
            ReasonCode::Empty,
        ]));
        let msg = err.to_string();
        assert!(msg.starts_with("invalid name: "));
        assert!(msg.contains("empty"));
        assert!(msg.contains("length_out_of_range"));
    }

    #[test]
    fn already_drawn_names_participant() {
        let err = RemovalError::AlreadyDrawn(Participant::from_cleaned("Beto"));
        assert_eq!(err.to_string(), "Beto was already drawn and cannot be removed");
    }
}

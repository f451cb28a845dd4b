//! Plain-text rendering of pool results for the console.
//!
//! All functions here are pure: they turn domain values into the lines the
//! console prints, so they can be tested without any I/O.

use std::fmt::Write as _;

use crate::domain::{
    GamePhase, Participant, PoolStatus, ReasonCode, RosterEntry, ValidatorConfig,
};
use crate::error::{DrawError, GameError, RemovalError, ValidationError};

/// Command summary printed by `help`.
pub const HELP: &str = "\
commands:
  add <name>          add a participant
  remove <name> | #n  remove a participant that has not been drawn
  draw                reveal the next secret friend
  again               start a new round with the same names
  reset               clear every name and start over
  status              show progress
  list                show every name
  help                show this list
  quit                leave the game";

/// Returns the message for the highest-priority failed rule.
#[must_use]
pub fn validation_message(err: &ValidationError, rules: &ValidatorConfig) -> String {
    match err.reasons.primary() {
        Some(ReasonCode::LengthOutOfRange) => format!(
            "Names must be between {} and {} characters long",
            rules.min_len, rules.max_len
        ),
        Some(code) => code.message().to_string(),
        None => ReasonCode::WhitespaceOnly.message().to_string(),
    }
}

/// Returns the game progress line, or `None` when the pool is empty.
#[must_use]
pub fn phase_line(status: &PoolStatus) -> Option<String> {
    match status.phase() {
        GamePhase::Empty => None,
        GamePhase::Ready => Some(format!(
            "{} {} added - ready to draw!",
            status.total,
            if status.total == 1 { "name" } else { "names" }
        )),
        GamePhase::InProgress => Some(format!(
            "Total: {} | Drawn: {} | Available: {}",
            status.total, status.drawn_count, status.available_count
        )),
        GamePhase::Complete => Some(format!(
            "Complete! All {} names have been drawn",
            status.total
        )),
    }
}

/// Returns the label of the draw action, or `None` when drawing is not
/// possible right now.
#[must_use]
pub fn draw_label(status: &PoolStatus, min_participants: usize) -> Option<String> {
    if !status.can_draw(min_participants) {
        return None;
    }
    if status.drawn_count > 0 {
        Some(format!("draw ({} available)", status.available_count))
    } else {
        Some("draw".to_string())
    }
}

/// Renders the roster, one numbered line per participant.
#[must_use]
pub fn roster_lines(roster: &[RosterEntry]) -> String {
    if roster.is_empty() {
        return "No names yet. Use `add <name>`.".to_string();
    }
    let mut out = String::new();
    for entry in roster {
        let _ = write!(out, "{}. {}", entry.position, entry.participant);
        if entry.drawn {
            out.push_str("  [drawn]");
        }
        out.push('\n');
    }
    out.truncate(out.trim_end().len());
    out
}

/// Renders the reveal of a drawn participant with the updated counts.
#[must_use]
pub fn draw_result(participant: &Participant, status: &PoolStatus) -> String {
    let mut out = format!(
        "*** {participant} *** is your secret friend\n{} of {} drawn, {} available",
        status.drawn_count, status.total, status.available_count
    );
    if status.available_count > 0 {
        let _ = write!(
            out,
            "\nType `draw` again ({} left) or `reset` to start over.",
            status.available_count
        );
    }
    out
}

/// Renders a refused draw. When the pool is exhausted, lists who has been
/// drawn and the ways forward.
#[must_use]
pub fn draw_error_message(err: &DrawError, drawn: &[Participant]) -> String {
    match err {
        DrawError::InsufficientParticipants { required, actual: 0 } => {
            format!("Add at least {required} names to draw")
        }
        DrawError::InsufficientParticipants { required, .. } => {
            format!("Add at least {required} names for a draw")
        }
        DrawError::PoolExhausted => {
            let mut out = String::from("No one is left to draw. Already drawn:");
            for (i, participant) in drawn.iter().enumerate() {
                let _ = write!(out, "\n  {}. {participant}", i.saturating_add(1));
            }
            out.push_str("\nAdd more names to keep drawing, `again` for a new round, or `reset`.");
            out
        }
    }
}

/// Renders a refused removal.
#[must_use]
pub fn removal_error_message(err: &RemovalError) -> String {
    match err {
        RemovalError::AlreadyDrawn(_) => {
            "You cannot remove someone who was already drawn".to_string()
        }
        RemovalError::NotFound(target) => format!("No participant matches {target}"),
    }
}

/// Renders any refused operation, prefixed with its stable error code.
///
/// `drawn` is only consulted for [`DrawError::PoolExhausted`].
#[must_use]
pub fn error_message(
    err: &GameError,
    rules: &ValidatorConfig,
    drawn: &[Participant],
) -> String {
    let body = match err {
        GameError::Validation(e) => validation_message(e, rules),
        GameError::Removal(e) => removal_error_message(e),
        GameError::Draw(e) => draw_error_message(e, drawn),
    };
    format!("[{}] {body}", err.error_code())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ReasonSet;

    #[test]
    fn validation_message_uses_primary_reason_and_bounds() {
        let rules = ValidatorConfig::default();
        let err = ValidationError::new(ReasonSet::from_iter([
            ReasonCode::Duplicate,
            ReasonCode::LengthOutOfRange,
        ]));
        assert_eq!(
            validation_message(&err, &rules),
            "Names must be between 3 and 30 characters long"
        );

        let err = ValidationError::new(ReasonSet::from_iter([ReasonCode::Duplicate]));
        assert_eq!(
            validation_message(&err, &rules),
            "That name has already been added"
        );
    }

    #[test]
    fn phase_lines() {
        assert_eq!(phase_line(&PoolStatus::new(0, 0, 0)), None);
        assert_eq!(
            phase_line(&PoolStatus::new(1, 0, 1)).as_deref(),
            Some("1 name added - ready to draw!")
        );
        assert_eq!(
            phase_line(&PoolStatus::new(4, 1, 3)).as_deref(),
            Some("Total: 4 | Drawn: 1 | Available: 3")
        );
        assert_eq!(
            phase_line(&PoolStatus::new(2, 2, 0)).as_deref(),
            Some("Complete! All 2 names have been drawn")
        );
    }

    #[test]
    fn draw_label_reflects_availability() {
        assert_eq!(draw_label(&PoolStatus::new(1, 0, 1), 2), None);
        assert_eq!(draw_label(&PoolStatus::new(3, 0, 3), 2).as_deref(), Some("draw"));
        assert_eq!(
            draw_label(&PoolStatus::new(3, 1, 2), 2).as_deref(),
            Some("draw (2 available)")
        );
        assert_eq!(draw_label(&PoolStatus::new(3, 3, 0), 2), None);
    }

    #[test]
    fn roster_marks_drawn() {
        let roster = vec![
            RosterEntry {
                position: 1,
                participant: Participant::from_cleaned("Ana"),
                drawn: true,
            },
            RosterEntry {
                position: 2,
                participant: Participant::from_cleaned("Beto"),
                drawn: false,
            },
        ];
        assert_eq!(roster_lines(&roster), "1. Ana  [drawn]\n2. Beto");
        assert!(roster_lines(&[]).starts_with("No names yet"));
    }

    #[test]
    fn exhausted_message_lists_drawn_in_order() {
        let drawn = vec![
            Participant::from_cleaned("Beto"),
            Participant::from_cleaned("Ana"),
        ];
        let msg = draw_error_message(&DrawError::PoolExhausted, &drawn);
        assert!(msg.contains("1. Beto\n  2. Ana"));
    }

    #[test]
    fn error_message_carries_code() {
        let rules = ValidatorConfig::default();
        let err = GameError::from(RemovalError::NotFound("#9".to_string()));
        assert_eq!(
            error_message(&err, &rules, &[]),
            "[2002] No participant matches #9"
        );

        let err = GameError::from(ValidationError::new(ReasonSet::from_iter([
            ReasonCode::InvalidCharacters,
        ])));
        assert!(error_message(&err, &rules, &[]).starts_with("[1001] Only letters"));

        let drawn = vec![Participant::from_cleaned("Ana")];
        let msg = error_message(&GameError::from(DrawError::PoolExhausted), &rules, &drawn);
        assert!(msg.starts_with("[3002] No one is left to draw"));
        assert!(msg.contains("1. Ana"));
    }

    #[test]
    fn draw_result_offers_next_step_only_when_names_remain() {
        let p = Participant::from_cleaned("Ana");
        assert!(draw_result(&p, &PoolStatus::new(3, 1, 2)).contains("2 left"));
        assert!(!draw_result(&p, &PoolStatus::new(2, 2, 0)).contains("left"));
    }
}

//! Domain events reflecting draw pool mutations.
//!
//! Every successful state change made through the session service emits a
//! [`DrawEvent`] on the [`super::EventBus`]. The console subscribes to
//! render results; other front-ends can do the same.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{Participant, PoolStatus, SessionId};

/// Domain event emitted after every successful mutation.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum DrawEvent {
    /// A validated name joined the roster.
    ParticipantAdded {
        /// Session identifier.
        session_id: SessionId,
        /// The cleaned name that was stored.
        participant: Participant,
        /// Pool counts after the addition.
        status: PoolStatus,
        /// Event timestamp.
        timestamp: DateTime<Utc>,
    },

    /// A participant left the roster.
    ParticipantRemoved {
        /// Session identifier.
        session_id: SessionId,
        /// The removed participant.
        participant: Participant,
        /// Pool counts after the removal.
        status: PoolStatus,
        /// Event timestamp.
        timestamp: DateTime<Utc>,
    },

    /// A participant was drawn.
    ParticipantDrawn {
        /// Session identifier.
        session_id: SessionId,
        /// The drawn participant.
        participant: Participant,
        /// Pool counts after the draw.
        status: PoolStatus,
        /// Event timestamp.
        timestamp: DateTime<Utc>,
    },

    /// A new cycle began with the same roster.
    CycleRestarted {
        /// Session identifier.
        session_id: SessionId,
        /// Pool counts after the restart.
        status: PoolStatus,
        /// Event timestamp.
        timestamp: DateTime<Utc>,
    },

    /// The pool was cleared.
    PoolReset {
        /// Session identifier.
        session_id: SessionId,
        /// Event timestamp.
        timestamp: DateTime<Utc>,
    },
}

impl DrawEvent {
    /// Returns the session ID associated with this event.
    #[must_use]
    pub const fn session_id(&self) -> SessionId {
        match self {
            Self::ParticipantAdded { session_id, .. }
            | Self::ParticipantRemoved { session_id, .. }
            | Self::ParticipantDrawn { session_id, .. }
            | Self::CycleRestarted { session_id, .. }
            | Self::PoolReset { session_id, .. } => *session_id,
        }
    }

    /// Returns the event type as a static string slice.
    #[must_use]
    pub const fn event_type_str(&self) -> &'static str {
        match self {
            Self::ParticipantAdded { .. } => "participant_added",
            Self::ParticipantRemoved { .. } => "participant_removed",
            Self::ParticipantDrawn { .. } => "participant_drawn",
            Self::CycleRestarted { .. } => "cycle_restarted",
            Self::PoolReset { .. } => "pool_reset",
        }
    }
}

//! Read-only snapshots of pool progress.

use serde::Serialize;

/// Coarse progress of the current game, derived from a [`PoolStatus`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GamePhase {
    /// No participants yet.
    Empty,
    /// Participants entered, nothing drawn in this cycle.
    Ready,
    /// Some participants drawn, some still available.
    InProgress,
    /// Every participant has been drawn.
    Complete,
}

/// Counts describing the pool at one point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PoolStatus {
    /// Size of the roster.
    pub total: usize,
    /// Participants drawn in the current cycle.
    pub drawn_count: usize,
    /// Participants still eligible for a draw.
    pub available_count: usize,
    /// `total > 0 && available_count == 0`.
    pub is_complete: bool,
}

impl PoolStatus {
    /// Builds a snapshot from raw counts.
    #[must_use]
    pub const fn new(total: usize, drawn_count: usize, available_count: usize) -> Self {
        Self {
            total,
            drawn_count,
            available_count,
            is_complete: total > 0 && available_count == 0,
        }
    }

    /// Returns the game phase these counts correspond to.
    #[must_use]
    pub const fn phase(&self) -> GamePhase {
        if self.total == 0 {
            GamePhase::Empty
        } else if self.drawn_count == 0 {
            GamePhase::Ready
        } else if self.available_count > 0 {
            GamePhase::InProgress
        } else {
            GamePhase::Complete
        }
    }

    /// Returns `true` if a draw would succeed without restarting the cycle,
    /// given the minimum roster size.
    #[must_use]
    pub const fn can_draw(&self, min_participants: usize) -> bool {
        self.total >= min_participants && self.available_count > 0
    }
}

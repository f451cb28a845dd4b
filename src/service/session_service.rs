//! Session service: guards the draw pool and emits events.

use chrono::Utc;
use tokio::sync::RwLock;

use crate::domain::{
    DrawEvent, DrawPool, EventBus, Participant, PoolConfig, PoolStatus, RosterEntry, SessionId,
};
use crate::error::{DrawError, RemovalError, ValidationError};

/// Orchestration layer for one play session.
///
/// Owns the [`DrawPool`] behind a [`tokio::sync::RwLock`] so that callers
/// sharing the service through an `Arc` cannot interleave inside an
/// operation. Every mutation method follows the pattern: acquire write lock
/// → mutate pool → snapshot status → release lock → emit event → return.
#[derive(Debug)]
pub struct SessionService {
    session_id: SessionId,
    pool: RwLock<DrawPool>,
    event_bus: EventBus,
}

impl SessionService {
    /// Creates a session with an empty pool.
    #[must_use]
    pub fn new(config: PoolConfig, event_bus: EventBus) -> Self {
        Self::from_pool(DrawPool::new(config), event_bus)
    }

    /// Creates a session around an existing pool.
    #[must_use]
    pub fn from_pool(pool: DrawPool, event_bus: EventBus) -> Self {
        let session_id = SessionId::new();
        tracing::debug!(%session_id, "session created");
        Self {
            session_id,
            pool: RwLock::new(pool),
            event_bus,
        }
    }

    /// Returns the session identifier.
    #[must_use]
    pub const fn session_id(&self) -> SessionId {
        self.session_id
    }

    /// Returns a reference to the inner [`EventBus`].
    #[must_use]
    pub const fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    /// Validates and adds a name.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] listing every failed rule.
    pub async fn add_name(&self, raw: &str) -> Result<Participant, ValidationError> {
        let mut pool = self.pool.write().await;
        let participant = match pool.add_name(raw) {
            Ok(p) => p,
            Err(err) => {
                tracing::debug!(
                    session_id = %self.session_id,
                    reasons = %err.reasons,
                    "name rejected"
                );
                return Err(err);
            }
        };
        let status = pool.status();
        drop(pool);

        let _ = self.event_bus.publish(DrawEvent::ParticipantAdded {
            session_id: self.session_id,
            participant: participant.clone(),
            status,
            timestamp: Utc::now(),
        });

        tracing::info!(
            session_id = %self.session_id,
            participant = %participant,
            total = status.total,
            "participant added"
        );
        Ok(participant)
    }

    /// Removes the participant matching `name`. Confirmation is the
    /// caller's responsibility.
    ///
    /// # Errors
    ///
    /// Returns [`RemovalError`] if the participant is drawn or unknown.
    pub async fn remove_name(&self, name: &str) -> Result<Participant, RemovalError> {
        let mut pool = self.pool.write().await;
        let result = pool.remove_name(name);
        let status = pool.status();
        drop(pool);
        self.finish_removal(result, status)
    }

    /// Removes the participant at the 0-based roster `index`.
    ///
    /// # Errors
    ///
    /// Returns [`RemovalError`] if the participant is drawn or the index is
    /// out of range.
    pub async fn remove_at(&self, index: usize) -> Result<Participant, RemovalError> {
        let mut pool = self.pool.write().await;
        let result = pool.remove_at(index);
        let status = pool.status();
        drop(pool);
        self.finish_removal(result, status)
    }

    fn finish_removal(
        &self,
        result: Result<Participant, RemovalError>,
        status: PoolStatus,
    ) -> Result<Participant, RemovalError> {
        match result {
            Ok(participant) => {
                let _ = self.event_bus.publish(DrawEvent::ParticipantRemoved {
                    session_id: self.session_id,
                    participant: participant.clone(),
                    status,
                    timestamp: Utc::now(),
                });
                tracing::info!(
                    session_id = %self.session_id,
                    participant = %participant,
                    "participant removed"
                );
                Ok(participant)
            }
            Err(err) => {
                tracing::debug!(session_id = %self.session_id, error = %err, "removal refused");
                Err(err)
            }
        }
    }

    /// Draws one participant.
    ///
    /// Under [`crate::domain::ExhaustionPolicy::Restart`] an exhausted pool
    /// restarts first; `cycle_restarted` is then published ahead of
    /// `participant_drawn`.
    ///
    /// # Errors
    ///
    /// Returns [`DrawError`] if the roster is too small or exhausted.
    pub async fn draw(&self) -> Result<Participant, DrawError> {
        let mut pool = self.pool.write().await;
        let outcome = match pool.draw_outcome() {
            Ok(outcome) => outcome,
            Err(err) => {
                tracing::debug!(session_id = %self.session_id, error = %err, "draw refused");
                return Err(err);
            }
        };
        let status = pool.status();
        drop(pool);

        if let Some(restarted) = outcome.restarted {
            let _ = self.event_bus.publish(DrawEvent::CycleRestarted {
                session_id: self.session_id,
                status: restarted,
                timestamp: Utc::now(),
            });
            tracing::info!(
                session_id = %self.session_id,
                total = restarted.total,
                "cycle restarted automatically"
            );
        }

        let participant = outcome.participant;
        let _ = self.event_bus.publish(DrawEvent::ParticipantDrawn {
            session_id: self.session_id,
            participant: participant.clone(),
            status,
            timestamp: Utc::now(),
        });

        tracing::info!(
            session_id = %self.session_id,
            participant = %participant,
            drawn = status.drawn_count,
            available = status.available_count,
            "participant drawn"
        );
        Ok(participant)
    }

    /// Makes every participant available again, keeping the roster.
    ///
    /// # Errors
    ///
    /// Returns [`DrawError::InsufficientParticipants`] if the roster is too
    /// small.
    pub async fn start_new_cycle(&self) -> Result<PoolStatus, DrawError> {
        let mut pool = self.pool.write().await;
        pool.start_new_cycle()?;
        let status = pool.status();
        drop(pool);

        let _ = self.event_bus.publish(DrawEvent::CycleRestarted {
            session_id: self.session_id,
            status,
            timestamp: Utc::now(),
        });

        tracing::info!(session_id = %self.session_id, total = status.total, "cycle restarted");
        Ok(status)
    }

    /// Clears the pool.
    pub async fn reset(&self) {
        self.pool.write().await.reset();

        let _ = self.event_bus.publish(DrawEvent::PoolReset {
            session_id: self.session_id,
            timestamp: Utc::now(),
        });

        tracing::info!(session_id = %self.session_id, "pool reset");
    }

    /// Returns a snapshot of the pool counts.
    pub async fn status(&self) -> PoolStatus {
        self.pool.read().await.status()
    }

    /// Returns the roster with draw markers.
    pub async fn roster(&self) -> Vec<RosterEntry> {
        self.pool.read().await.roster()
    }

    /// Returns the participants drawn this cycle, in draw order.
    pub async fn drawn(&self) -> Vec<Participant> {
        self.pool.read().await.drawn().to_vec()
    }

    /// Returns the minimum roster size for a draw.
    pub async fn min_participants(&self) -> usize {
        self.pool.read().await.min_participants()
    }
}

//! The draw pool state machine.
//!
//! [`DrawPool`] owns the three collections of a play session:
//!
//! - `names`: the full roster, in insertion (display) order
//! - `drawn`: participants drawn in the current cycle, in draw order
//! - `available`: participants still eligible for the next draw
//!
//! # Invariants
//!
//! - `available ∩ drawn = ∅`
//! - `available ∪ drawn = names` (as sets)
//! - names are unique ignoring case
//!
//! Every mutating method either fully succeeds or leaves all three
//! collections untouched.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use super::validator::{NameValidator, ValidatorConfig};
use super::{Participant, PoolStatus};
use crate::error::{DrawError, RemovalError, ValidationError};

/// Default minimum roster size for a draw.
pub const DEFAULT_MIN_PARTICIPANTS: usize = 2;

/// What `draw()` does once every participant has been drawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExhaustionPolicy {
    /// Fail with [`DrawError::PoolExhausted`]; the caller restarts
    /// explicitly via [`DrawPool::start_new_cycle`] or [`DrawPool::reset`].
    #[default]
    Halt,
    /// Start a new cycle automatically, then draw.
    Restart,
}

/// Construction parameters for a [`DrawPool`].
#[derive(Debug, Clone, Default)]
pub struct PoolConfig {
    /// Name validation rules.
    pub validator: ValidatorConfig,
    /// Minimum roster size for a draw. Values below 1 are treated as 1.
    pub min_participants: Option<usize>,
    /// Behavior on an exhausted pool.
    pub exhaustion_policy: ExhaustionPolicy,
    /// Seed for reproducible draws; `None` seeds from the OS.
    pub seed: Option<u64>,
}

/// A roster entry with its draw state, for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RosterEntry {
    /// 1-based position in the roster.
    pub position: usize,
    /// The participant.
    pub participant: Participant,
    /// Whether the participant was drawn in the current cycle.
    pub drawn: bool,
}

/// Result of a draw, including whether the cycle had to restart first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawOutcome {
    /// The drawn participant.
    pub participant: Participant,
    /// Pool counts right after an automatic restart, before the draw.
    /// `None` unless [`ExhaustionPolicy::Restart`] kicked in.
    pub restarted: Option<PoolStatus>,
}

/// Name pool for one play session.
#[derive(Debug)]
pub struct DrawPool<R = StdRng> {
    validator: NameValidator,
    min_participants: usize,
    exhaustion_policy: ExhaustionPolicy,
    names: Vec<Participant>,
    drawn: Vec<Participant>,
    available: Vec<Participant>,
    rng: R,
}

impl DrawPool<StdRng> {
    /// Creates an empty pool from the given configuration.
    #[must_use]
    pub fn new(config: PoolConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self::with_rng(config, rng)
    }

    /// Creates an empty pool with default rules and a fixed seed.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::new(PoolConfig {
            seed: Some(seed),
            ..PoolConfig::default()
        })
    }
}

impl Default for DrawPool<StdRng> {
    fn default() -> Self {
        Self::new(PoolConfig::default())
    }
}

impl<R: Rng> DrawPool<R> {
    /// Creates an empty pool drawing from the given random source.
    ///
    /// The `seed` field of `config` is ignored.
    #[must_use]
    pub fn with_rng(config: PoolConfig, rng: R) -> Self {
        Self {
            validator: NameValidator::new(config.validator),
            min_participants: config
                .min_participants
                .unwrap_or(DEFAULT_MIN_PARTICIPANTS)
                .max(1),
            exhaustion_policy: config.exhaustion_policy,
            names: Vec::new(),
            drawn: Vec::new(),
            available: Vec::new(),
            rng,
        }
    }

    /// Validates `raw` and appends the cleaned name to the roster.
    ///
    /// Before the first draw of a cycle the available pool is resynced to
    /// the whole roster; mid-cycle the new name is appended to the available
    /// pool so it can still be drawn in this cycle.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] with every failed rule; the pool is left
    /// unchanged.
    pub fn add_name(&mut self, raw: &str) -> Result<Participant, ValidationError> {
        let validation = self.validator.validate(raw, &self.names);
        if !validation.valid {
            return Err(ValidationError::new(validation.reasons));
        }

        let participant = Participant::from_cleaned(validation.cleaned_name);
        self.names.push(participant.clone());
        if self.drawn.is_empty() {
            self.available.clone_from(&self.names);
        } else {
            self.available.push(participant.clone());
        }
        Ok(participant)
    }

    /// Removes the participant whose name matches `name` (ignoring case).
    ///
    /// # Errors
    ///
    /// - [`RemovalError::AlreadyDrawn`] if the participant was drawn in the
    ///   current cycle.
    /// - [`RemovalError::NotFound`] if no participant matches.
    pub fn remove_name(&mut self, name: &str) -> Result<Participant, RemovalError> {
        let index = self
            .names
            .iter()
            .position(|p| p.matches(name))
            .ok_or_else(|| RemovalError::NotFound(name.to_string()))?;
        self.remove_index(index)
    }

    /// Removes the participant at the 0-based roster `index`.
    ///
    /// # Errors
    ///
    /// - [`RemovalError::AlreadyDrawn`] if the participant was drawn in the
    ///   current cycle.
    /// - [`RemovalError::NotFound`] if `index` is out of range.
    pub fn remove_at(&mut self, index: usize) -> Result<Participant, RemovalError> {
        if index >= self.names.len() {
            return Err(RemovalError::NotFound(format!("#{}", index.saturating_add(1))));
        }
        self.remove_index(index)
    }

    fn remove_index(&mut self, index: usize) -> Result<Participant, RemovalError> {
        let Some(participant) = self.names.get(index) else {
            return Err(RemovalError::NotFound(format!("#{}", index.saturating_add(1))));
        };
        if self.drawn.contains(participant) {
            return Err(RemovalError::AlreadyDrawn(participant.clone()));
        }

        let participant = self.names.remove(index);
        self.available.retain(|p| p != &participant);
        Ok(participant)
    }

    /// Draws one available participant uniformly at random.
    ///
    /// # Errors
    ///
    /// - [`DrawError::InsufficientParticipants`] if the roster is below the
    ///   minimum size.
    /// - [`DrawError::PoolExhausted`] if everyone has been drawn and the
    ///   exhaustion policy is [`ExhaustionPolicy::Halt`].
    pub fn draw(&mut self) -> Result<Participant, DrawError> {
        self.draw_outcome().map(|outcome| outcome.participant)
    }

    /// Same as [`DrawPool::draw`], but also reports an automatic cycle
    /// restart so callers can announce it.
    ///
    /// # Errors
    ///
    /// Same as [`DrawPool::draw`].
    pub fn draw_outcome(&mut self) -> Result<DrawOutcome, DrawError> {
        self.ensure_minimum()?;

        let mut restarted = None;
        if self.available.is_empty() {
            match self.exhaustion_policy {
                ExhaustionPolicy::Halt => return Err(DrawError::PoolExhausted),
                ExhaustionPolicy::Restart => {
                    self.restart_cycle();
                    restarted = Some(self.status());
                }
            }
        }
        if self.available.is_empty() {
            return Err(DrawError::PoolExhausted);
        }

        let index = self.rng.random_range(0..self.available.len());
        let participant = self.available.remove(index);
        self.drawn.push(participant.clone());
        Ok(DrawOutcome {
            participant,
            restarted,
        })
    }

    /// Starts a new cycle: every participant becomes available again and
    /// the drawn list is cleared. The roster is kept.
    ///
    /// # Errors
    ///
    /// Returns [`DrawError::InsufficientParticipants`] if the roster is below
    /// the minimum size; the pool is left unchanged.
    pub fn start_new_cycle(&mut self) -> Result<(), DrawError> {
        self.ensure_minimum()?;
        self.restart_cycle();
        Ok(())
    }

    /// Clears the roster, the drawn list and the available pool.
    pub fn reset(&mut self) {
        self.names.clear();
        self.drawn.clear();
        self.available.clear();
    }

    /// Returns a snapshot of the pool counts.
    #[must_use]
    pub fn status(&self) -> PoolStatus {
        PoolStatus::new(self.names.len(), self.drawn.len(), self.available.len())
    }

    /// Returns the roster in display order.
    #[must_use]
    pub fn names(&self) -> &[Participant] {
        &self.names
    }

    /// Returns the participants drawn this cycle, in draw order.
    #[must_use]
    pub fn drawn(&self) -> &[Participant] {
        &self.drawn
    }

    /// Returns the participants still eligible for a draw.
    #[must_use]
    pub fn available(&self) -> &[Participant] {
        &self.available
    }

    /// Returns the roster with each entry's draw state.
    #[must_use]
    pub fn roster(&self) -> Vec<RosterEntry> {
        self.names
            .iter()
            .enumerate()
            .map(|(i, participant)| RosterEntry {
                position: i.saturating_add(1),
                participant: participant.clone(),
                drawn: self.drawn.contains(participant),
            })
            .collect()
    }

    /// Returns `true` if a participant matching `name` was drawn this cycle.
    #[must_use]
    pub fn is_drawn(&self, name: &str) -> bool {
        self.drawn.iter().any(|p| p.matches(name))
    }

    /// Minimum roster size for a draw.
    #[must_use]
    pub const fn min_participants(&self) -> usize {
        self.min_participants
    }

    /// Behavior on an exhausted pool.
    #[must_use]
    pub const fn exhaustion_policy(&self) -> ExhaustionPolicy {
        self.exhaustion_policy
    }

    /// Name validation rules in effect.
    #[must_use]
    pub const fn validator(&self) -> &NameValidator {
        &self.validator
    }

    fn ensure_minimum(&self) -> Result<(), DrawError> {
        if self.names.len() < self.min_participants {
            return Err(DrawError::InsufficientParticipants {
                required: self.min_participants,
                actual: self.names.len(),
            });
        }
        Ok(())
    }

    fn restart_cycle(&mut self) {
        self.available.clone_from(&self.names);
        self.drawn.clear();
    }
}

//! Domain layer: participants, validation, the draw pool, and events.
//!
//! Everything here is synchronous and free of I/O except the
//! [`EventBus`], which only fans events out to in-process subscribers.

pub mod draw_event;
pub mod draw_pool;
pub mod event_bus;
pub mod participant;
pub mod reason;
pub mod session_id;
pub mod status;
pub mod validator;

pub use draw_event::DrawEvent;
pub use draw_pool::{DrawOutcome, DrawPool, ExhaustionPolicy, PoolConfig, RosterEntry};
pub use event_bus::EventBus;
pub use participant::Participant;
pub use reason::{ReasonCode, ReasonSet};
pub use session_id::SessionId;
pub use status::{GamePhase, PoolStatus};
pub use validator::{NameValidator, Validation, ValidatorConfig};

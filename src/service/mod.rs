//! Service layer: session orchestration.
//!
//! [`SessionService`] serializes access to one [`crate::domain::DrawPool`]
//! and emits events through the [`super::domain::EventBus`].

pub mod session_service;

pub use session_service::SessionService;

//! # secret-friend
//!
//! Secret friend (gift exchange) name drawing.
//!
//! Players enter names; the game validates and normalizes them, then reveals
//! one randomly drawn name at a time without repetition, tracking who has
//! been drawn and who is still available.
//!
//! ## Architecture
//!
//! ```text
//! Console (console/, main.rs)
//!     │
//!     ├── SessionService (service/)   lock + events + logging
//!     ├── EventBus (domain/)
//!     │
//!     ├── DrawPool (domain/)          roster / drawn / available
//!     └── NameValidator (domain/)     rules + normalization
//! ```
//!
//! ## Example
//!
//! ```
//! use secret_friend::domain::DrawPool;
//! use secret_friend::error::DrawError;
//!
//! let mut pool = DrawPool::seeded(42);
//! pool.add_name("  ana MARÍA ").map_err(|e| e.to_string())?;
//! pool.add_name("Beto").map_err(|e| e.to_string())?;
//! assert_eq!(pool.names()[0].as_str(), "Ana María");
//!
//! pool.draw().map_err(|e| e.to_string())?;
//! pool.draw().map_err(|e| e.to_string())?;
//! assert_eq!(pool.draw(), Err(DrawError::PoolExhausted));
//! assert!(pool.status().is_complete);
//! # Ok::<(), String>(())
//! ```

pub mod config;
pub mod console;
pub mod domain;
pub mod error;
pub mod service;

//! Application core
//!
//! Ties the tree model, report assembly, gating, and persistence together
//! behind a single [`Session`] controller, driven by the [`AppState`] finite
//! state machine. The view layer (whatever renders it) only ever talks to
//! the session.

pub mod config;
pub mod error;
pub mod session;
pub mod state;

pub use config::SessionConfig;
pub use error::CoreError;
pub use session::Session;
pub use state::{allowed_transitions, validate_transition, AppState, StateError};

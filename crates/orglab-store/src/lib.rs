//! Local key-value persistence
//!
//! The application remembers a handful of things between sessions: the
//! admin-mode toggle, the premium-unlocked flag, the org tree pending
//! analysis, and the dossier-request list. Rather than a process-wide
//! singleton, persistence is an injected [`KeyValueStore`] abstraction so
//! tests run against [`MemoryStore`] and the binary against
//! [`JsonFileStore`].
//!
//! Reads are forgiving throughout: malformed persisted JSON is logged and
//! treated as absent, never an error.

pub mod error;
pub mod kv;
pub mod typed;

pub use error::StoreError;
pub use kv::{JsonFileStore, KeyValueStore, MemoryStore};
pub use typed::{slots, Slot};

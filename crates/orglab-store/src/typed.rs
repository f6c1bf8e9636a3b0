//! Typed per-key slots
//!
//! Each persisted value gets a [`Slot`] carrying its key and Rust type, so
//! callers never touch raw strings. Parse failures on load are logged at
//! `warn` and fall back to "absent"; the affected state reverts to its
//! default.

use crate::kv::KeyValueStore;
use orglab_model::OrgNode;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::marker::PhantomData;

/// A typed view over one store key
#[derive(Debug, Clone, Copy)]
pub struct Slot<T> {
    key: &'static str,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Serialize + DeserializeOwned> Slot<T> {
    /// Bind a slot to its store key
    #[must_use]
    pub const fn new(key: &'static str) -> Self {
        Self {
            key,
            _marker: PhantomData,
        }
    }

    /// The underlying store key
    #[inline]
    #[must_use]
    pub const fn key(&self) -> &'static str {
        self.key
    }

    /// Load and decode the slot; malformed JSON reads as absent
    pub fn load(&self, store: &dyn KeyValueStore) -> Option<T> {
        let raw = store.get(self.key)?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(err) => {
                tracing::warn!(key = self.key, error = %err, "persisted value malformed, ignoring");
                None
            }
        }
    }

    /// Load the slot, falling back to `T::default()` when absent or malformed
    pub fn load_or_default(&self, store: &dyn KeyValueStore) -> T
    where
        T: Default,
    {
        self.load(store).unwrap_or_default()
    }

    /// Encode and write the slot; best-effort
    pub fn save(&self, store: &dyn KeyValueStore, value: &T) {
        match serde_json::to_string(value) {
            Ok(raw) => store.set(self.key, &raw),
            Err(err) => tracing::warn!(key = self.key, error = %err, "value serialization failed"),
        }
    }

    /// Remove the slot
    pub fn clear(&self, store: &dyn KeyValueStore) {
        store.remove(self.key);
    }
}

/// The application's persisted slots
///
/// The dossier-request list lives with its owning crate; these are the slots
/// shared across the application core.
pub mod slots {
    use super::{OrgNode, Slot};

    /// Admin-mode toggle
    pub const ADMIN_MODE: Slot<bool> = Slot::new("orglab.admin_mode");
    /// Premium-unlocked flag; once true it is never revoked
    pub const PREMIUM_UNLOCKED: Slot<bool> = Slot::new("orglab.premium_unlocked");
    /// Org tree saved when analysis starts, restored after the payment
    /// redirect round-trip
    pub const PENDING_TREE: Slot<OrgNode> = Slot::new("orglab.pending_tree");
}

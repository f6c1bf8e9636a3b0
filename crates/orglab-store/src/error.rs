//! Store errors
//!
//! Only construction can fail; routine reads and writes degrade to defaults
//! or best-effort instead of erroring.

/// Errors opening a persistent store
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The backing file could not be read or created
    #[error("store io: {0}")]
    Io(#[from] std::io::Error),
}

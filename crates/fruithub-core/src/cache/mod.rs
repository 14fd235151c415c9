// ── Persisted snapshot store ──
//
// Synchronous key/value surface holding the last published serialization
// of each collection. Failures are reported to the caller, which logs them
// and carries on in memory.

mod file;
mod memory;

use thiserror::Error;

pub use file::FileSnapshotStore;
pub use memory::MemorySnapshotStore;

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Invalid snapshot key {key:?}")]
    InvalidKey { key: String },

    #[error("Snapshot I/O failed for {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },
}

/// Durable storage for collection snapshots, keyed per entity kind.
///
/// Implementations must be safe to share across repositories; each
/// repository only ever touches its own key.
pub trait SnapshotStore: Send + Sync {
    /// Raw snapshot for `key`, or `None` when nothing is stored.
    fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    fn set(&self, key: &str, value: &str) -> Result<(), CacheError>;

    /// Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<(), CacheError>;
}

//! Save collection persistence
//!
//! Features:
//! - One JSON array holding every save, rewritten in full on each change
//! - Temp file + rename so a crash never leaves a half-written store
//! - Self-healing when the container is missing or unreadable
//! - Malformed individual records reported, never silently dropped

pub mod file;
pub mod memory;

pub use file::JsonFileStore;
pub use memory::MemoryStore;

use crate::error::StoreError;
use crate::session::Session;

/// Durable mapping from game name to session record
///
/// There is no incremental update path: callers read the whole
/// collection, change it in memory and write the whole collection back.
/// No locking is provided; one process owns a store at a time.
pub trait SessionStore {
    /// Every stored session, in insertion order
    fn load_all(&self) -> Result<Vec<Session>, StoreError>;

    /// Replace the stored collection with `sessions`
    fn save_all(&self, sessions: &[Session]) -> Result<(), StoreError>;
}

//! In-process store for tests and tooling.

use std::cell::{Cell, RefCell};

use super::SessionStore;
use crate::error::StoreError;
use crate::session::Session;

/// Session store held in memory; counts writes
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    sessions: RefCell<Vec<Session>>,
    writes: Cell<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `save_all` calls so far
    pub fn writes(&self) -> usize {
        self.writes.get()
    }
}

impl SessionStore for MemoryStore {
    fn load_all(&self) -> Result<Vec<Session>, StoreError> {
        Ok(self.sessions.borrow().clone())
    }

    fn save_all(&self, sessions: &[Session]) -> Result<(), StoreError> {
        *self.sessions.borrow_mut() = sessions.to_vec();
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }
}

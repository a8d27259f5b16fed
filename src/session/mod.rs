//! Player sessions
//!
//! A session walks the story graph one transition at a time:
//! - Active at any node with outgoing transitions
//! - Terminal at an ending; the play loop stops there
//! - Persisted after every accepted transition

pub mod manager;
pub mod state;

use std::io;

pub use manager::SessionManager;
pub use state::{Session, SessionState, SessionSummary};

/// Asks the player to pick one of several options
///
/// Implementations validate input themselves and keep asking until they
/// have an index in `0..labels.len()`.
pub trait ChoiceProvider {
    /// Zero-based index into `labels`
    fn choose(&mut self, labels: &[&str]) -> io::Result<usize>;
}

impl<F> ChoiceProvider for F
where
    F: FnMut(&[&str]) -> io::Result<usize>,
{
    fn choose(&mut self, labels: &[&str]) -> io::Result<usize> {
        self(labels)
    }
}

//! Cave Adventure - A menu-driven text adventure
//!
//! Core modules:
//! - `story`: Immutable story graph (nodes, transitions, structural validation)
//! - `session`: Player sessions and the step-by-step traversal engine
//! - `persistence`: Save collection storage (JSON file, in-memory)
//! - `platform`: Terminal prompts and text reveal
//! - `settings`: Configuration and per-session display preferences
//! - `clock`: Wall-clock source for save timestamps
//! - `error`: Error types

pub mod clock;
pub mod error;
pub mod persistence;
pub mod platform;
pub mod session;
pub mod settings;
pub mod story;

pub use error::{Error, GraphError, Result, StoreError};
pub use session::{ChoiceProvider, Session, SessionManager, SessionState};
pub use settings::{DisplayPreferences, Settings, TextSpeed};
pub use story::{Node, StoryGraph, Transition};

/// Game configuration constants
pub mod consts {
    /// Default save file name (relative to the working directory)
    pub const SAVE_FILE_NAME: &str = "saved_game.json";
    /// Label shown for an unlabeled transition offered alongside others
    pub const CONTINUE_LABEL: &str = "Continue";
    /// Save timestamp format used in selection menus
    pub const TIMESTAMP_FORMAT: &str = "%d-%m-%Y %H:%M:%S";
}

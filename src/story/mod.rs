//! Story graph module
//!
//! The story is static content: nodes and transitions are built or loaded
//! once, validated, and then shared read-only by every session.
//! - No mutation after construction
//! - Stable node order (authoring order drives menus and reports)
//! - No I/O beyond loading the story document

pub mod bundled;
pub mod graph;
pub mod validation;

pub use graph::{Node, StoryGraph, Transition};

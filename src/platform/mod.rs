//! Platform abstraction layer
//!
//! Handles the terminal side of the game:
//! - Numbered menus with input validation
//! - Free-text and yes/no prompts
//! - Typewriter-style text reveal

pub mod terminal;

pub use terminal::Terminal;

//! The Cave of Shadows, compiled into the binary.

use super::graph::StoryGraph;
use crate::error::Result;

const CAVE_OF_SHADOWS: &str = include_str!("../../content/cave_of_shadows.json");

impl StoryGraph {
    /// The bundled adventure, validated
    pub fn bundled() -> Result<Self> {
        Self::from_json(CAVE_OF_SHADOWS)?.into_validated()
    }
}

//! Error types for the story engine and save store.

use std::io;

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

/// A single structural problem in a story graph.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// The designated start node is not defined.
    #[error("start node \"{0}\" does not exist")]
    MissingStart(String),

    /// Two or more nodes share an id; later definitions are shadowed.
    #[error("node \"{0}\" is defined more than once")]
    DuplicateNode(String),

    /// A transition points at a node that does not exist.
    #[error("invalid target in node \"{node}\": \"{target}\"")]
    DanglingTarget {
        /// Node owning the transition.
        node: String,
        /// The unresolved target id.
        target: String,
    },

    /// A node cannot be reached from the start node.
    #[error("node \"{node}\" is unreachable from the start node")]
    Unreachable {
        /// The orphaned node.
        node: String,
    },
}

/// Failures of the save store itself.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing file failed.
    #[error("save store I/O error: {0}")]
    Io(#[from] io::Error),

    /// The collection could not be serialized.
    #[error("failed to encode saves: {0}")]
    Encode(#[source] serde_json::Error),

    /// A record inside an otherwise readable collection is malformed.
    #[error("save record #{index} is corrupt: {source}")]
    CorruptRecord {
        /// Position of the record in the collection.
        index: usize,
        /// Decoding failure.
        #[source]
        source: serde_json::Error,
    },
}

/// Top-level error type.
#[derive(Debug, Error)]
pub enum Error {
    /// A session references a node absent from the story graph.
    #[error("unknown location \"{0}\" (save data may be corrupted)")]
    UnknownLocation(String),

    /// Story content failed structural validation.
    #[error("story content is invalid ({} problem(s))", .0.len())]
    InvalidStory(Vec<GraphError>),

    /// Story document could not be parsed.
    #[error("malformed story document: {0}")]
    StoryFormat(#[from] serde_json::Error),

    /// Story document could not be read.
    #[error("failed to read story file: {0}")]
    StoryIo(#[source] io::Error),

    /// A save with that name already exists.
    #[error("a game named \"{0}\" already exists")]
    DuplicateName(String),

    /// No save with that name exists.
    #[error("no saved game named \"{0}\"")]
    NotFound(String),

    /// The choice provider returned an index outside the offered options.
    #[error("choice {index} is out of range for {count} option(s)")]
    ChoiceOutOfRange {
        /// Returned index.
        index: usize,
        /// Number of options offered.
        count: usize,
    },

    /// Save store failure.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Player input could not be read.
    #[error("failed to read player input: {0}")]
    Prompt(#[from] io::Error),
}

impl Error {
    /// Whether the condition is user-facing and should be answered with a re-prompt.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Error::DuplicateName(_) | Error::NotFound(_))
    }
}

//! Story nodes, transitions and the immutable graph that holds them.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::CONTINUE_LABEL;
use crate::error::{Error, Result};

/// A directed edge between two locations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    /// Player-facing choice text. `None` marks a plain "continue" step.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Id of the destination node
    pub target: String,
}

impl Transition {
    pub fn new(label: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            target: target.into(),
        }
    }

    /// Unlabeled transition
    pub fn continue_to(target: impl Into<String>) -> Self {
        Self {
            label: None,
            target: target.into(),
        }
    }

    /// Text shown in a choice menu
    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or(CONTINUE_LABEL)
    }
}

/// A single story location
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    pub description: String,
    /// Outgoing transitions in display order. Empty means the story ends here.
    #[serde(default)]
    pub options: Vec<Transition>,
    /// Items picked up on arrival
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<String>,
}

impl Node {
    pub fn new(id: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            options: Vec::new(),
            items: Vec::new(),
        }
    }

    /// Builder: add a labeled choice
    pub fn with_option(mut self, label: impl Into<String>, target: impl Into<String>) -> Self {
        self.options.push(Transition::new(label, target));
        self
    }

    /// Builder: add an unlabeled transition
    pub fn with_continue(mut self, target: impl Into<String>) -> Self {
        self.options.push(Transition::continue_to(target));
        self
    }

    /// Builder: add items found here
    pub fn with_items<I, S>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.items.extend(items.into_iter().map(Into::into));
        self
    }

    pub fn is_terminal(&self) -> bool {
        self.options.is_empty()
    }

    /// The transition taken without asking the player, if any.
    ///
    /// Only a node whose sole option is unlabeled advances automatically.
    pub fn auto_continue(&self) -> Option<&Transition> {
        match self.options.as_slice() {
            [only] if only.label.is_none() => Some(only),
            _ => None,
        }
    }

    /// Menu labels in display order
    pub fn labels(&self) -> Vec<&str> {
        self.options.iter().map(Transition::display_label).collect()
    }
}

/// On-disk story document. Nodes are a list so duplicate ids stay visible.
#[derive(Debug, Deserialize)]
struct StoryDocument {
    #[serde(default)]
    title: Option<String>,
    start: String,
    nodes: Vec<Node>,
}

/// Immutable story graph
///
/// Lookups resolve to the first node defined with a given id; any later
/// definition with the same id is reported by [`StoryGraph::validate`].
#[derive(Debug, Clone)]
pub struct StoryGraph {
    title: Option<String>,
    start: String,
    nodes: Vec<Node>,
    index: HashMap<String, usize>,
}

impl StoryGraph {
    /// Build a graph without validating it
    pub fn new(start: impl Into<String>, nodes: Vec<Node>) -> Self {
        let mut index = HashMap::with_capacity(nodes.len());
        for (i, node) in nodes.iter().enumerate() {
            index.entry(node.id.clone()).or_insert(i);
        }
        Self {
            title: None,
            start: start.into(),
            nodes,
            index,
        }
    }

    /// Builder: set the display title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Build a graph and reject it if it has any structural problem
    pub fn validated(start: impl Into<String>, nodes: Vec<Node>) -> Result<Self> {
        Self::new(start, nodes).into_validated()
    }

    /// Parse a JSON story document (`{"start": .., "nodes": [..]}`)
    pub fn from_json(json: &str) -> Result<Self> {
        let doc: StoryDocument = serde_json::from_str(json)?;
        let graph = Self::new(doc.start, doc.nodes);
        Ok(match doc.title {
            Some(title) => graph.with_title(title),
            None => graph,
        })
    }

    /// Read and validate a story document from disk
    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path).map_err(Error::StoryIo)?;
        let graph = Self::from_json(&json)?.into_validated()?;
        log::info!(
            "Loaded story from {} ({} locations)",
            path.display(),
            graph.len()
        );
        Ok(graph)
    }

    pub(crate) fn into_validated(self) -> Result<Self> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            for e in &errors {
                log::error!("Story content: {}", e);
            }
            Err(Error::InvalidStory(errors))
        }
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Id of the node every new session starts at
    pub fn start(&self) -> &str {
        &self.start
    }

    /// All nodes in authoring order
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn get_node(&self, id: &str) -> Result<&Node> {
        self.index
            .get(id)
            .map(|&i| &self.nodes[i])
            .ok_or_else(|| Error::UnknownLocation(id.to_string()))
    }

    pub fn is_terminal(&self, id: &str) -> Result<bool> {
        self.get_node(id).map(Node::is_terminal)
    }
}

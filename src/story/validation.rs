//! Structural validation of story graphs.
//!
//! Content is checked once when it is built or loaded, never per session.
//! Every violation is collected so an author can fix them in one pass.

use std::collections::HashSet;

use super::graph::StoryGraph;
use crate::error::GraphError;

impl StoryGraph {
    /// Report every structural problem in the graph.
    ///
    /// Checks, in this order: the start node exists, node ids are unique,
    /// every transition target resolves, and every node is reachable from
    /// the start node. An empty result means the graph is valid.
    pub fn validate(&self) -> Vec<GraphError> {
        let mut errors = Vec::new();

        if !self.contains(self.start()) {
            errors.push(GraphError::MissingStart(self.start().to_string()));
        }

        let mut seen = HashSet::new();
        let mut reported = HashSet::new();
        for node in self.nodes() {
            if !seen.insert(node.id.as_str()) && reported.insert(node.id.as_str()) {
                errors.push(GraphError::DuplicateNode(node.id.clone()));
            }
        }

        for node in self.nodes() {
            for option in &node.options {
                if !self.contains(&option.target) {
                    errors.push(GraphError::DanglingTarget {
                        node: node.id.clone(),
                        target: option.target.clone(),
                    });
                }
            }
        }

        errors.extend(
            self.unreachable()
                .into_iter()
                .map(|id| GraphError::Unreachable { node: id.to_string() }),
        );

        errors
    }

    /// Ids of nodes that cannot be reached from the start node, in authoring order
    pub fn unreachable(&self) -> Vec<&str> {
        let reachable = self.reachable();
        let mut reported = HashSet::new();
        self.nodes()
            .iter()
            .map(|n| n.id.as_str())
            .filter(|id| !reachable.contains(id) && reported.insert(*id))
            .collect()
    }

    /// Depth-first walk from the start node; dangling targets are skipped
    fn reachable(&self) -> HashSet<&str> {
        let mut visited = HashSet::new();
        let Ok(start) = self.get_node(self.start()) else {
            return visited;
        };

        let mut stack = vec![start];
        while let Some(node) = stack.pop() {
            if !visited.insert(node.id.as_str()) {
                continue;
            }
            for option in &node.options {
                if let Ok(next) = self.get_node(&option.target) {
                    if !visited.contains(next.id.as_str()) {
                        stack.push(next);
                    }
                }
            }
        }
        visited
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::story::Node;
    use proptest::prelude::*;

    #[test]
    fn test_valid_graph_has_no_errors() {
        let graph = StoryGraph::new(
            "A",
            vec![
                Node::new("A", "").with_option("left", "B").with_option("right", "C"),
                Node::new("B", "").with_continue("A"),
                Node::new("C", ""),
            ],
        );
        assert!(graph.validate().is_empty());
    }

    #[test]
    fn test_reports_every_violation() {
        let graph = StoryGraph::new(
            "A",
            vec![
                Node::new("A", "").with_option("go", "B").with_option("jump", "Nowhere"),
                Node::new("B", ""),
                Node::new("Orphan", "").with_option("back", "A"),
                Node::new("Ending", ""),
                Node::new("Ending", ""),
            ],
        );
        assert_eq!(
            graph.validate(),
            vec![
                GraphError::DuplicateNode("Ending".into()),
                GraphError::DanglingTarget {
                    node: "A".into(),
                    target: "Nowhere".into()
                },
                GraphError::Unreachable { node: "Orphan".into() },
                GraphError::Unreachable { node: "Ending".into() },
            ]
        );
    }

    #[test]
    fn test_duplicate_reported_once() {
        let graph = StoryGraph::new(
            "A",
            vec![
                Node::new("A", "").with_option("go", "B"),
                Node::new("B", ""),
                Node::new("B", ""),
                Node::new("B", ""),
            ],
        );
        assert_eq!(graph.validate(), vec![GraphError::DuplicateNode("B".into())]);
    }

    #[test]
    fn test_missing_start() {
        let graph = StoryGraph::new("Start", vec![Node::new("A", "")]);
        assert_eq!(
            graph.validate(),
            vec![
                GraphError::MissingStart("Start".into()),
                GraphError::Unreachable { node: "A".into() },
            ]
        );
    }

    #[test]
    fn test_cycles_terminate() {
        let graph = StoryGraph::new(
            "A",
            vec![
                Node::new("A", "").with_option("loop", "A").with_option("on", "B"),
                Node::new("B", "").with_option("back", "A"),
            ],
        );
        assert!(graph.validate().is_empty());
        assert!(graph.unreachable().is_empty());
    }

    /// Graph where node i > 0 always has an incoming edge from some node j < i,
    /// plus arbitrary extra edges between existing nodes.
    fn connected_graph() -> impl Strategy<Value = StoryGraph> {
        (2usize..24)
            .prop_flat_map(|n| {
                let parents: Vec<_> = (1..n).map(|i| 0..i).collect();
                let extras = prop::collection::vec((0..n, 0..n), 0..n * 2);
                (Just(n), parents, extras)
            })
            .prop_map(|(n, parents, extras)| {
                let mut nodes: Vec<Node> =
                    (0..n).map(|i| Node::new(format!("n{i}"), "")).collect();
                for (child, parent) in parents.into_iter().enumerate() {
                    let child = child + 1;
                    nodes[parent] = nodes[parent]
                        .clone()
                        .with_option(format!("to {child}"), format!("n{child}"));
                }
                for (from, to) in extras {
                    nodes[from] = nodes[from].clone().with_option("extra", format!("n{to}"));
                }
                StoryGraph::new("n0", nodes)
            })
    }

    proptest! {
        #[test]
        fn prop_connected_graphs_validate(graph in connected_graph()) {
            prop_assert!(graph.validate().is_empty());
        }

        #[test]
        fn prop_every_target_resolves_when_valid(graph in connected_graph()) {
            for node in graph.nodes() {
                for option in &node.options {
                    prop_assert!(graph.get_node(&option.target).is_ok());
                }
            }
        }

        #[test]
        fn prop_dangling_edge_is_reported(graph in connected_graph(), pick in any::<prop::sample::Index>()) {
            let mut nodes = graph.nodes().to_vec();
            let i = pick.index(nodes.len());
            nodes[i] = nodes[i].clone().with_option("void", "does-not-exist");
            let broken = StoryGraph::new(graph.start(), nodes);
            prop_assert_eq!(
                broken.validate(),
                vec![GraphError::DanglingTarget {
                    node: format!("n{i}"),
                    target: "does-not-exist".into(),
                }]
            );
        }

        #[test]
        fn prop_detached_node_is_unreachable(graph in connected_graph()) {
            let mut nodes = graph.nodes().to_vec();
            nodes.push(Node::new("detached", "").with_option("in", "n0"));
            let broken = StoryGraph::new(graph.start(), nodes);
            prop_assert_eq!(
                broken.validate(),
                vec![GraphError::Unreachable { node: "detached".into() }]
            );
        }
    }
}

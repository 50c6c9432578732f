use serde::Serialize;

use crate::graph::{Edge, Graph, NodeId, NodeSet};
use crate::traversal::{traverse, TraversalMode};

/// Vertices selected around a focal vertex plus the edges among them.
#[derive(Debug, Clone, Serialize)]
pub struct SubgraphResult {
    pub nodes: NodeSet,
    pub edges: Vec<Edge>,
}

/// Edges whose source and target are both in `nodes`.
///
/// Input order is kept and parallel edges are not collapsed.
pub fn induced_edges(graph: &Graph, nodes: &NodeSet) -> Vec<Edge> {
    graph
        .edges()
        .iter()
        .filter(|e| nodes.contains(&e.source) && nodes.contains(&e.target))
        .copied()
        .collect()
}

/// `traverse(start, mode)` plus `start` itself, with the induced edges.
///
/// An unknown `start` yields an empty subgraph.
pub fn extract_subgraph(graph: &Graph, start: NodeId, mode: TraversalMode) -> SubgraphResult {
    if !graph.contains(start) {
        return SubgraphResult {
            nodes: NodeSet::new(),
            edges: Vec::new(),
        };
    }

    let mut nodes = traverse(graph, start, mode);
    nodes.insert(start);
    let edges = induced_edges(graph, &nodes);

    SubgraphResult { nodes, edges }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_induced_edges_requires_both_endpoints() {
        let g = Graph::from_pairs(&[(1, 2), (2, 3), (3, 4), (1, 2)]);
        let nodes: NodeSet = [1, 2, 3].into_iter().collect();
        assert_eq!(
            induced_edges(&g, &nodes),
            vec![Edge::new(1, 2), Edge::new(2, 3), Edge::new(1, 2)]
        );
    }

    #[test]
    fn test_induced_edges_empty_set() {
        let g = Graph::from_pairs(&[(1, 2)]);
        assert!(induced_edges(&g, &NodeSet::new()).is_empty());
    }

    #[test]
    fn test_extract_subgraph_descendants() {
        let g = Graph::from_pairs(&[(0, 1), (1, 2), (1, 3), (5, 1)]);
        let sub = extract_subgraph(&g, 1, TraversalMode::Descendants);
        let nodes: Vec<NodeId> = sub.nodes.iter().copied().collect();
        assert_eq!(nodes, vec![1, 2, 3]);
        assert_eq!(sub.edges, vec![Edge::new(1, 2), Edge::new(1, 3)]);
    }

    #[test]
    fn test_extract_subgraph_unknown_start() {
        let g = Graph::from_pairs(&[(0, 1)]);
        let sub = extract_subgraph(&g, 9, TraversalMode::Web);
        assert!(sub.nodes.is_empty());
        assert!(sub.edges.is_empty());
    }
}

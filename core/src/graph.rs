use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GraphError;

/// Vertex identifier as it appears in the edge list.
pub type NodeId = u64;

/// De-duplicated, ordered vertex collection returned by every relationship query.
pub type NodeSet = BTreeSet<NodeId>;

/// A directed prerequisite edge: `source` must come before `target`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub source: NodeId,
    pub target: NodeId,
}

impl Edge {
    pub fn new(source: NodeId, target: NodeId) -> Self {
        Self { source, target }
    }

    /// The same edge pointing the other way.
    pub fn reversed(self) -> Self {
        Self {
            source: self.target,
            target: self.source,
        }
    }
}

impl From<(NodeId, NodeId)> for Edge {
    fn from((source, target): (NodeId, NodeId)) -> Self {
        Self { source, target }
    }
}

/// Which adjacency a traversal is allowed to follow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TraversalDirection {
    /// Follow edges source → target only.
    #[default]
    Outgoing,
    /// Follow edges target → source only.
    Incoming,
    /// Follow edges in both directions (undirected).
    Both,
}

impl FromStr for TraversalDirection {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "outgoing" | "out" => Ok(TraversalDirection::Outgoing),
            "incoming" | "in" => Ok(TraversalDirection::Incoming),
            "both" => Ok(TraversalDirection::Both),
            other => Err(GraphError::UnknownDirection(other.to_string())),
        }
    }
}

impl fmt::Display for TraversalDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TraversalDirection::Outgoing => "outgoing",
            TraversalDirection::Incoming => "incoming",
            TraversalDirection::Both => "both",
        };
        f.write_str(s)
    }
}

/// Immutable adjacency index over a fixed edge list.
///
/// The raw edge list is kept in input order alongside `outgoing[a]` (targets
/// of edges leaving a) and `incoming[b]` (sources of edges entering b). Both
/// lists preserve edge order and keep parallel edges; queries de-duplicate.
/// A vertex exists only by appearing in some edge.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    edges: Vec<Edge>,
    outgoing: HashMap<NodeId, Vec<NodeId>>,
    incoming: HashMap<NodeId, Vec<NodeId>>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index an edge list. The list is copied; the caller keeps its own.
    pub fn from_edges<I>(edges: I) -> Self
    where
        I: IntoIterator<Item = Edge>,
    {
        let edges: Vec<Edge> = edges.into_iter().collect();
        let mut outgoing: HashMap<NodeId, Vec<NodeId>> = HashMap::with_capacity(edges.len());
        let mut incoming: HashMap<NodeId, Vec<NodeId>> = HashMap::with_capacity(edges.len());

        for edge in &edges {
            outgoing.entry(edge.source).or_default().push(edge.target);
            incoming.entry(edge.target).or_default().push(edge.source);
        }

        Self {
            edges,
            outgoing,
            incoming,
        }
    }

    /// Index `(source, target)` pairs.
    pub fn from_pairs(pairs: &[(NodeId, NodeId)]) -> Self {
        Self::from_edges(pairs.iter().copied().map(Edge::from))
    }

    /// The edge list in input order, duplicates included.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// True if `id` appears as the source or target of some edge.
    pub fn contains(&self, id: NodeId) -> bool {
        self.outgoing.contains_key(&id) || self.incoming.contains_key(&id)
    }

    /// Targets of edges leaving `id`, in edge order (may repeat).
    pub fn neighbors_out(&self, id: NodeId) -> &[NodeId] {
        self.outgoing.get(&id).map(|v| v.as_slice()).unwrap_or(&[])
    }

    /// Sources of edges entering `id`, in edge order (may repeat).
    pub fn neighbors_in(&self, id: NodeId) -> &[NodeId] {
        self.incoming.get(&id).map(|v| v.as_slice()).unwrap_or(&[])
    }

    /// Children first, then parents: the undirected adjacency of `id`.
    pub fn neighbors_all(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.neighbors_out(id)
            .iter()
            .chain(self.neighbors_in(id).iter())
            .copied()
    }

    /// Neighbours reachable from `id` by one edge in the given direction,
    /// children before parents.
    pub fn neighbors(
        &self,
        id: NodeId,
        direction: TraversalDirection,
    ) -> impl Iterator<Item = NodeId> + '_ {
        let out: &[NodeId] = match direction {
            TraversalDirection::Incoming => &[],
            _ => self.neighbors_out(id),
        };
        let inc: &[NodeId] = match direction {
            TraversalDirection::Outgoing => &[],
            _ => self.neighbors_in(id),
        };
        out.iter().chain(inc.iter()).copied()
    }

    /// Every vertex that appears in any edge.
    pub fn vertices(&self) -> NodeSet {
        self.outgoing
            .keys()
            .chain(self.incoming.keys())
            .copied()
            .collect()
    }

    pub fn node_count(&self) -> usize {
        self.vertices().len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// A new graph over `undirected(self.edges())`.
    pub fn undirected(&self) -> Graph {
        Graph::from_edges(undirected(&self.edges))
    }

    /// Approximate memory usage in bytes.
    pub fn memory_usage(&self) -> usize {
        use std::mem::size_of;

        let edge_mem = self.edges.len() * size_of::<Edge>();
        let adjacency: usize = self
            .outgoing
            .values()
            .chain(self.incoming.values())
            .map(|v| v.len() * size_of::<NodeId>() + size_of::<Vec<NodeId>>() + size_of::<NodeId>())
            .sum();

        edge_mem + adjacency
    }
}

impl From<Vec<Edge>> for Graph {
    fn from(edges: Vec<Edge>) -> Self {
        Graph::from_edges(edges)
    }
}

/// Double every edge into both directions.
///
/// Append-only: for each `(s, t)` the output holds `(s, t)` then `(t, s)`,
/// even when the reciprocal already exists. Applying it twice therefore
/// yields every original edge's reciprocal at least twice.
pub fn undirected(edges: &[Edge]) -> Vec<Edge> {
    let mut out = Vec::with_capacity(edges.len() * 2);
    for &edge in edges {
        out.push(edge);
        out.push(edge.reversed());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_edges_builds_both_adjacencies() {
        let g = Graph::from_pairs(&[(1, 2), (2, 3), (1, 4)]);
        assert_eq!(g.neighbors_out(1), &[2, 4]);
        assert_eq!(g.neighbors_in(3), &[2]);
        assert_eq!(g.edge_count(), 3);
        assert_eq!(g.node_count(), 4);
    }

    #[test]
    fn test_vertex_exists_only_through_edges() {
        let g = Graph::from_pairs(&[(1, 2)]);
        assert!(g.contains(1));
        assert!(g.contains(2));
        assert!(!g.contains(5));
        assert!(g.neighbors_out(5).is_empty());
    }

    #[test]
    fn test_parallel_edges_kept_in_index() {
        let g = Graph::from_pairs(&[(1, 2), (1, 2)]);
        assert_eq!(g.neighbors_out(1), &[2, 2]);
        assert_eq!(g.edge_count(), 2);
    }

    #[test]
    fn test_neighbors_direction_filter() {
        let g = Graph::from_pairs(&[(1, 2), (3, 1)]);
        let out: Vec<_> = g.neighbors(1, TraversalDirection::Outgoing).collect();
        assert_eq!(out, vec![2]);

        let inc: Vec<_> = g.neighbors(1, TraversalDirection::Incoming).collect();
        assert_eq!(inc, vec![3]);

        let both: Vec<_> = g.neighbors(1, TraversalDirection::Both).collect();
        assert_eq!(both, vec![2, 3]);
    }

    #[test]
    fn test_undirected_doubles_every_edge() {
        let edges = vec![Edge::new(1, 2), Edge::new(2, 3)];
        let doubled = undirected(&edges);
        assert_eq!(
            doubled,
            vec![
                Edge::new(1, 2),
                Edge::new(2, 1),
                Edge::new(2, 3),
                Edge::new(3, 2)
            ]
        );
    }

    #[test]
    fn test_undirected_is_append_only() {
        let edges = vec![Edge::new(1, 2), Edge::new(2, 1)];
        let once = undirected(&edges);
        assert_eq!(once.len(), 4);

        let twice = undirected(&once);
        assert_eq!(twice.len(), 8);
        let reciprocal = twice.iter().filter(|e| **e == Edge::new(2, 1)).count();
        assert!(reciprocal >= 2);
    }

    #[test]
    fn test_graph_undirected_view() {
        let g = Graph::from_pairs(&[(1, 2)]).undirected();
        assert_eq!(g.neighbors_out(2), &[1]);
        assert_eq!(g.neighbors_out(1), &[2]);
    }

    #[test]
    fn test_direction_parsing() {
        assert_eq!("out".parse::<TraversalDirection>().unwrap(), TraversalDirection::Outgoing);
        assert_eq!("INCOMING".parse::<TraversalDirection>().unwrap(), TraversalDirection::Incoming);
        assert_eq!("both".parse::<TraversalDirection>().unwrap(), TraversalDirection::Both);
        assert!("sideways".parse::<TraversalDirection>().is_err());
        assert_eq!(TraversalDirection::Both.to_string(), "both");
    }

    #[test]
    fn test_edge_serde_field_names() {
        let edge: Edge = serde_json::from_str(r#"{"source": 7, "target": 9}"#).unwrap();
        assert_eq!(edge, Edge::new(7, 9));
    }

    #[test]
    fn test_memory_usage_nonzero() {
        let g = Graph::from_edges((0..100u64).map(|i| Edge::new(0, i + 1)));
        assert!(g.memory_usage() > 0);
        assert_eq!(Graph::new().memory_usage(), 0);
    }
}

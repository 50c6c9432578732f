//! Route inspection: cycle detection, degree analysis and the odd-vertex
//! pairing heuristic for the route-inspection (postman) problem.
//!
//! `postman` pairs every odd-degree vertex with every other one and joins
//! each pair with a shortest path. This is deliberately naive: it is not a
//! minimum-weight perfect matching, so the tour it yields is not a minimal
//! Eulerian augmentation.

use std::collections::HashSet;

use serde::Serialize;

use crate::graph::{Graph, NodeId, NodeSet};
use crate::path::shortest_path;

/// Degree information for a single vertex.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DegreeResult {
    pub node_id: NodeId,
    pub out_degree: u32,
    pub in_degree: u32,
    pub total_degree: u32,
}

/// Shortest path joining one pair of odd-degree vertices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostmanRoute {
    pub from: NodeId,
    pub to: NodeId,
    /// Empty when the two vertices are not connected.
    pub path: Vec<NodeId>,
}

/// True if the undirected adjacency of the graph contains a cycle.
///
/// Each vertex is adjacent to its distinct parents and children, itself
/// excluded. Parallel edges and a reciprocal pair `a→b`,
/// `b→a` collapse to one adjacency and a self-loop to none, so none of them
/// is a cycle alone. A diamond `1→2, 1→3, 2→4, 3→4` is one.
///
/// Depth-first walk from every unvisited vertex; meeting a visited vertex
/// other than the one just come from closes a cycle.
pub fn has_cycle(graph: &Graph) -> bool {
    let mut visited: HashSet<NodeId> = HashSet::new();

    for root in graph.vertices() {
        if !visited.insert(root) {
            continue;
        }

        // (vertex, vertex it was reached from, its neighbours, next index)
        let mut stack: Vec<(NodeId, Option<NodeId>, Vec<NodeId>, usize)> =
            vec![(root, None, distinct_neighbors(graph, root), 0)];

        while let Some(frame) = stack.last_mut() {
            let (current, parent) = (frame.0, frame.1);
            match frame.2.get(frame.3).copied() {
                Some(next) => {
                    frame.3 += 1;
                    if Some(next) == parent {
                        continue;
                    }
                    if !visited.insert(next) {
                        tracing::debug!(at = next, from = current, "cycle detected");
                        return true;
                    }
                    stack.push((next, Some(current), distinct_neighbors(graph, next), 0));
                }
                None => {
                    stack.pop();
                }
            }
        }
    }

    false
}

/// Distinct neighbours of `id` in either direction, `id` itself excluded,
/// in `neighbors_all` order.
fn distinct_neighbors(graph: &Graph, id: NodeId) -> Vec<NodeId> {
    let mut seen = HashSet::new();
    graph
        .neighbors_all(id)
        .filter(|&n| n != id && seen.insert(n))
        .collect()
}

/// Number of distinct neighbours of `id` in either direction, `id` itself excluded.
pub fn neighbor_degree(graph: &Graph, id: NodeId) -> usize {
    distinct_neighbors(graph, id).len()
}

/// Vertices with an odd number of distinct neighbours.
pub fn odd_degree_nodes(graph: &Graph) -> NodeSet {
    graph
        .vertices()
        .into_iter()
        .filter(|&v| neighbor_degree(graph, v) % 2 == 1)
        .collect()
}

/// Shortest path between every unordered pair of odd-degree vertices.
///
/// Degree and paths both treat the graph as undirected. Pairs come out in
/// ascending `(from, to)` order with `from < to`.
pub fn postman(graph: &Graph) -> Vec<PostmanRoute> {
    let odd: Vec<NodeId> = odd_degree_nodes(graph).into_iter().collect();
    let view = graph.undirected();

    let mut routes = Vec::with_capacity(odd.len() * odd.len().saturating_sub(1) / 2);
    for (i, &from) in odd.iter().enumerate() {
        for &to in &odd[i + 1..] {
            routes.push(PostmanRoute {
                from,
                to,
                path: shortest_path(&view, from, to),
            });
        }
    }

    tracing::debug!(odd = odd.len(), routes = routes.len(), "postman");
    routes
}

/// Every vertex on any `postman` route, first occurrence order, no repeats.
pub fn postman_tour(graph: &Graph) -> Vec<NodeId> {
    let mut seen: HashSet<NodeId> = HashSet::new();
    postman(graph)
        .into_iter()
        .flat_map(|route| route.path)
        .filter(|v| seen.insert(*v))
        .collect()
}

/// Vertices ranked by edge count (parallel edges counted).
///
/// If `top_n` is 0, returns all vertices. Otherwise returns the top N by
/// total degree descending, ties broken by id ascending.
pub fn degree_centrality(graph: &Graph, top_n: usize) -> Vec<DegreeResult> {
    let mut results: Vec<DegreeResult> = graph
        .vertices()
        .into_iter()
        .map(|id| {
            let out_degree = graph.neighbors_out(id).len() as u32;
            let in_degree = graph.neighbors_in(id).len() as u32;
            DegreeResult {
                node_id: id,
                out_degree,
                in_degree,
                total_degree: out_degree + in_degree,
            }
        })
        .collect();

    results.sort_by(|a, b| {
        b.total_degree
            .cmp(&a.total_degree)
            .then(a.node_id.cmp(&b.node_id))
    });

    if top_n > 0 && top_n < results.len() {
        results.truncate(top_n);
    }

    results
}

//! Relationship queries around a focal vertex.
//!
//! Every function returns a fresh [`NodeSet`] and never includes the queried
//! vertex itself unless its name ends in `_and_self`. Closures are computed
//! with an explicit worklist and a visited set, so cyclic graphs terminate.

use crate::graph::{Graph, NodeId, NodeSet};

/// Distinct vertices `v` with an edge `(v, id)`.
///
/// A self-loop makes `id` its own parent.
pub fn parents(graph: &Graph, id: NodeId) -> NodeSet {
    graph.neighbors_in(id).iter().copied().collect()
}

/// Distinct vertices `v` with an edge `(id, v)`.
pub fn children(graph: &Graph, id: NodeId) -> NodeSet {
    graph.neighbors_out(id).iter().copied().collect()
}

/// All vertices appearing in any edge.
pub fn everything(graph: &Graph) -> NodeSet {
    graph.vertices()
}

/// Vertices whose `related` set is empty (only possible for vertices that
/// appear solely on self-loops).
pub fn isolated_nodes(graph: &Graph) -> NodeSet {
    graph
        .vertices()
        .into_iter()
        .filter(|&v| related(graph, v).is_empty())
        .collect()
}

/// Transitive closure of `parents`, excluding `id` even when a cycle leads back to it.
pub fn ancestors(graph: &Graph, id: NodeId) -> NodeSet {
    closure(id, |v| graph.neighbors_in(v))
}

/// Transitive closure of `children`, excluding `id` even when a cycle leads back to it.
pub fn descendants(graph: &Graph, id: NodeId) -> NodeSet {
    closure(id, |v| graph.neighbors_out(v))
}

/// Children of every parent of `id`, minus `id`.
pub fn siblings(graph: &Graph, id: NodeId) -> NodeSet {
    let mut result = NodeSet::new();
    for parent in parents(graph, id) {
        result.extend(graph.neighbors_out(parent).iter().copied());
    }
    result.remove(&id);
    result
}

/// Descendants of every sibling of `id`, minus `id`.
pub fn cousins(graph: &Graph, id: NodeId) -> NodeSet {
    let mut result = NodeSet::new();
    for sibling in siblings(graph, id) {
        result.extend(descendants(graph, sibling));
    }
    result.remove(&id);
    result
}

/// `ancestors(id) ∪ descendants(id)`.
pub fn related(graph: &Graph, id: NodeId) -> NodeSet {
    let mut result = ancestors(graph, id);
    result.extend(descendants(graph, id));
    result
}

pub fn ancestors_and_self(graph: &Graph, id: NodeId) -> NodeSet {
    with_self(ancestors(graph, id), id)
}

pub fn descendants_and_self(graph: &Graph, id: NodeId) -> NodeSet {
    with_self(descendants(graph, id), id)
}

pub fn siblings_and_self(graph: &Graph, id: NodeId) -> NodeSet {
    with_self(siblings(graph, id), id)
}

pub fn cousins_and_self(graph: &Graph, id: NodeId) -> NodeSet {
    with_self(cousins(graph, id), id)
}

pub fn related_and_self(graph: &Graph, id: NodeId) -> NodeSet {
    with_self(related(graph, id), id)
}

fn with_self(mut set: NodeSet, id: NodeId) -> NodeSet {
    set.insert(id);
    set
}

/// Worklist closure seeded with the direct neighbours of `id`.
///
/// A vertex is expanded only the first time it is seen. `id` is marked seen
/// up front so a cycle through it stops there.
fn closure<'g, F>(id: NodeId, next: F) -> NodeSet
where
    F: Fn(NodeId) -> &'g [NodeId],
{
    let mut seen = NodeSet::new();
    seen.insert(id);
    let mut stack: Vec<NodeId> = next(id).to_vec();

    while let Some(v) = stack.pop() {
        if seen.insert(v) {
            stack.extend(next(v).iter().copied().filter(|n| !seen.contains(n)));
        }
    }

    seen.remove(&id);
    seen
}

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};

use crate::graph::{Graph, NodeId, TraversalDirection};

/// Priority-queue entry: a candidate path and its hop count.
///
/// Ordered so that `BinaryHeap` pops the fewest hops first and, among equal
/// hop counts, the entry pushed earliest.
#[derive(Debug, Clone)]
struct Candidate {
    hops: u32,
    seq: u64,
    path: Vec<NodeId>,
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.hops == other.hops && self.seq == other.seq
    }
}

impl Eq for Candidate {}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed for a min-heap
        other
            .hops
            .cmp(&self.hops)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Fewest-hop path from `source` to `target` following edge direction.
///
/// Returns the vertex sequence including both endpoints, `[source]` when
/// `source == target`, or an empty vector when `target` is unreachable.
pub fn shortest_path(graph: &Graph, source: NodeId, target: NodeId) -> Vec<NodeId> {
    shortest_path_with(graph, source, target, TraversalDirection::Outgoing)
}

/// Fewest-hop path using the adjacency selected by `direction`.
///
/// Every edge weighs one hop, so the queue behaves like BFS. A vertex is
/// marked visited when popped, not when pushed: several partial paths to the
/// same vertex may sit in the queue, and the first one popped wins. Ties
/// between equal-length candidates go to the one discovered first.
pub fn shortest_path_with(
    graph: &Graph,
    source: NodeId,
    target: NodeId,
    direction: TraversalDirection,
) -> Vec<NodeId> {
    if source == target {
        return vec![source];
    }
    if !graph.contains(source) || !graph.contains(target) {
        return Vec::new();
    }

    let mut visited: HashSet<NodeId> = HashSet::new();
    let mut queue: BinaryHeap<Candidate> = BinaryHeap::new();
    let mut seq: u64 = 0;

    queue.push(Candidate {
        hops: 0,
        seq,
        path: vec![source],
    });

    while let Some(Candidate { hops, path, .. }) = queue.pop() {
        let Some(&current) = path.last() else {
            continue;
        };
        if !visited.insert(current) {
            continue;
        }
        if current == target {
            tracing::debug!(source, target, hops, expanded = visited.len(), "shortest_path");
            return path;
        }

        for next in graph.neighbors(current, direction) {
            if visited.contains(&next) {
                continue;
            }
            seq += 1;
            let mut extended = Vec::with_capacity(path.len() + 1);
            extended.extend_from_slice(&path);
            extended.push(next);
            tracing::trace!(from = current, to = next, hops = hops + 1, "enqueue");
            queue.push(Candidate {
                hops: hops + 1,
                seq,
                path: extended,
            });
        }
    }

    tracing::debug!(source, target, expanded = visited.len(), "shortest_path: unreachable");
    Vec::new()
}

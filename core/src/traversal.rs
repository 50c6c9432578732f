use std::collections::{HashMap, HashSet, VecDeque};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{GraphError, Result};
use crate::graph::{Graph, NodeId, NodeSet};

/// Which edges `traverse` may cross when growing the reachable set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TraversalMode {
    /// Follow edges against their direction (towards prerequisites).
    Ancestors,
    /// Follow edges along their direction (towards dependents).
    Descendants,
    /// Follow edges either way: undirected reachability.
    Web,
    /// Ancestors and descendants together, without sideways moves.
    Tree,
}

impl TraversalMode {
    pub const ALL: [TraversalMode; 4] = [
        TraversalMode::Ancestors,
        TraversalMode::Descendants,
        TraversalMode::Web,
        TraversalMode::Tree,
    ];
}

impl FromStr for TraversalMode {
    type Err = GraphError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ancestors" => Ok(TraversalMode::Ancestors),
            "descendants" => Ok(TraversalMode::Descendants),
            "web" => Ok(TraversalMode::Web),
            "tree" => Ok(TraversalMode::Tree),
            other => Err(GraphError::UnknownMode(other.to_string())),
        }
    }
}

impl fmt::Display for TraversalMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TraversalMode::Ancestors => "ancestors",
            TraversalMode::Descendants => "descendants",
            TraversalMode::Web => "web",
            TraversalMode::Tree => "tree",
        };
        f.write_str(s)
    }
}

/// Reachable set from `id` under `mode`, with `id` removed.
///
/// Fixed-point sweep: start from `{id}` and rescan the whole edge list,
/// adding the far endpoint of every edge whose near endpoint is already
/// visited and whose direction the mode accepts, until a full scan adds
/// nothing. Costs O(|E| × diameter) scans.
pub fn traverse(graph: &Graph, id: NodeId, mode: TraversalMode) -> NodeSet {
    match mode {
        TraversalMode::Tree => {
            let mut result = sweep(graph, id, TraversalMode::Ancestors);
            result.extend(sweep(graph, id, TraversalMode::Descendants));
            result
        }
        other => sweep(graph, id, other),
    }
}

fn sweep(graph: &Graph, id: NodeId, mode: TraversalMode) -> NodeSet {
    let (forward, backward) = match mode {
        TraversalMode::Descendants => (true, false),
        TraversalMode::Ancestors => (false, true),
        TraversalMode::Web | TraversalMode::Tree => (true, true),
    };

    let mut visited = NodeSet::new();
    visited.insert(id);
    let mut passes = 0usize;

    loop {
        passes += 1;
        let mut changed = false;
        for edge in graph.edges() {
            if forward && visited.contains(&edge.source) && visited.insert(edge.target) {
                changed = true;
            }
            if backward && visited.contains(&edge.target) && visited.insert(edge.source) {
                changed = true;
            }
        }
        if !changed {
            break;
        }
    }

    visited.remove(&id);
    tracing::debug!(start = id, %mode, passes, found = visited.len(), "traverse");
    visited
}

/// A vertex reached by a bounded traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Visit {
    pub node_id: NodeId,
    /// Hops from the start vertex at the moment of first discovery.
    pub depth: u32,
}

/// Result of a BFS/DFS/maze traversal.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TraversalResult {
    /// Discovered vertices in visit order, start vertex excluded.
    pub visits: Vec<Visit>,
    /// Vertices touched including the start vertex.
    pub nodes_visited: usize,
}

impl TraversalResult {
    pub fn node_ids(&self) -> Vec<NodeId> {
        self.visits.iter().map(|v| v.node_id).collect()
    }

    pub fn depth_of(&self, id: NodeId) -> Option<u32> {
        self.visits.iter().find(|v| v.node_id == id).map(|v| v.depth)
    }
}

/// Unbounded breadth-first visit over undirected adjacency.
pub fn bfs(graph: &Graph, start: NodeId) -> TraversalResult {
    bfs_neighborhood(graph, start, u32::MAX)
}

/// Breadth-first visit over undirected adjacency, stopping `max_depth` hops
/// out. Each vertex is visited once, at its minimum distance.
pub fn bfs_neighborhood(graph: &Graph, start: NodeId, max_depth: u32) -> TraversalResult {
    if !graph.contains(start) {
        return TraversalResult::default();
    }

    let mut seen: HashSet<NodeId> = HashSet::new();
    let mut queue: VecDeque<(NodeId, u32)> = VecDeque::new();
    let mut visits = Vec::new();

    seen.insert(start);
    queue.push_back((start, 0));

    while let Some((current, depth)) = queue.pop_front() {
        if depth >= max_depth {
            continue;
        }

        for next in graph.neighbors_all(current) {
            if seen.insert(next) {
                visits.push(Visit {
                    node_id: next,
                    depth: depth + 1,
                });
                queue.push_back((next, depth + 1));
            }
        }
    }

    TraversalResult {
        visits,
        nodes_visited: seen.len(),
    }
}

/// Depth-first visit over undirected adjacency, at most `max_depth` hops
/// from `start`.
///
/// Children are tried before parents, each in edge order. A vertex is never
/// revisited, even if a shorter route to it turns up later: the recorded
/// depth is the depth of first discovery. Uses an explicit frame stack.
pub fn dfs(graph: &Graph, start: NodeId, max_depth: i64) -> Result<TraversalResult> {
    if max_depth < 0 {
        return Err(GraphError::InvalidDepth { depth: max_depth });
    }
    if !graph.contains(start) {
        return Ok(TraversalResult::default());
    }

    let limit = u32::try_from(max_depth).unwrap_or(u32::MAX);
    let mut seen: HashSet<NodeId> = HashSet::new();
    let mut visits = Vec::new();
    // (vertex, depth, index of the next neighbour to try)
    let mut frames: Vec<(NodeId, u32, usize)> = vec![(start, 0, 0)];
    seen.insert(start);

    while let Some(frame) = frames.last_mut() {
        let (current, depth, cursor) = *frame;
        if depth >= limit {
            frames.pop();
            continue;
        }

        match neighbor_at(graph, current, cursor) {
            Some(next) => {
                frame.2 += 1;
                if seen.insert(next) {
                    visits.push(Visit {
                        node_id: next,
                        depth: depth + 1,
                    });
                    frames.push((next, depth + 1, 0));
                }
            }
            None => {
                frames.pop();
            }
        }
    }

    tracing::debug!(start, max_depth, found = visits.len(), "dfs");
    Ok(TraversalResult {
        visits,
        nodes_visited: seen.len(),
    })
}

/// The `index`-th entry of `neighbors_all(id)` without walking the iterator.
fn neighbor_at(graph: &Graph, id: NodeId, index: usize) -> Option<NodeId> {
    let out = graph.neighbors_out(id);
    match out.get(index) {
        Some(&n) => Some(n),
        None => graph.neighbors_in(id).get(index - out.len()).copied(),
    }
}

/// Unbounded stack-driven reachability over undirected adjacency.
///
/// Pops the most recently pushed vertex, so the walk dives down the last
/// neighbour first. Each vertex is reported once; `depth` is the length of
/// the route that first reached it, not the shortest one.
pub fn maze(graph: &Graph, start: NodeId) -> TraversalResult {
    if !graph.contains(start) {
        return TraversalResult::default();
    }

    let mut seen: HashSet<NodeId> = HashSet::new();
    let mut stack: Vec<(NodeId, u32)> = vec![(start, 0)];
    let mut visits = Vec::new();

    while let Some((current, depth)) = stack.pop() {
        if !seen.insert(current) {
            continue;
        }
        if current != start {
            visits.push(Visit {
                node_id: current,
                depth,
            });
        }
        for next in graph.neighbors_all(current) {
            if !seen.contains(&next) {
                stack.push((next, depth + 1));
            }
        }
    }

    TraversalResult {
        visits,
        nodes_visited: seen.len(),
    }
}

/// First route from `start` to `goal` found by backtracking search over
/// undirected adjacency. Not necessarily the shortest; empty if none.
pub fn maze_path(graph: &Graph, start: NodeId, goal: NodeId) -> Vec<NodeId> {
    if start == goal {
        return vec![start];
    }
    if !graph.contains(start) || !graph.contains(goal) {
        return Vec::new();
    }

    // vertex → vertex it was first reached from
    let mut came_from: HashMap<NodeId, NodeId> = HashMap::new();
    let mut stack: Vec<(NodeId, NodeId)> = vec![(start, start)];

    while let Some((current, from)) = stack.pop() {
        if came_from.contains_key(&current) {
            continue;
        }
        came_from.insert(current, from);

        if current == goal {
            let mut path = vec![goal];
            let mut cursor = goal;
            while cursor != start {
                cursor = came_from[&cursor];
                path.push(cursor);
            }
            path.reverse();
            return path;
        }

        for next in graph.neighbors_all(current) {
            if !came_from.contains_key(&next) {
                stack.push((next, current));
            }
        }
    }

    Vec::new()
}

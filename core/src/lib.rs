//! prereq-graph-core: query engine for prerequisite dependency graphs.
//!
//! Given an immutable directed edge list (course → course that requires it)
//! and a focal vertex, computes relationship sets (parents, ancestors,
//! siblings, cousins, ...), traversals, shortest paths, cycle checks and a
//! naive route-inspection pairing. Every query is a pure function over a
//! [`Graph`] index; per-call state (queues, visited sets) lives only for
//! the duration of the call, so a `Graph` can be shared across threads.

mod error;
mod graph;
mod path;
mod relations;
mod route;
mod subgraph;
mod traversal;

pub use error::{GraphError, Result};
pub use graph::{undirected, Edge, Graph, NodeId, NodeSet, TraversalDirection};
pub use path::{shortest_path, shortest_path_with};
pub use relations::{
    ancestors, ancestors_and_self, children, cousins, cousins_and_self, descendants,
    descendants_and_self, everything, isolated_nodes, parents, related, related_and_self,
    siblings, siblings_and_self,
};
pub use route::{
    degree_centrality, has_cycle, neighbor_degree, odd_degree_nodes, postman, postman_tour,
    DegreeResult, PostmanRoute,
};
pub use subgraph::{extract_subgraph, induced_edges, SubgraphResult};
pub use traversal::{
    bfs, bfs_neighborhood, dfs, maze, maze_path, traverse, TraversalMode, TraversalResult, Visit,
};

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_graph_shared_across_threads() {
        let graph = Arc::new(Graph::from_pairs(&[(1, 2), (2, 3), (1, 4)]));

        let handles: Vec<_> = (1..=4u64)
            .map(|id| {
                let graph = Arc::clone(&graph);
                thread::spawn(move || (id, related(&graph, id)))
            })
            .collect();

        for handle in handles {
            let (id, result) = handle.join().unwrap();
            assert_eq!(result, related(&graph, id));
            assert!(!result.contains(&id));
        }
    }
}

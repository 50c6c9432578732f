use prereq_graph_core::{NodeSet, TraversalMode, TraversalResult};

use crate::cli::RelationKind;
use crate::error::Result;
use crate::output::{vertex_rows, PositionRow, VertexRow};
use crate::state::GraphState;
use crate::util::check_non_negative;

pub fn relation(gs: &GraphState, kind: RelationKind, id: &str, and_self: bool) -> Result<Vec<VertexRow>> {
    let node = gs.resolve_node(id)?;
    let g = &gs.graph;

    let mut set: NodeSet = match (kind, and_self) {
        (RelationKind::Parents, _) => prereq_graph_core::parents(g, node),
        (RelationKind::Children, _) => prereq_graph_core::children(g, node),
        (RelationKind::Ancestors, false) => prereq_graph_core::ancestors(g, node),
        (RelationKind::Ancestors, true) => prereq_graph_core::ancestors_and_self(g, node),
        (RelationKind::Descendants, false) => prereq_graph_core::descendants(g, node),
        (RelationKind::Descendants, true) => prereq_graph_core::descendants_and_self(g, node),
        (RelationKind::Siblings, false) => prereq_graph_core::siblings(g, node),
        (RelationKind::Siblings, true) => prereq_graph_core::siblings_and_self(g, node),
        (RelationKind::Cousins, false) => prereq_graph_core::cousins(g, node),
        (RelationKind::Cousins, true) => prereq_graph_core::cousins_and_self(g, node),
        (RelationKind::Related, false) => prereq_graph_core::related(g, node),
        (RelationKind::Related, true) => prereq_graph_core::related_and_self(g, node),
    };
    if and_self && matches!(kind, RelationKind::Parents | RelationKind::Children) {
        set.insert(node);
    }

    tracing::debug!(?kind, node, and_self, found = set.len(), "relation");
    Ok(vertex_rows(gs, set))
}

pub fn traverse(gs: &GraphState, id: &str, mode: TraversalMode) -> Result<Vec<VertexRow>> {
    let node = gs.resolve_node(id)?;
    Ok(vertex_rows(gs, prereq_graph_core::traverse(&gs.graph, node, mode)))
}

pub fn bfs(gs: &GraphState, id: &str, max_depth: Option<i64>) -> Result<Vec<PositionRow>> {
    let node = gs.resolve_node(id)?;
    let result = match max_depth {
        Some(depth) => {
            prereq_graph_core::bfs_neighborhood(&gs.graph, node, check_non_negative(depth)?)
        }
        None => prereq_graph_core::bfs(&gs.graph, node),
    };
    Ok(visit_rows(gs, result))
}

pub fn dfs(gs: &GraphState, id: &str, max_depth: i64) -> Result<Vec<PositionRow>> {
    let node = gs.resolve_node(id)?;
    let result = prereq_graph_core::dfs(&gs.graph, node, max_depth)?;
    Ok(visit_rows(gs, result))
}

/// Discovery order from `id`, or the first path found to `goal`.
pub fn maze(gs: &GraphState, id: &str, goal: Option<&str>) -> Result<Vec<PositionRow>> {
    let node = gs.resolve_node(id)?;
    match goal {
        Some(goal) => {
            let goal = gs.resolve_node(goal)?;
            let path = prereq_graph_core::maze_path(&gs.graph, node, goal);
            Ok(step_rows(gs, &path))
        }
        None => Ok(visit_rows(gs, prereq_graph_core::maze(&gs.graph, node))),
    }
}

fn visit_rows(gs: &GraphState, result: TraversalResult) -> Vec<PositionRow> {
    tracing::debug!(
        found = result.visits.len(),
        visited = result.nodes_visited,
        "traversal"
    );
    result
        .visits
        .into_iter()
        .map(|v| PositionRow {
            node_id: v.node_id,
            position: v.depth,
            label: gs.label(v.node_id).map(str::to_string),
        })
        .collect()
}

pub(crate) fn step_rows(gs: &GraphState, path: &[prereq_graph_core::NodeId]) -> Vec<PositionRow> {
    path.iter()
        .enumerate()
        .map(|(step, &node_id)| PositionRow {
            node_id,
            position: step as u32,
            label: gs.label(node_id).map(str::to_string),
        })
        .collect()
}

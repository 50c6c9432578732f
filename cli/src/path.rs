use prereq_graph_core::TraversalDirection;

use crate::error::Result;
use crate::neighborhood::step_rows;
use crate::output::PositionRow;
use crate::state::GraphState;

/// Shortest path as numbered steps; empty when unreachable.
pub fn path(
    gs: &GraphState,
    from: &str,
    to: &str,
    direction: TraversalDirection,
) -> Result<Vec<PositionRow>> {
    let start = gs.resolve_node(from)?;
    let target = gs.resolve_node(to)?;
    let path = prereq_graph_core::shortest_path_with(&gs.graph, start, target, direction);
    Ok(step_rows(gs, &path))
}

use prereq_graph_core::{NodeId, TraversalMode};
use serde::Serialize;

use crate::error::Result;
use crate::output::{vertex_rows, Row, VertexRow};
use crate::state::GraphState;

#[derive(Debug, Serialize)]
pub struct EdgeRow {
    pub source: NodeId,
    pub target: NodeId,
}

#[derive(Debug, Serialize)]
pub struct SubgraphReport {
    pub nodes: Vec<VertexRow>,
    pub edges: Vec<EdgeRow>,
}

impl Row for SubgraphReport {
    fn line(&self) -> String {
        let mut lines: Vec<String> = self.nodes.iter().map(Row::line).collect();
        lines.extend(
            self.edges
                .iter()
                .map(|e| format!("{} -> {}", e.source, e.target)),
        );
        lines.join("\n")
    }
}

pub fn subgraph(gs: &GraphState, id: &str, mode: TraversalMode) -> Result<SubgraphReport> {
    let node = gs.resolve_node(id)?;
    let sub = prereq_graph_core::extract_subgraph(&gs.graph, node, mode);

    Ok(SubgraphReport {
        nodes: vertex_rows(gs, sub.nodes),
        edges: sub
            .edges
            .into_iter()
            .map(|e| EdgeRow {
                source: e.source,
                target: e.target,
            })
            .collect(),
    })
}

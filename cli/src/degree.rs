use prereq_graph_core::NodeId;
use serde::Serialize;

use crate::output::Row;
use crate::state::GraphState;

#[derive(Debug, Serialize)]
pub struct DegreeRow {
    pub node_id: NodeId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub out_degree: u32,
    pub in_degree: u32,
    pub total_degree: u32,
}

impl Row for DegreeRow {
    fn line(&self) -> String {
        let mut line = format!(
            "{}\tout={}\tin={}\ttotal={}",
            self.node_id, self.out_degree, self.in_degree, self.total_degree
        );
        if let Some(label) = &self.label {
            line.push('\t');
            line.push_str(label);
        }
        line
    }
}

pub fn degree(gs: &GraphState, top_n: usize) -> Vec<DegreeRow> {
    prereq_graph_core::degree_centrality(&gs.graph, top_n)
        .into_iter()
        .map(|dr| DegreeRow {
            node_id: dr.node_id,
            label: gs.label(dr.node_id).map(str::to_string),
            out_degree: dr.out_degree,
            in_degree: dr.in_degree,
            total_degree: dr.total_degree,
        })
        .collect()
}

use prereq_graph_core::NodeId;
use serde::Serialize;

use crate::output::{vertex_rows, Row, VertexRow};
use crate::state::GraphState;

#[derive(Debug, Serialize)]
pub struct CycleReport {
    pub has_cycle: bool,
}

impl Row for CycleReport {
    fn line(&self) -> String {
        format!("has_cycle: {}", self.has_cycle)
    }
}

#[derive(Debug, Serialize)]
pub struct RouteRow {
    pub from: NodeId,
    pub to: NodeId,
    pub path: Vec<NodeId>,
}

impl Row for RouteRow {
    fn line(&self) -> String {
        if self.path.is_empty() {
            return format!("{} -> {}: unreachable", self.from, self.to);
        }
        let steps: Vec<String> = self.path.iter().map(|id| id.to_string()).collect();
        format!("{} -> {}: {}", self.from, self.to, steps.join(" "))
    }
}

pub fn cycle(gs: &GraphState) -> CycleReport {
    CycleReport {
        has_cycle: prereq_graph_core::has_cycle(&gs.graph),
    }
}

pub fn postman(gs: &GraphState) -> Vec<RouteRow> {
    prereq_graph_core::postman(&gs.graph)
        .into_iter()
        .map(|r| RouteRow {
            from: r.from,
            to: r.to,
            path: r.path,
        })
        .collect()
}

pub fn postman_tour(gs: &GraphState) -> Vec<VertexRow> {
    vertex_rows(gs, prereq_graph_core::postman_tour(&gs.graph))
}

pub fn isolated(gs: &GraphState) -> Vec<VertexRow> {
    vertex_rows(gs, prereq_graph_core::isolated_nodes(&gs.graph))
}

pub fn everything(gs: &GraphState) -> Vec<VertexRow> {
    vertex_rows(gs, prereq_graph_core::everything(&gs.graph))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::tests::state_with;

    #[test]
    fn test_cycle_report() {
        let gs = state_with(&[(1, 2), (2, 3), (3, 1)], &[]);
        assert!(cycle(&gs).has_cycle);
        assert_eq!(cycle(&gs).line(), "has_cycle: true");

        let gs = state_with(&[(1, 2), (2, 3), (1, 4)], &[]);
        assert!(!cycle(&gs).has_cycle);

        // Two prerequisites sharing a follow-on course
        let gs = state_with(&[(1, 2), (1, 3), (2, 4), (3, 4)], &[]);
        assert!(cycle(&gs).has_cycle);
    }

    #[test]
    fn test_postman_rows() {
        let gs = state_with(&[(1, 2), (2, 3), (1, 4)], &[]);
        let rows = postman(&gs);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].line(), "3 -> 4: 3 2 1 4");

        let tour: Vec<u64> = postman_tour(&gs).iter().map(|r| r.node_id).collect();
        assert_eq!(tour, vec![3, 2, 1, 4]);
    }

    #[test]
    fn test_unreachable_route_line() {
        let row = RouteRow {
            from: 1,
            to: 3,
            path: Vec::new(),
        };
        assert_eq!(row.line(), "1 -> 3: unreachable");
    }

    #[test]
    fn test_everything_and_isolated() {
        let gs = state_with(&[(1, 2), (5, 5)], &[]);
        let all: Vec<u64> = everything(&gs).iter().map(|r| r.node_id).collect();
        assert_eq!(all, vec![1, 2, 5]);
        let lonely: Vec<u64> = isolated(&gs).iter().map(|r| r.node_id).collect();
        assert_eq!(lonely, vec![5]);
    }
}

use std::io::Write;

use prereq_graph_core::NodeId;
use serde::Serialize;

use crate::cli::OutputFormat;
use crate::error::Result;
use crate::state::GraphState;

/// One line of human output, one element of JSON output.
pub trait Row: Serialize {
    fn line(&self) -> String;
}

pub fn emit<R: Row>(out: &mut dyn Write, format: OutputFormat, rows: &[R]) -> Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, rows)?;
            writeln!(out)?;
        }
        OutputFormat::Human => {
            for row in rows {
                writeln!(out, "{}", row.line())?;
            }
        }
    }
    Ok(())
}

pub fn emit_one<R: Row>(out: &mut dyn Write, format: OutputFormat, row: &R) -> Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, row)?;
            writeln!(out)?;
        }
        OutputFormat::Human => writeln!(out, "{}", row.line())?,
    }
    Ok(())
}

fn with_label(id: NodeId, label: Option<&str>) -> String {
    match label {
        Some(label) => format!("{}\t{}", id, label),
        None => id.to_string(),
    }
}

#[derive(Debug, Serialize)]
pub struct VertexRow {
    pub node_id: NodeId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl VertexRow {
    pub fn new(gs: &GraphState, node_id: NodeId) -> Self {
        Self {
            node_id,
            label: gs.label(node_id).map(str::to_string),
        }
    }
}

impl Row for VertexRow {
    fn line(&self) -> String {
        with_label(self.node_id, self.label.as_deref())
    }
}

pub fn vertex_rows(gs: &GraphState, ids: impl IntoIterator<Item = NodeId>) -> Vec<VertexRow> {
    ids.into_iter().map(|id| VertexRow::new(gs, id)).collect()
}

/// A vertex with its hop distance (traversals) or its position (paths).
#[derive(Debug, Serialize)]
pub struct PositionRow {
    pub node_id: NodeId,
    pub position: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Row for PositionRow {
    fn line(&self) -> String {
        format!(
            "{}\t{}",
            self.position,
            with_label(self.node_id, self.label.as_deref())
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::tests::state_with;

    fn render<R: Row>(format: OutputFormat, rows: &[R]) -> String {
        let mut buf = Vec::new();
        emit(&mut buf, format, rows).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_human_vertex_lines() {
        let gs = state_with(&[(1, 2)], &[(1, "CS 101")]);
        let rows = vertex_rows(&gs, [1, 2]);
        assert_eq!(render(OutputFormat::Human, &rows), "1\tCS 101\n2\n");
    }

    #[test]
    fn test_json_vertex_array() {
        let gs = state_with(&[(1, 2)], &[(1, "CS 101")]);
        let rows = vertex_rows(&gs, [1, 2]);
        let value: serde_json::Value =
            serde_json::from_str(&render(OutputFormat::Json, &rows)).unwrap();
        assert_eq!(
            value,
            serde_json::json!([{"node_id": 1, "label": "CS 101"}, {"node_id": 2}])
        );
    }

    #[test]
    fn test_empty_rows() {
        let rows: Vec<VertexRow> = Vec::new();
        assert_eq!(render(OutputFormat::Human, &rows), "");
        assert_eq!(render(OutputFormat::Json, &rows).trim(), "[]");
    }
}

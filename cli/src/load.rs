use std::collections::HashMap;
use std::path::Path;
use std::time::Instant;

use prereq_graph_core::{Edge, Graph, NodeId};
use serde::{Deserialize, Serialize};

use crate::config::Settings;
use crate::error::{CliError, Result};
use crate::generation;
use crate::state::GraphState;

/// On-disk catalogue: vertex metadata plus prerequisite links.
#[derive(Debug, Deserialize)]
struct DataFile {
    #[serde(default)]
    nodes: Vec<NodeRecord>,
    #[serde(default, alias = "edges")]
    links: Vec<Edge>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub id: NodeId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course: Option<String>,
}

/// Vertex metadata keyed by id, with a label → id index.
#[derive(Debug, Default)]
pub struct Catalog {
    nodes: HashMap<NodeId, NodeRecord>,
    by_label: HashMap<String, NodeId>,
}

impl Catalog {
    pub fn from_records(records: Vec<NodeRecord>) -> Self {
        let mut catalog = Catalog::default();
        for record in records {
            if let Some(label) = &record.label {
                if let Some(existing) = catalog.by_label.get(label) {
                    tracing::warn!(label = %label, kept = existing, ignored = record.id, "duplicate label");
                } else {
                    catalog.by_label.insert(label.clone(), record.id);
                }
            }
            catalog.nodes.insert(record.id, record);
        }
        catalog
    }

    pub fn node(&self, id: NodeId) -> Option<&NodeRecord> {
        self.nodes.get(&id)
    }

    pub fn resolve_label(&self, label: &str) -> Option<NodeId> {
        self.by_label.get(label).copied()
    }

    pub fn label(&self, id: NodeId) -> Option<&str> {
        self.nodes.get(&id).and_then(|n| n.label.as_deref())
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }
}

/// Read, filter and index the data file named in `settings`.
pub fn do_load(settings: &Settings) -> Result<GraphState> {
    let path = settings.data.as_deref().ok_or(CliError::NotLoaded)?;
    let start = Instant::now();

    // Generation is read before the contents so a concurrent write marks the load stale.
    let loaded_generation = generation::fetch_generation(path).unwrap_or(0);
    let data = read_data_file(path)?;

    let catalog = Catalog::from_records(data.nodes);
    let course_filter = parse_filter(&settings.courses);

    let total = data.links.len();
    let edges: Vec<Edge> = data
        .links
        .into_iter()
        .filter(|e| {
            endpoint_matches(&catalog, e.source, &course_filter)
                && endpoint_matches(&catalog, e.target, &course_filter)
        })
        .collect();

    if edges.len() > settings.max_edges {
        return Err(CliError::TooManyEdges {
            edges: edges.len(),
            max: settings.max_edges,
        });
    }

    let graph = Graph::from_edges(edges);
    let load_time_ms = start.elapsed().as_secs_f64() * 1000.0;

    tracing::info!(
        path = %path.display(),
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        filtered_out = total - graph.edge_count(),
        generation = loaded_generation,
        load_time_ms,
        "graph loaded"
    );

    Ok(GraphState {
        graph,
        catalog,
        source: path.to_path_buf(),
        load_time_ms,
        loaded_at: Instant::now(),
        loaded_generation,
    })
}

fn read_data_file(path: &Path) -> Result<DataFile> {
    let text = std::fs::read_to_string(path).map_err(|source| CliError::DataFile {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| CliError::InvalidData {
        path: path.to_path_buf(),
        source,
    })
}

// ---------------------------------------------------------------------------
// Course filter
// ---------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq)]
enum Filter {
    All,
    Set(Vec<String>),
}

fn parse_filter(list: &str) -> Filter {
    if list.trim() == "*" {
        Filter::All
    } else {
        Filter::Set(
            list.split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
        )
    }
}

fn matches_filter(name: &str, filter: &Filter) -> bool {
    match filter {
        Filter::All => true,
        Filter::Set(names) => names.iter().any(|n| n == name),
    }
}

/// Vertices without a catalogue entry or course only pass the `*` filter.
fn endpoint_matches(catalog: &Catalog, id: NodeId, filter: &Filter) -> bool {
    match filter {
        Filter::All => true,
        Filter::Set(_) => catalog
            .node(id)
            .and_then(|n| n.course.as_deref())
            .is_some_and(|course| matches_filter(course, filter)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const CATALOG: &str = r#"{
        "nodes": [
            {"id": 1, "label": "CS 101", "course": "CS"},
            {"id": 2, "label": "CS 201", "course": "CS", "url": "https://example.edu/cs201"},
            {"id": 3, "label": "MATH 101", "course": "MATH"},
            {"id": 4, "label": "CS 301", "course": "CS"}
        ],
        "links": [
            {"source": 1, "target": 2},
            {"source": 3, "target": 2},
            {"source": 2, "target": 4},
            {"source": 2, "target": 9}
        ]
    }"#;

    fn settings_for(path: &Path) -> Settings {
        Settings {
            data: Some(path.to_path_buf()),
            ..Settings::default()
        }
    }

    #[test]
    fn test_parse_filter() {
        assert_eq!(parse_filter("*"), Filter::All);
        assert_eq!(parse_filter(" * "), Filter::All);
        assert_eq!(
            parse_filter("CS, MATH,,"),
            Filter::Set(vec!["CS".to_string(), "MATH".to_string()])
        );
        assert!(matches_filter("CS", &parse_filter("CS,MATH")));
        assert!(!matches_filter("PHYS", &parse_filter("CS,MATH")));
    }

    #[test]
    fn test_load_all() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        fs::write(&path, CATALOG).unwrap();

        let state = do_load(&settings_for(&path)).unwrap();
        assert_eq!(state.graph.edge_count(), 4);
        assert_eq!(state.graph.node_count(), 5);
        assert_eq!(state.catalog.len(), 4);
        assert_eq!(state.catalog.resolve_label("CS 201"), Some(2));
        assert_eq!(state.catalog.label(3), Some("MATH 101"));
        assert_eq!(
            state.catalog.node(2).and_then(|n| n.url.as_deref()),
            Some("https://example.edu/cs201")
        );
        assert!(state.loaded_generation > 0);
    }

    #[test]
    fn test_course_filter_keeps_edges_inside_courses() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        fs::write(&path, CATALOG).unwrap();

        let settings = Settings {
            courses: "CS".to_string(),
            ..settings_for(&path)
        };
        let state = do_load(&settings).unwrap();
        // MATH 101 → CS 201 and the link to uncatalogued 9 are dropped
        assert_eq!(state.graph.edges(), &[Edge::new(1, 2), Edge::new(2, 4)]);
    }

    #[test]
    fn test_edges_alias() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("edges.json");
        fs::write(&path, r#"{"edges": [{"source": 5, "target": 6}]}"#).unwrap();

        let state = do_load(&settings_for(&path)).unwrap();
        assert_eq!(state.graph.edges(), &[Edge::new(5, 6)]);
        assert_eq!(state.catalog.len(), 0);
    }

    #[test]
    fn test_max_edges_enforced() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        fs::write(&path, CATALOG).unwrap();

        let settings = Settings {
            max_edges: 3,
            ..settings_for(&path)
        };
        assert!(matches!(
            do_load(&settings),
            Err(CliError::TooManyEdges { edges: 4, max: 3 })
        ));
    }

    #[test]
    fn test_missing_and_malformed_files() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope.json");
        assert!(matches!(
            do_load(&settings_for(&missing)),
            Err(CliError::DataFile { .. })
        ));

        let bad = dir.path().join("bad.json");
        fs::write(&bad, "{\"links\": [{\"source\": \"x\"}]}").unwrap();
        assert!(matches!(
            do_load(&settings_for(&bad)),
            Err(CliError::InvalidData { .. })
        ));

        assert!(matches!(
            do_load(&Settings::default()),
            Err(CliError::NotLoaded)
        ));
    }

    #[test]
    fn test_duplicate_label_keeps_first() {
        let catalog = Catalog::from_records(vec![
            NodeRecord {
                id: 1,
                label: Some("CS 101".into()),
                url: None,
                course: None,
            },
            NodeRecord {
                id: 7,
                label: Some("CS 101".into()),
                url: None,
                course: None,
            },
        ]);
        assert_eq!(catalog.resolve_label("CS 101"), Some(1));
        assert_eq!(catalog.len(), 2);
    }
}

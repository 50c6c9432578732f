use std::path::PathBuf;
use std::time::Instant;

use prereq_graph_core::{Graph, NodeId};

use crate::config::Settings;
use crate::error::{CliError, Result};
use crate::load::{self, Catalog};

/// A loaded graph plus the metadata needed to detect staleness.
pub struct GraphState {
    pub graph: Graph,
    pub catalog: Catalog,
    pub source: PathBuf,
    pub load_time_ms: f64,
    pub loaded_at: Instant,
    /// Data file generation observed at load time. 0 = unknown.
    pub loaded_generation: u64,
}

/// Settings plus whatever graph is currently loaded.
///
/// One per process: single-shot commands load once, `shell` keeps the
/// session across lines and refreshes it through `generation::ensure_fresh`.
pub struct Session {
    pub settings: Settings,
    state: Option<GraphState>,
}

impl Session {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            state: None,
        }
    }

    /// Load the configured data file, replacing any previous graph.
    pub fn load(&mut self) -> Result<&GraphState> {
        let state = load::do_load(&self.settings)?;
        Ok(self.state.insert(state))
    }

    /// Load only if a data file is configured; otherwise stay unloaded.
    pub fn load_if_configured(&mut self) -> Result<()> {
        if self.settings.data.is_some() {
            self.load()?;
        }
        Ok(())
    }

    pub fn with_graph(&self) -> Option<&GraphState> {
        self.state.as_ref()
    }

    pub fn require_graph(&self) -> Result<&GraphState> {
        self.state.as_ref().ok_or(CliError::NotLoaded)
    }

    #[cfg(test)]
    pub fn set_graph(&mut self, state: GraphState) {
        self.state = Some(state);
    }
}

impl GraphState {
    /// Resolve a vertex argument: label first, then numeric id.
    ///
    /// Numeric ids that are not in the graph pass through so that queries
    /// on them return empty results.
    pub fn resolve_node(&self, arg: &str) -> Result<NodeId> {
        if let Some(id) = self.catalog.resolve_label(arg) {
            return Ok(id);
        }
        match arg.trim().parse::<NodeId>() {
            Ok(id) => {
                if !self.graph.contains(id) {
                    tracing::warn!(id, "vertex is not in the loaded graph");
                }
                Ok(id)
            }
            Err(_) => Err(CliError::UnknownVertex(arg.to_string())),
        }
    }

    pub fn label(&self, id: NodeId) -> Option<&str> {
        self.catalog.label(id)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::load::NodeRecord;

    pub(crate) fn state_with(pairs: &[(NodeId, NodeId)], labels: &[(NodeId, &str)]) -> GraphState {
        let records = labels
            .iter()
            .map(|&(id, label)| NodeRecord {
                id,
                label: Some(label.to_string()),
                url: None,
                course: None,
            })
            .collect();
        GraphState {
            graph: Graph::from_pairs(pairs),
            catalog: Catalog::from_records(records),
            source: PathBuf::from("test.json"),
            load_time_ms: 0.0,
            loaded_at: Instant::now(),
            loaded_generation: 0,
        }
    }

    #[test]
    fn test_resolve_label_then_numeric() {
        let gs = state_with(&[(1, 2)], &[(1, "CS 101"), (2, "42")]);
        assert_eq!(gs.resolve_node("CS 101").unwrap(), 1);
        // A label that looks numeric wins over the numeric parse
        assert_eq!(gs.resolve_node("42").unwrap(), 2);
        assert_eq!(gs.resolve_node("1").unwrap(), 1);
    }

    #[test]
    fn test_unknown_numeric_passes_through() {
        let gs = state_with(&[(1, 2)], &[]);
        assert_eq!(gs.resolve_node("5").unwrap(), 5);
    }

    #[test]
    fn test_unknown_label_is_error() {
        let gs = state_with(&[(1, 2)], &[(1, "CS 101")]);
        assert!(matches!(
            gs.resolve_node("CS 999"),
            Err(CliError::UnknownVertex(label)) if label == "CS 999"
        ));
    }

    #[test]
    fn test_session_without_data() {
        let mut session = Session::new(Settings::default());
        session.load_if_configured().unwrap();
        assert!(session.with_graph().is_none());
        assert!(matches!(session.require_graph(), Err(CliError::NotLoaded)));
    }
}

use serde::Serialize;

use crate::generation;
use crate::output::Row;
use crate::state::Session;

#[derive(Debug, Serialize)]
pub struct StatusReport {
    pub data: Option<String>,
    pub status: &'static str,
    pub node_count: usize,
    pub edge_count: usize,
    pub catalog_size: usize,
    pub memory_bytes: usize,
    pub load_time_ms: f64,
    pub loaded_generation: u64,
    pub current_generation: u64,
    pub is_stale: bool,
}

impl Row for StatusReport {
    fn line(&self) -> String {
        format!(
            "data: {}\nstatus: {}\nnodes: {}\nedges: {}\ncatalog: {}\nmemory_bytes: {}\nload_time_ms: {:.1}\ngeneration: {} (current {})",
            self.data.as_deref().unwrap_or("-"),
            self.status,
            self.node_count,
            self.edge_count,
            self.catalog_size,
            self.memory_bytes,
            self.load_time_ms,
            self.loaded_generation,
            self.current_generation,
        )
    }
}

pub fn status(session: &Session) -> StatusReport {
    if let Some(gs) = session.with_graph() {
        let (is_stale, current_generation) =
            generation::staleness(session).unwrap_or((false, gs.loaded_generation));

        return StatusReport {
            data: Some(gs.source.display().to_string()),
            status: if is_stale { "stale" } else { "loaded" },
            node_count: gs.graph.node_count(),
            edge_count: gs.graph.edge_count(),
            catalog_size: gs.catalog.len(),
            memory_bytes: gs.graph.memory_usage(),
            load_time_ms: gs.load_time_ms,
            loaded_generation: gs.loaded_generation,
            current_generation,
            is_stale,
        };
    }

    let configured = session.settings.data.as_deref();
    StatusReport {
        data: configured.map(|p| p.display().to_string()),
        status: "not_loaded",
        node_count: 0,
        edge_count: 0,
        catalog_size: 0,
        memory_bytes: 0,
        load_time_ms: 0.0,
        loaded_generation: 0,
        current_generation: configured
            .and_then(generation::fetch_generation)
            .unwrap_or(0),
        is_stale: false,
    }
}

//! Generation-based staleness for the loaded graph.
//!
//! The generation of a data file is its modification time in milliseconds
//! since the Unix epoch. A loaded graph is stale once the file's current
//! generation is newer than the one recorded at load time.

use std::path::Path;
use std::time::UNIX_EPOCH;

use crate::error::Result;
use crate::state::Session;

/// Current generation of `path`, or None if its metadata is unreadable.
pub fn fetch_generation(path: &Path) -> Option<u64> {
    let modified = std::fs::metadata(path).ok()?.modified().ok()?;
    let millis = modified.duration_since(UNIX_EPOCH).ok()?.as_millis();
    Some(u64::try_from(millis).unwrap_or(u64::MAX))
}

/// Whether the session's graph is older than its data file.
///
/// Returns `(is_stale, current_generation)`; an unreadable file is never stale.
pub fn staleness(session: &Session) -> Option<(bool, u64)> {
    let gs = session.with_graph()?;
    let current = fetch_generation(&gs.source)?;
    Some((gs.loaded_generation < current, current))
}

/// Check if the loaded graph is stale and optionally reload.
///
/// - No graph loaded → nothing to do
/// - Data file unreadable → serve the loaded graph
/// - Fresh → nothing to do
/// - Stale + auto_reload off → serve stale
/// - Stale + auto_reload on + debounce not elapsed → serve stale
/// - Stale + auto_reload on + debounce elapsed → reload inline
///
/// Returns true if a reload happened.
pub fn ensure_fresh(session: &mut Session) -> Result<bool> {
    let Some(gs) = session.with_graph() else {
        return Ok(false);
    };
    let loaded_gen = gs.loaded_generation;
    let loaded_at = gs.loaded_at;
    let source = gs.source.clone();

    let Some(current_gen) = fetch_generation(&source) else {
        return Ok(false);
    };
    if loaded_gen >= current_gen {
        return Ok(false);
    }

    if !session.settings.auto_reload {
        tracing::warn!(
            loaded = loaded_gen,
            current = current_gen,
            "graph is stale, auto_reload is off"
        );
        return Ok(false);
    }

    let debounce = session.settings.reload_debounce;
    let elapsed = loaded_at.elapsed();
    if elapsed < debounce {
        tracing::warn!(
            loaded = loaded_gen,
            current = current_gen,
            elapsed_sec = elapsed.as_secs(),
            debounce_sec = debounce.as_secs(),
            "graph is stale, debouncing"
        );
        return Ok(false);
    }

    tracing::info!(
        path = %source.display(),
        loaded = loaded_gen,
        current = current_gen,
        "auto-reloading"
    );
    session.load()?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use std::fs;
    use std::path::PathBuf;
    use std::time::Duration;
    use tempfile::tempdir;

    fn session_for(path: PathBuf, auto_reload: bool, debounce_sec: u64) -> Session {
        Session::new(Settings {
            data: Some(path),
            auto_reload,
            reload_debounce: Duration::from_secs(debounce_sec),
            ..Settings::default()
        })
    }

    /// Load, then pretend the load happened before any write.
    fn load_as_stale(session: &mut Session) {
        let mut gs = crate::load::do_load(&session.settings).unwrap();
        gs.loaded_generation = 0;
        session.set_graph(gs);
    }

    #[test]
    fn test_fetch_generation() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("g.json");
        assert_eq!(fetch_generation(&path), None);
        fs::write(&path, "{}").unwrap();
        assert!(fetch_generation(&path).unwrap() > 0);
    }

    #[test]
    fn test_not_loaded_is_noop() {
        let mut session = Session::new(Settings::default());
        assert!(!ensure_fresh(&mut session).unwrap());
        assert!(staleness(&session).is_none());
    }

    #[test]
    fn test_fresh_graph_is_not_reloaded() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("g.json");
        fs::write(&path, r#"{"links": [{"source": 1, "target": 2}]}"#).unwrap();

        let mut session = session_for(path, true, 0);
        session.load().unwrap();
        assert!(!ensure_fresh(&mut session).unwrap());
        assert_eq!(staleness(&session).map(|(stale, _)| stale), Some(false));
    }

    #[test]
    fn test_stale_graph_reloads() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("g.json");
        fs::write(&path, r#"{"links": [{"source": 1, "target": 2}]}"#).unwrap();

        let mut session = session_for(path.clone(), true, 0);
        load_as_stale(&mut session);
        fs::write(&path, r#"{"links": [{"source": 1, "target": 2}, {"source": 2, "target": 3}]}"#)
            .unwrap();
        assert_eq!(staleness(&session).map(|(stale, _)| stale), Some(true));

        assert!(ensure_fresh(&mut session).unwrap());
        let gs = session.require_graph().unwrap();
        assert_eq!(gs.graph.edge_count(), 2);
        assert!(gs.loaded_generation > 0);
    }

    #[test]
    fn test_stale_without_auto_reload_serves_stale() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("g.json");
        fs::write(&path, r#"{"links": [{"source": 1, "target": 2}]}"#).unwrap();

        let mut session = session_for(path, false, 0);
        load_as_stale(&mut session);
        assert!(!ensure_fresh(&mut session).unwrap());
        assert_eq!(session.require_graph().unwrap().loaded_generation, 0);
    }

    #[test]
    fn test_debounce_serves_stale() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("g.json");
        fs::write(&path, r#"{"links": [{"source": 1, "target": 2}]}"#).unwrap();

        let mut session = session_for(path, true, 3600);
        load_as_stale(&mut session);
        assert!(!ensure_fresh(&mut session).unwrap());
        assert_eq!(session.require_graph().unwrap().loaded_generation, 0);
    }

    #[test]
    fn test_failed_reload_keeps_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("g.json");
        fs::write(&path, r#"{"links": [{"source": 1, "target": 2}]}"#).unwrap();

        let mut session = session_for(path.clone(), true, 0);
        load_as_stale(&mut session);
        fs::write(&path, "not json").unwrap();
        assert!(ensure_fresh(&mut session).is_err());
    }
}

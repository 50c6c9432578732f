use std::io::{BufRead, Write};

use clap::Parser;

use crate::cli::{OutputFormat, ShellCommand, ShellLine};
use crate::commands::run_query;
use crate::error::{CliError, Result};
use crate::generation::ensure_fresh;
use crate::state::Session;

/// Read one query per line until EOF or `quit`.
///
/// Every query first runs `ensure_fresh`. Errors are reported on `err` and
/// the loop continues; only I/O failures on `out` end the session.
pub fn run(
    session: &mut Session,
    format: OutputFormat,
    input: impl BufRead,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<()> {
    for line in input.lines() {
        let line = line?;
        let words: Vec<&str> = line.split_whitespace().collect();
        if words.is_empty() || words[0].starts_with('#') {
            continue;
        }

        let parsed = match ShellLine::try_parse_from(split_quoted(&line)) {
            Ok(parsed) => parsed,
            Err(e) => {
                write!(err, "{}", e)?;
                continue;
            }
        };

        let result = match parsed.command {
            ShellCommand::Quit => break,
            ShellCommand::Reload => session.load().map(|gs| {
                tracing::info!(edges = gs.graph.edge_count(), "reloaded");
            }),
            ShellCommand::Query(query) => ensure_fresh(session)
                .and_then(|_| run_query(session, &query, format, out)),
        };

        if let Err(e) = result {
            report(err, format, &e)?;
        }
        out.flush()?;
    }
    Ok(())
}

fn report(err: &mut dyn Write, format: OutputFormat, e: &CliError) -> Result<()> {
    match format {
        OutputFormat::Json => writeln!(err, "{}", e.to_json())?,
        OutputFormat::Human => writeln!(err, "error: {}", e)?,
    }
    Ok(())
}

/// Whitespace split that keeps double-quoted runs together, so labels
/// such as `"CS 101"` survive as one argument.
fn split_quoted(line: &str) -> Vec<String> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut pending = false;

    for c in line.chars() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
                pending = true;
            }
            c if c.is_whitespace() && !in_quotes => {
                if pending {
                    args.push(std::mem::take(&mut current));
                    pending = false;
                }
            }
            c => {
                current.push(c);
                pending = true;
            }
        }
    }
    if pending {
        args.push(current);
    }
    args
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use std::fs;
    use std::io::Cursor;
    use std::time::Duration;
    use tempfile::tempdir;

    fn run_lines(session: &mut Session, format: OutputFormat, script: &str) -> (String, String) {
        let mut out = Vec::new();
        let mut err = Vec::new();
        run(session, format, Cursor::new(script), &mut out, &mut err).unwrap();
        (
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    fn test_split_quoted() {
        assert_eq!(
            split_quoted(r#"path "CS 101" 4 --direction both"#),
            vec!["path", "CS 101", "4", "--direction", "both"]
        );
        assert_eq!(split_quoted("  cycle  "), vec!["cycle"]);
        assert_eq!(split_quoted(r#"relation parents """#), vec!["relation", "parents", ""]);
    }

    #[test]
    fn test_shell_queries_and_errors() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("g.json");
        fs::write(
            &path,
            r#"{"nodes": [{"id": 1, "label": "CS 101"}],
                "links": [{"source": 1, "target": 2}, {"source": 2, "target": 3}]}"#,
        )
        .unwrap();

        let mut session = Session::new(Settings {
            data: Some(path),
            ..Settings::default()
        });
        session.load().unwrap();

        let (out, err) = run_lines(
            &mut session,
            OutputFormat::Human,
            "# comment\n\nrelation descendants \"CS 101\"\nbogus\ndfs 1 --max-depth -1\ncycle\nquit\neverything\n",
        );
        assert_eq!(out, "2\n3\nhas_cycle: false\n");
        assert!(err.contains("unrecognized subcommand"));
        assert!(err.contains("error: max_depth must be non-negative, got -1"));
    }

    #[test]
    fn test_shell_reloads_changed_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("g.json");
        fs::write(&path, r#"{"links": [{"source": 1, "target": 2}]}"#).unwrap();

        let mut session = Session::new(Settings {
            data: Some(path.clone()),
            reload_debounce: Duration::ZERO,
            ..Settings::default()
        });
        let mut gs = crate::load::do_load(&session.settings).unwrap();
        gs.loaded_generation = 0;
        session.set_graph(gs);

        fs::write(&path, r#"{"links": [{"source": 1, "target": 2}, {"source": 2, "target": 3}]}"#)
            .unwrap();
        let (out, _) = run_lines(&mut session, OutputFormat::Human, "everything\n");
        assert_eq!(out, "1\n2\n3\n");
    }

    #[test]
    fn test_shell_without_graph_reports_json_error() {
        let mut session = Session::new(Settings::default());
        let (out, err) = run_lines(&mut session, OutputFormat::Json, "everything\n");
        assert!(out.is_empty());
        let value: serde_json::Value = serde_json::from_str(err.trim()).unwrap();
        assert_eq!(value["error"]["type"], "not_loaded");
        assert_eq!(value["error"]["code"], 3);
    }
}

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

// The binary target `prereq-graph` logs under `prereq_graph`, not the package name.
const CRATES: [&str; 2] = [env!("CARGO_CRATE_NAME"), "prereq_graph_core"];

/// Initialize structured logging on stderr.
///
/// `--log-level` wins over `-v`; `RUST_LOG` or `PREREQ_GRAPH_LOG` override both.
pub fn init_tracing(
    verbose: bool,
    log_level: Option<&str>,
    log_json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let level = match (verbose, log_level) {
        (_, Some(level)) => level,
        (true, None) => "debug",
        (false, None) => "warn",
    };

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_from_env("PREREQ_GRAPH_LOG"))
        .unwrap_or_else(|_| EnvFilter::new(directives(level)));

    let registry = tracing_subscriber::registry().with(filter);

    if log_json {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_ansi(false),
            )
            .try_init()?;
    } else {
        registry
            .with(
                fmt::layer()
                    .compact()
                    .with_target(false)
                    .with_writer(std::io::stderr)
                    .with_ansi(false),
            )
            .try_init()?;
    }

    Ok(())
}

/// A bare level applies to both crates; anything containing `=` is used as-is.
fn directives(level: &str) -> String {
    if level.contains('=') {
        level.to_string()
    } else {
        CRATES
            .iter()
            .map(|krate| format!("{}={}", krate, level))
            .collect::<Vec<_>>()
            .join(",")
    }
}

//! prereq-graph: command-line host for the prerequisite graph query engine.
//!
//! Loads a course catalogue (vertex metadata plus prerequisite links) from a
//! JSON data file and answers relationship, traversal, path and route
//! queries, either once per invocation or line by line in `shell`.

mod cli;
mod commands;
mod config;
mod degree;
mod error;
mod generation;
mod load;
mod logging;
mod neighborhood;
mod output;
mod path;
mod route;
mod shell;
mod state;
mod status;
mod subgraph;
mod util;

use std::env;
use std::io::{self, Write};
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;

use cli::{Cli, Commands, OutputFormat};
use config::Settings;
use error::{CliError, ExitCode as CliExitCode};
use state::Session;

fn main() -> ExitCode {
    let start = Instant::now();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            if argv_requests_json() {
                match err.kind() {
                    clap::error::ErrorKind::DisplayHelp
                    | clap::error::ErrorKind::DisplayVersion => err.exit(),
                    _ => {
                        let error = CliError::Usage(err.to_string().trim_end().to_string());
                        eprintln!("{}", error.to_json());
                        return ExitCode::from(error.exit_code() as u8);
                    }
                }
            }
            err.exit();
        }
    };

    if let Err(e) = logging::init_tracing(cli.verbose, cli.log_level.as_deref(), cli.log_json) {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }

    tracing::debug!(elapsed = ?start.elapsed(), "parse_args");

    match run(&cli) {
        Ok(()) => ExitCode::from(CliExitCode::Success as u8),
        Err(e) => {
            if cli.format == OutputFormat::Json {
                eprintln!("{}", e.to_json());
            } else {
                eprintln!("error: {}", e);
            }
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

fn run(cli: &Cli) -> error::Result<()> {
    let settings = Settings::from_cli(cli)?;
    let mut session = Session::new(settings);
    session.load_if_configured()?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match &cli.command {
        Commands::Query(query) => commands::run_query(&session, query, cli.format, &mut out)?,
        Commands::Shell => {
            let stdin = io::stdin();
            let mut err = io::stderr();
            shell::run(&mut session, cli.format, stdin.lock(), &mut out, &mut err)?;
        }
    }

    out.flush()?;
    Ok(())
}

fn argv_requests_json() -> bool {
    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--format" {
            if args.next().is_some_and(|v| v == "json") {
                return true;
            }
        } else if arg == "--format=json" {
            return true;
        }
    }
    false
}

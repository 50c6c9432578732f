//! Query dispatch shared by single-shot invocations and `shell`.

use std::io::Write;

use crate::cli::{OutputFormat, QueryCommand};
use crate::error::Result;
use crate::output::{emit, emit_one};
use crate::state::Session;
use crate::{degree, neighborhood, path, route, status, subgraph};

pub fn run_query(
    session: &Session,
    command: &QueryCommand,
    format: OutputFormat,
    out: &mut dyn Write,
) -> Result<()> {
    let graph = || session.require_graph();

    match command {
        QueryCommand::Status => emit_one(out, format, &status::status(session)),
        QueryCommand::Relation { kind, id, and_self } => {
            emit(out, format, &neighborhood::relation(graph()?, *kind, id, *and_self)?)
        }
        QueryCommand::Traverse { id, mode } => {
            emit(out, format, &neighborhood::traverse(graph()?, id, *mode)?)
        }
        QueryCommand::Bfs { id, max_depth } => {
            emit(out, format, &neighborhood::bfs(graph()?, id, *max_depth)?)
        }
        QueryCommand::Dfs { id, max_depth } => {
            emit(out, format, &neighborhood::dfs(graph()?, id, *max_depth)?)
        }
        QueryCommand::Maze { id, goal } => {
            emit(out, format, &neighborhood::maze(graph()?, id, goal.as_deref())?)
        }
        QueryCommand::Path {
            from,
            to,
            direction,
        } => emit(out, format, &path::path(graph()?, from, to, *direction)?),
        QueryCommand::Subgraph { id, mode } => {
            emit_one(out, format, &subgraph::subgraph(graph()?, id, *mode)?)
        }
        QueryCommand::Degree { top_n } => emit(out, format, &degree::degree(graph()?, *top_n)),
        QueryCommand::Cycle => emit_one(out, format, &route::cycle(graph()?)),
        QueryCommand::Postman { tour: false } => emit(out, format, &route::postman(graph()?)),
        QueryCommand::Postman { tour: true } => emit(out, format, &route::postman_tour(graph()?)),
        QueryCommand::Isolated => emit(out, format, &route::isolated(graph()?)),
        QueryCommand::Everything => emit(out, format, &route::everything(graph()?)),
    }
}

//! CLI argument parsing for prereq-graph.
//!
//! Global flags carry the host settings (data file, limits, reload policy)
//! and logging/output options; subcommands are the graph queries. The same
//! query subcommands are accepted line by line inside `shell`.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use prereq_graph_core::{TraversalDirection, TraversalMode};

use crate::config::{DEFAULT_DEBOUNCE_SEC, DEFAULT_MAX_EDGES};

/// Query prerequisite graphs: relations, traversals, paths and route inspection
#[derive(Parser, Debug)]
#[command(name = "prereq-graph")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// JSON data file with `nodes` and `links`
    #[arg(long, global = true, env = "PREREQ_GRAPH_DATA")]
    pub data: Option<PathBuf>,

    /// Refuse to load graphs with more edges than this
    #[arg(long, global = true, env = "PREREQ_GRAPH_MAX_EDGES", default_value_t = DEFAULT_MAX_EDGES)]
    pub max_edges: u64,

    /// Comma-separated courses to load, or * for all
    #[arg(long, global = true, env = "PREREQ_GRAPH_COURSES", default_value = "*")]
    pub courses: String,

    /// Reload inside `shell` when the data file changes
    #[arg(
        long,
        global = true,
        env = "PREREQ_GRAPH_AUTO_RELOAD",
        default_value_t = true,
        action = ArgAction::Set
    )]
    pub auto_reload: bool,

    /// Minimum seconds between automatic reloads (0 disables debouncing)
    #[arg(long, global = true, env = "PREREQ_GRAPH_RELOAD_DEBOUNCE_SEC", default_value_t = DEFAULT_DEBOUNCE_SEC)]
    pub reload_debounce_sec: u64,

    /// Output format
    #[arg(long, global = true, value_enum, default_value = "human")]
    pub format: OutputFormat,

    /// Enable debug logging
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Log level or filter directive (e.g. `debug`, `prereq_graph_core=trace`)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(flatten)]
    Query(QueryCommand),

    /// Read queries from stdin, reloading the data file when it changes
    Shell,
}

/// One line typed into `shell`.
#[derive(Parser, Debug)]
#[command(name = "prereq-graph", no_binary_name = true)]
#[command(disable_version_flag = true)]
pub struct ShellLine {
    #[command(subcommand)]
    pub command: ShellCommand,
}

#[derive(Subcommand, Debug)]
pub enum ShellCommand {
    #[command(flatten)]
    Query(QueryCommand),

    /// Reload the data file now
    Reload,

    /// Leave the shell
    #[command(alias = "exit")]
    Quit,
}

#[derive(Subcommand, Debug, Clone)]
pub enum QueryCommand {
    /// Show what is loaded and whether it is stale
    Status,

    /// Relationship set of one vertex
    Relation {
        #[arg(value_enum)]
        kind: RelationKind,

        /// Vertex label or numeric id
        id: String,

        /// Include the vertex itself
        #[arg(long)]
        and_self: bool,
    },

    /// Fixed-point reachable set under a traversal mode
    Traverse {
        /// Vertex label or numeric id
        id: String,

        /// ancestors, descendants, web or tree
        #[arg(long)]
        mode: TraversalMode,
    },

    /// Breadth-first visit over undirected adjacency
    Bfs {
        /// Vertex label or numeric id
        id: String,

        /// Stop after this many hops (unbounded if omitted)
        #[arg(long, allow_negative_numbers = true)]
        max_depth: Option<i64>,
    },

    /// Depth-first visit over undirected adjacency
    Dfs {
        /// Vertex label or numeric id
        id: String,

        /// Stop after this many hops
        #[arg(long, allow_negative_numbers = true)]
        max_depth: i64,
    },

    /// Stack-driven reachability, or a path to `--goal`
    Maze {
        /// Vertex label or numeric id
        id: String,

        /// Search for a (not necessarily shortest) path to this vertex
        #[arg(long)]
        goal: Option<String>,
    },

    /// Fewest-hop path between two vertices
    Path {
        from: String,
        to: String,

        /// outgoing, incoming or both
        #[arg(long, default_value = "outgoing")]
        direction: TraversalDirection,
    },

    /// Traversal result with the focal vertex and the edges among them
    Subgraph {
        /// Vertex label or numeric id
        id: String,

        /// ancestors, descendants, web or tree
        #[arg(long, default_value = "tree")]
        mode: TraversalMode,
    },

    /// Vertices ranked by in + out edge count
    Degree {
        /// Number of vertices to show (0 = all)
        #[arg(long, default_value_t = 100)]
        top_n: usize,
    },

    /// Check whether the prerequisite links, ignoring direction, form a loop
    Cycle,

    /// Shortest paths between every pair of odd-degree vertices
    Postman {
        /// Print the flattened vertex tour instead of the pairs
        #[arg(long)]
        tour: bool,
    },

    /// Vertices with no relatives
    Isolated,

    /// Every vertex touched by an edge
    Everything,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum RelationKind {
    Parents,
    Children,
    Ancestors,
    Descendants,
    Siblings,
    Cousins,
    Related,
}

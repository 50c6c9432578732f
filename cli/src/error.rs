//! Error types and exit codes for the prereq-graph CLI.
//!
//! Exit codes:
//! - 0: Success
//! - 1: Generic failure
//! - 2: Usage error (bad flags/args, invalid settings, negative depth)
//! - 3: Data error (missing or malformed data file, unknown vertex, edge limit)

use std::path::PathBuf;

use prereq_graph_core::GraphError;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    Success = 0,
    Failure = 1,
    Usage = 2,
    Data = 3,
}

#[derive(Error, Debug)]
pub enum CliError {
    // Usage errors (exit code 2)
    #[error("{0}")]
    Usage(String),

    #[error("{name} must be between {min} and {max}, got {value}")]
    SettingOutOfRange {
        name: &'static str,
        value: u64,
        min: u64,
        max: u64,
    },

    #[error(transparent)]
    Graph(#[from] GraphError),

    // Data errors (exit code 3)
    #[error("no graph loaded: pass --data or set PREREQ_GRAPH_DATA")]
    NotLoaded,

    #[error("cannot read data file {path:?}: {source}")]
    DataFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid data file {path:?}: {source}")]
    InvalidData {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("vertex '{0}' not found")]
    UnknownVertex(String),

    #[error("loaded graph has {edges} edges, exceeds --max-edges={max}")]
    TooManyEdges { edges: usize, max: usize },

    // Generic failures (exit code 1)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CliError>;

impl CliError {
    pub fn exit_code(&self) -> ExitCode {
        match self {
            CliError::Usage(_) | CliError::SettingOutOfRange { .. } | CliError::Graph(_) => {
                ExitCode::Usage
            }

            CliError::NotLoaded
            | CliError::DataFile { .. }
            | CliError::InvalidData { .. }
            | CliError::UnknownVertex(_)
            | CliError::TooManyEdges { .. } => ExitCode::Data,

            CliError::Io(_) | CliError::Json(_) => ExitCode::Failure,
        }
    }

    fn error_type(&self) -> &'static str {
        match self {
            CliError::Usage(_) => "usage_error",
            CliError::SettingOutOfRange { .. } => "invalid_setting",
            CliError::Graph(GraphError::InvalidDepth { .. }) => "invalid_depth",
            CliError::Graph(GraphError::UnknownMode(_)) => "unknown_mode",
            CliError::Graph(GraphError::UnknownDirection(_)) => "unknown_direction",
            CliError::NotLoaded => "not_loaded",
            CliError::DataFile { .. } => "data_file",
            CliError::InvalidData { .. } => "invalid_data",
            CliError::UnknownVertex(_) => "unknown_vertex",
            CliError::TooManyEdges { .. } => "too_many_edges",
            CliError::Io(_) => "io_error",
            CliError::Json(_) => "json_error",
        }
    }

    /// Structured error envelope for `--format json`.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "error": {
                "code": self.exit_code() as i32,
                "type": self.error_type(),
                "message": self.to_string(),
            }
        })
    }
}

use thiserror::Error;

/// Errors raised by the query engine.
///
/// Queries over unknown vertices are not errors; they return empty results.
/// Only invalid caller input fails.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("max_depth must be non-negative, got {depth}")]
    InvalidDepth { depth: i64 },

    #[error("invalid traversal mode '{0}' (expected: ancestors, descendants, web, tree)")]
    UnknownMode(String),

    #[error("invalid direction '{0}' (expected: outgoing, incoming, both)")]
    UnknownDirection(String),
}

pub type Result<T> = std::result::Result<T, GraphError>;

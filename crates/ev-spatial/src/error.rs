//! Spatial-subsystem error type.

use thiserror::Error;

use ev_core::NodeId;

/// Errors produced by `ev-spatial`.
#[derive(Debug, Error)]
pub enum SpatialError {
    #[error("no route from {from} to {to}")]
    NoRoute { from: NodeId, to: NodeId },

    #[error("node {0} not found in network")]
    NodeNotFound(NodeId),

    #[error("{file} is missing required columns {missing:?}")]
    MissingColumns { file: &'static str, missing: Vec<&'static str> },

    #[error("{file} row {row}: {message}")]
    Row { file: &'static str, row: usize, message: String },

    #[error("edge row {row} references unknown node id {id}")]
    UnknownNode { row: usize, id: i64 },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "osm")]
    #[error("OSM parse error: {0}")]
    Osm(String),
}

pub type SpatialResult<T> = Result<T, SpatialError>;

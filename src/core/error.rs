//! Error types for the octree baker

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the baker
#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cannot write octree to {path}: {source}")]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed octree file: {0}")]
    Format(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Node holds {count} triangles, more than the file format can address")]
    TooManyTriangles { count: usize },
}

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RouteError {
    #[error("failed to read seed file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid JSON in seed file {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("ramp {truck_id} references fence index {index}, but fences.json has {count} entries")]
    FenceIndex {
        truck_id: String,
        index: usize,
        count: usize,
    },
}

pub type RouteResult<T> = Result<T, RouteError>;

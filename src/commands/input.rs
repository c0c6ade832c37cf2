//! Reading JSON input documents from files or stdin

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use serde::de::DeserializeOwned;

use kpoint_core::error::{KpointError, Result};
use kpoint_core::knowledge::KnowledgePoint;

/// Path argument that selects stdin
pub const STDIN_PATH: &str = "-";

pub fn is_stdin(path: &Path) -> bool {
    path == Path::new(STDIN_PATH)
}

/// Read and parse a JSON document
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = if is_stdin(path) {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .map_err(|e| KpointError::io_operation("read", "stdin", e))?;
        buf
    } else {
        fs::read_to_string(path)
            .map_err(|e| KpointError::io_operation("read", path.display(), e))?
    };

    serde_json::from_str(&content).map_err(|e| KpointError::invalid_input(path, e))
}

/// Read a JSON array of knowledge points
pub fn read_points(path: &Path) -> Result<Vec<KnowledgePoint>> {
    let points: Vec<KnowledgePoint> = read_json(path)?;
    tracing::debug!(path = %path.display(), count = points.len(), "read_points");
    Ok(points)
}

//! Library error types.
//!
//! Only graph loading can fail recoverably: decode operations are total over
//! a well-formed graph, not-found results are `Option::None`, and contract
//! violations (invalid bit ranges, non-positive step sizes, equal search
//! endpoints) panic at the call site.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GraphError {
    /// A graph file could not be opened or mapped.
    #[error("failed to read graph file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A graph file exists but its size does not match the record layout.
    #[error("malformed graph file {path}: {detail}")]
    Malformed { path: PathBuf, detail: String },
}

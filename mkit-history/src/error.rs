use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Result type for history operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("history file '{path}' not found")]
    #[diagnostic(help("nothing has been generated in this project yet"))]
    Missing { path: PathBuf },

    #[error("history file '{path}' is not valid JSON")]
    #[diagnostic(help("fix or delete the file; a deleted history cannot gate removals"))]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("no history entry for '{name}'")]
    #[diagnostic(help("only services recorded by 'mkit generate' can be removed"))]
    NotFound { name: String },

    #[error("history entry for '{name}' has an unparseable timestamp '{value}'")]
    #[diagnostic(help("created_at must be an RFC 3339 timestamp"))]
    InvalidTimestamp { name: String, value: String },

    #[error("failed to access history file '{path}'")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

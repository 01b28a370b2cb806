//! Anchor-based patching of the two aggregation files.
//!
//! Both the dependency container and the route table are plain Go source
//! files. Nothing here parses Go: insertion locates known anchor lines and
//! removal drops lines matching the exact text that was inserted. That
//! byte-level symmetry is the contract that makes removal possible.

mod container;
mod routes;
mod strip;

use std::path::{Path, PathBuf};

pub use container::{insert_registration, prune_import, prune_unused_import, register_service};
pub use routes::{RoutePatch, insert_route, register_route, registration_line};
pub use strip::{strip_from_file, strip_lines};
use thiserror::Error;

/// Result type for patch operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to patch '{path}'")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Read a file, transform its content, and write it back.
fn patch_file(path: &Path, f: impl FnOnce(&str) -> String) -> Result<()> {
    let content = read(path)?;
    write(path, &f(&content))
}

fn read(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| Error::Io {
        path: path.to_path_buf(),
        source: e,
    })
}

fn write(path: &Path, content: &str) -> Result<()> {
    std::fs::write(path, content).map_err(|e| Error::Io {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Join patched lines back into file content, keeping a trailing newline
/// when the input had one so that insert followed by removal restores the
/// original bytes.
fn rejoin(lines: Vec<String>, original: &str) -> String {
    let mut out = lines.join("\n");
    if original.ends_with('\n') {
        out.push('\n');
    }
    out
}

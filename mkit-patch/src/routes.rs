//! Route registration in the route table file.

use std::path::Path;

use crate::{Result, read, rejoin, write};

/// Anchor for the API group declaration.
const GROUP_ANCHOR: &str = "api := app.Group";

/// Outcome of a route registration attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoutePatch {
    /// The registration line was inserted.
    Inserted,
    /// The exact line already existed; the file was left untouched.
    AlreadyRegistered,
}

/// The exact registration line for a service, as inserted and as later
/// matched for removal.
pub fn registration_line(service: &str, lower: &str) -> String {
    format!("\thandler.New{service}Handler(svc.{service}).Register(api.Group(\"/{lower}s\"))")
}

/// Register a service's handler in the route file on disk.
pub fn register_route(path: &Path, service: &str, lower: &str) -> Result<RoutePatch> {
    let line = registration_line(service, lower);
    let content = read(path)?;

    match insert_route(&content, &line) {
        None => Ok(RoutePatch::AlreadyRegistered),
        Some(patched) => {
            write(path, &patched)?;
            Ok(RoutePatch::Inserted)
        }
    }
}

/// Insert a registration line after the API group anchor.
///
/// Returns `None` when the exact line is already present anywhere in the
/// file, making repeated registration a no-op.
pub fn insert_route(content: &str, line: &str) -> Option<String> {
    if content.contains(line) {
        return None;
    }

    let mut out: Vec<String> = Vec::new();
    for current in content.lines() {
        out.push(current.to_string());
        if current.contains(GROUP_ANCHOR) {
            out.push(line.to_string());
        }
    }

    Some(rejoin(out, content))
}

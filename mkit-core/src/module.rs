use std::path::Path;

use eyre::{Result, WrapErr};

/// Resolve the Go module path for the target project.
///
/// An explicit override wins; otherwise the `module` line of the project's
/// `go.mod` is used. A go.mod without a `module` line yields the
/// placeholder `your-module-name` rather than an error.
pub fn resolve_module(root: &Path, explicit: Option<&str>) -> Result<String> {
    if let Some(module) = explicit {
        return Ok(module.to_string());
    }

    let path = root.join("go.mod");
    let content = std::fs::read_to_string(&path)
        .wrap_err_with(|| format!("failed to read '{}'", path.display()))?;

    for line in content.lines() {
        if let Some(module) = line.strip_prefix("module ") {
            return Ok(module.trim().to_string());
        }
    }
    Ok("your-module-name".to_string())
}

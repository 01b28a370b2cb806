//! Reverse mode: drop previously inserted lines by pattern.

use std::path::Path;

use crate::{Result, patch_file, rejoin};

/// Strip matching lines from a file on disk.
pub fn strip_from_file(path: &Path, patterns: &[String]) -> Result<()> {
    patch_file(path, |content| strip_lines(content, patterns))
}

/// Drop every line whose trimmed content contains any trimmed pattern as a
/// substring. All other lines pass through unchanged, in order.
pub fn strip_lines(content: &str, patterns: &[String]) -> String {
    let out: Vec<String> = content
        .lines()
        .filter(|line| {
            let trimmed = line.trim();
            !patterns.iter().any(|p| trimmed.contains(p.trim()))
        })
        .map(|line| line.to_string())
        .collect();

    rejoin(out, content)
}

use std::path::{Path, PathBuf};

use eyre::Result;

/// Trait for types that represent a generated file.
pub trait GeneratedFile {
    /// File path relative to the project root.
    fn path(&self, base: &Path) -> PathBuf;

    /// Render the file content.
    ///
    /// Fails if the blueprint contains a placeholder with no substitution.
    fn render(&self) -> Result<String>;

    /// Write the file to disk under the given overwrite policy.
    fn write(&self, base: &Path, overwrite: Overwrite) -> Result<WriteResult> {
        let path = self.path(base);

        match overwrite {
            Overwrite::Always => {
                write_file(&path, &self.render()?)?;
                Ok(WriteResult::Written)
            }
            Overwrite::IfMissing => {
                if path.exists() {
                    Ok(WriteResult::Skipped)
                } else {
                    write_file(&path, &self.render()?)?;
                    Ok(WriteResult::Written)
                }
            }
        }
    }
}

/// Write content to a path, creating parent directories as needed.
pub fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)?;
    Ok(())
}

/// How to handle an existing file at the target path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overwrite {
    /// Replace any existing content (`--force`).
    Always,
    /// Skip the file if it already exists.
    IfMissing,
}

/// Result of a write operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteResult {
    /// File was written.
    Written,
    /// File already existed and was left untouched.
    Skipped,
}

//! Insert pass and import pruning for the dependency container file.

use std::path::Path;

use crate::{Result, patch_file, rejoin};

/// Anchor for the container struct declaration.
const STRUCT_ANCHOR: &str = "type Container struct {";
/// Anchor for the constructor return expression.
const CTOR_ANCHOR: &str = "return &Container{";

/// Register a service in the container file on disk.
pub fn register_service(path: &Path, service: &str, module: &str) -> Result<()> {
    patch_file(path, |content| insert_registration(content, service, module))
}

/// Strip the repository import from the container file if nothing uses it.
pub fn prune_import(path: &Path, import_path: &str) -> Result<()> {
    patch_file(path, |content| prune_unused_import(content, import_path))
}

/// Insert the three registration lines for a service into container source.
///
/// Single pass over the lines:
/// - the repository import is appended just before the import block closes,
///   only if not already present (re-running is a no-op for the import);
/// - a field line is appended after the first struct anchor;
/// - an initializer line is appended after the first constructor anchor.
///
/// The field and initializer insertions are not guarded by a containment
/// check: generating the same name twice without removing it first inserts
/// a second pair. Tests pin that behavior down rather than deduplicate it.
pub fn insert_registration(content: &str, service: &str, module: &str) -> String {
    let import_path = format!("{module}/internal/repository");
    let field = format!("\t{service} *{service}Service");
    let initializer =
        format!("\t\t{service}: New{service}Service(repository.New{service}Repository(db)),");

    let mut out: Vec<String> = Vec::new();
    let mut import_block: Vec<String> = Vec::new();
    let mut in_import_block = false;
    let mut already_imported = false;
    let mut inserted_import = false;
    let mut inserted_field = false;
    let mut inserted_initializer = false;

    for line in content.lines() {
        let trimmed = line.trim();

        if trimmed.starts_with(&format!("\"{import_path}\"")) {
            already_imported = true;
        }

        if trimmed.starts_with("import (") {
            in_import_block = true;
        }

        if in_import_block && trimmed.starts_with(')') && !already_imported {
            import_block.push(format!("  \"{import_path}\""));
            inserted_import = true;
        }

        if in_import_block {
            import_block.push(line.to_string());
            if trimmed.starts_with(')') {
                in_import_block = false;
                out.append(&mut import_block);
            }
            continue;
        }

        if line.contains(STRUCT_ANCHOR) && !inserted_field {
            out.push(line.to_string());
            out.push(field.clone());
            inserted_field = true;
            continue;
        }

        if line.contains(CTOR_ANCHOR) && !inserted_initializer {
            out.push(line.to_string());
            out.push(initializer.clone());
            inserted_initializer = true;
            continue;
        }

        out.push(line.to_string());
    }

    // No import block at all: fall back to inserting after the first
    // import-introducing line.
    if !already_imported && !inserted_import {
        for i in 0..out.len() {
            if out[i].trim().starts_with("import") {
                out.insert(i + 1, format!(" \"{import_path}\""));
                break;
            }
        }
    }

    rejoin(out, content)
}

/// Strip the repository import when no line outside an import statement
/// still references the repository package; leave it untouched otherwise.
pub fn prune_unused_import(content: &str, import_path: &str) -> String {
    let used = content.lines().any(|line| {
        let trimmed = line.trim();
        trimmed.contains("repository.")
            && !trimmed.starts_with("import")
            && !trimmed.contains(import_path)
    });
    if used {
        return content.to_string();
    }

    let quoted = format!("\"{import_path}\"");
    let mut out: Vec<String> = Vec::new();
    let mut in_import_block = false;

    for line in content.lines() {
        let trimmed = line.trim();

        if trimmed.starts_with("import (") {
            in_import_block = true;
            out.push(line.to_string());
            continue;
        }

        if in_import_block && trimmed == ")" {
            in_import_block = false;
            out.push(line.to_string());
            continue;
        }

        // Block-form import of the repository package.
        if in_import_block && trimmed == quoted {
            continue;
        }

        // Single-line form.
        if trimmed.starts_with("import ") && trimmed.contains(import_path) {
            continue;
        }

        out.push(line.to_string());
    }

    rejoin(out, content)
}

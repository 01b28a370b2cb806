//! Generation engine: render, write, wire, record.

use std::path::Path;

use eyre::Result;
use mkit_core::{GeneratedFile, Overwrite, ServiceIdent, WriteResult};
use mkit_history::HistoryStore;
use mkit_patch::RoutePatch;

use crate::artifact::{Artifact, ArtifactKind};

/// Project-relative path of the dependency container file.
pub const CONTAINER_FILE: &str = "internal/service/container.go";
/// Project-relative path of the route table file.
pub const ROUTES_FILE: &str = "internal/routes/index.go";

/// A rendered artifact for dry-run display.
#[derive(Debug)]
pub struct PreviewFile {
    pub path: String,
    pub content: String,
}

/// Outcome of the container patch step.
#[derive(Debug)]
pub enum ContainerStatus {
    Patched,
    /// The step was abandoned; already-completed steps stand.
    Failed(String),
}

/// Outcome of the route patch step.
#[derive(Debug)]
pub enum RouteStatus {
    Inserted,
    AlreadyRegistered,
    Failed(String),
}

/// What a generation run did.
#[derive(Debug)]
pub struct GenerateOutcome {
    /// Files written this run.
    pub written: Vec<String>,
    /// Files skipped because they already existed.
    pub skipped: Vec<String>,
    pub container: ContainerStatus,
    pub routes: RouteStatus,
    /// All five unit paths, as recorded in history.
    pub files: Vec<String>,
}

/// The generation engine for one service unit.
pub struct Scaffold {
    ident: ServiceIdent,
    module: String,
}

impl Scaffold {
    pub fn new(ident: ServiceIdent, module: String) -> Self {
        Self { ident, module }
    }

    pub fn ident(&self) -> &ServiceIdent {
        &self.ident
    }

    fn artifacts(&self) -> Vec<Artifact<'_>> {
        ArtifactKind::ALL
            .iter()
            .map(|&kind| Artifact::new(kind, &self.ident, &self.module))
            .collect()
    }

    /// The five project-relative paths of this unit.
    pub fn relative_paths(&self) -> Vec<String> {
        ArtifactKind::ALL
            .iter()
            .map(|k| k.relative_path(self.ident.file_base()))
            .collect()
    }

    /// Render all artifacts without touching the disk.
    pub fn preview(&self) -> Result<Vec<PreviewFile>> {
        self.artifacts()
            .iter()
            .map(|artifact| {
                Ok(PreviewFile {
                    path: artifact.relative_path(),
                    content: artifact.render()?,
                })
            })
            .collect()
    }

    /// Write the artifacts, patch the aggregation files, record history.
    ///
    /// A write failure aborts the run. A patch failure abandons only that
    /// patch step; there is no rollback of steps already applied.
    pub fn generate(&self, root: &Path, overwrite: Overwrite) -> Result<GenerateOutcome> {
        let mut written = Vec::new();
        let mut skipped = Vec::new();

        for artifact in self.artifacts() {
            match artifact.write(root, overwrite)? {
                WriteResult::Written => written.push(artifact.relative_path()),
                WriteResult::Skipped => skipped.push(artifact.relative_path()),
            }
        }

        // The import path is always derived from go.mod, never from a
        // --module override: removal has no override flag and must be able
        // to find the same import line.
        let patch_module = mkit_core::resolve_module(root, None)?;
        let container = match mkit_patch::register_service(
            &root.join(CONTAINER_FILE),
            self.ident.service(),
            &patch_module,
        ) {
            Ok(()) => ContainerStatus::Patched,
            Err(e) => ContainerStatus::Failed(e.to_string()),
        };

        let routes = match mkit_patch::register_route(
            &root.join(ROUTES_FILE),
            self.ident.service(),
            self.ident.file_base(),
        ) {
            Ok(RoutePatch::Inserted) => RouteStatus::Inserted,
            Ok(RoutePatch::AlreadyRegistered) => RouteStatus::AlreadyRegistered,
            Err(e) => RouteStatus::Failed(e.to_string()),
        };

        let files = self.relative_paths();
        HistoryStore::new(root).record(self.ident.key(), files.clone())?;

        Ok(GenerateOutcome {
            written,
            skipped,
            container,
            routes,
            files,
        })
    }
}

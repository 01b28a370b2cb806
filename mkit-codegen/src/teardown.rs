//! Removal engine: lookup, policy check, delete, reverse patch, forget.

use std::path::Path;

use chrono::{TimeDelta, Utc};
use miette::Diagnostic;
use mkit_core::ServiceIdent;
use mkit_history::HistoryStore;
use thiserror::Error;

use crate::scaffold::{CONTAINER_FILE, ROUTES_FILE};

/// Maximum entry age before the freshness policy considers it stale.
pub const FRESHNESS_WINDOW_SECS: i64 = 60;

/// Freshness-policy violation. Nothing has been mutated when this is
/// returned.
///
/// A stale entry aborts only when `--force` was supplied; without the
/// flag, removal proceeds at any age.
#[derive(Debug, Error, Diagnostic)]
#[error("'{name}' is older than the freshness window ({created_at})")]
#[diagnostic(help("re-run without --force to remove a stale entry"))]
pub struct PolicyError {
    pub name: String,
    pub created_at: String,
}

/// Fatal removal failures; everything else is best-effort and reported in
/// the outcome.
#[derive(Debug, Error, Diagnostic)]
pub enum TeardownError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    History(#[from] mkit_history::Error),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Policy(#[from] PolicyError),
}

/// What a removal run did.
#[derive(Debug, Default)]
pub struct RemoveOutcome {
    /// Files deleted from disk.
    pub deleted: Vec<String>,
    /// Recorded files that were already gone.
    pub missing: Vec<String>,
    /// Deletion failures, reported but not fatal.
    pub failed: Vec<String>,
    /// Patch or history steps that were abandoned.
    pub warnings: Vec<String>,
}

/// The removal engine for one service unit.
pub struct Teardown {
    ident: ServiceIdent,
    module: String,
    force: bool,
}

impl Teardown {
    pub fn new(ident: ServiceIdent, module: String, force: bool) -> Self {
        Self {
            ident,
            module,
            force,
        }
    }

    /// Run the removal state machine:
    /// lookup, policy check, delete files, reverse-patch the container,
    /// reverse-patch the routes, delete the history entry.
    ///
    /// Terminal on lookup and policy failures, which happen before any
    /// mutation. Every later step is attempted regardless of earlier
    /// step reports; the history entry is always deleted last.
    pub fn remove(&self, root: &Path) -> Result<RemoveOutcome, TeardownError> {
        let store = HistoryStore::new(root);
        let (files, created_at) = store.lookup(self.ident.key())?;

        let age = Utc::now().signed_duration_since(created_at);
        if age > TimeDelta::seconds(FRESHNESS_WINDOW_SECS) && self.force {
            return Err(PolicyError {
                name: self.ident.key().to_string(),
                created_at: created_at.to_rfc3339(),
            }
            .into());
        }

        let mut outcome = RemoveOutcome::default();
        self.delete_files(root, &files, &mut outcome);
        self.reverse_patch_container(root, &mut outcome);
        self.reverse_patch_routes(root, &mut outcome);

        if let Err(e) = store.forget(self.ident.key()) {
            outcome.warnings.push(format!("history not updated: {e}"));
        }

        Ok(outcome)
    }

    fn delete_files(&self, root: &Path, files: &[String], outcome: &mut RemoveOutcome) {
        for file in files {
            match std::fs::remove_file(root.join(file)) {
                Ok(()) => outcome.deleted.push(file.clone()),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    outcome.missing.push(file.clone());
                }
                Err(e) => outcome.failed.push(format!("{file}: {e}")),
            }
        }
    }

    fn reverse_patch_container(&self, root: &Path, outcome: &mut RemoveOutcome) {
        let service = self.ident.service();
        let path = root.join(CONTAINER_FILE);
        let patterns = vec![
            format!("{service} *{service}Service"),
            format!("{service}: New{service}Service(repository.New{service}Repository(db))"),
        ];

        if let Err(e) = mkit_patch::strip_from_file(&path, &patterns) {
            outcome.warnings.push(e.to_string());
            return;
        }

        let import_path = format!("{}/internal/repository", self.module);
        if let Err(e) = mkit_patch::prune_import(&path, &import_path) {
            outcome.warnings.push(e.to_string());
        }
    }

    fn reverse_patch_routes(&self, root: &Path, outcome: &mut RemoveOutcome) {
        let service = self.ident.service();
        let lower = self.ident.file_base();
        let patterns = vec![format!(
            "New{service}Handler(svc.{service}).Register(api.Group(\"/{lower}s\"))"
        )];

        if let Err(e) = mkit_patch::strip_from_file(&root.join(ROUTES_FILE), &patterns) {
            outcome.warnings.push(e.to_string());
        }
    }
}

use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use mkit_codegen::Teardown;
use mkit_core::{ServiceIdent, resolve_module};

use super::UnwrapOrExit;

#[derive(Args)]
pub struct RemoveCommand {
    /// Service name (e.g. 'rsvp')
    #[arg(long)]
    name: String,

    /// Enforce the freshness window (stale entries abort removal)
    #[arg(long)]
    force: bool,

    /// Target project directory
    #[arg(short = 'C', long, default_value = ".")]
    project: PathBuf,
}

impl RemoveCommand {
    pub fn run(&self) -> Result<()> {
        let ident = ServiceIdent::parse(&self.name)?;
        let module = resolve_module(&self.project, None)?;
        let key = ident.key().to_string();

        let outcome = Teardown::new(ident, module, self.force)
            .remove(&self.project)
            .unwrap_or_exit();

        for path in &outcome.deleted {
            println!("  - {path}");
        }
        for path in &outcome.missing {
            println!("  ? {path} (already gone)");
        }
        for failure in &outcome.failed {
            eprintln!("warning: could not delete {failure}");
        }
        for warning in &outcome.warnings {
            eprintln!("warning: {warning}");
        }

        println!("Service '{key}' removed");

        Ok(())
    }
}

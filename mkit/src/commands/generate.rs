use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use mkit_codegen::{ContainerStatus, RouteStatus, Scaffold};
use mkit_core::{Overwrite, ServiceIdent, resolve_module};

#[derive(Args)]
pub struct GenerateCommand {
    /// Service name (e.g. 'rsvp')
    #[arg(long)]
    name: String,

    /// Overwrite generated files that already exist
    #[arg(long)]
    force: bool,

    /// Preview generated files without writing them
    #[arg(long)]
    dry_run: bool,

    /// Override the Go module path read from go.mod
    #[arg(long)]
    module: Option<String>,

    /// Target project directory
    #[arg(short = 'C', long, default_value = ".")]
    project: PathBuf,
}

impl GenerateCommand {
    pub fn run(&self) -> Result<()> {
        let ident = ServiceIdent::parse(&self.name)?;
        let module = resolve_module(&self.project, self.module.as_deref())?;
        let scaffold = Scaffold::new(ident, module);

        if self.dry_run {
            return self.run_preview(&scaffold);
        }

        let overwrite = if self.force {
            Overwrite::Always
        } else {
            Overwrite::IfMissing
        };

        let outcome = scaffold.generate(&self.project, overwrite)?;

        for path in &outcome.written {
            println!("  + {path}");
        }
        for path in &outcome.skipped {
            println!("  = {path} (exists, use --force to overwrite)");
        }

        match &outcome.container {
            ContainerStatus::Patched => println!("Updated: {}", mkit_codegen::CONTAINER_FILE),
            ContainerStatus::Failed(e) => eprintln!("warning: container not patched: {e}"),
        }
        match &outcome.routes {
            RouteStatus::Inserted => println!("Updated: {}", mkit_codegen::ROUTES_FILE),
            RouteStatus::AlreadyRegistered => println!("Route already registered"),
            RouteStatus::Failed(e) => eprintln!("warning: routes not patched: {e}"),
        }

        println!(
            "Service '{}' generated and registered",
            scaffold.ident().file_base()
        );

        Ok(())
    }

    fn run_preview(&self, scaffold: &Scaffold) -> Result<()> {
        let files = scaffold.preview()?;

        for file in &files {
            println!("── {} ──", file.path);
            println!("{}", file.content);
        }

        println!("── Summary ──");
        println!("{} files would be generated", files.len());

        Ok(())
    }
}

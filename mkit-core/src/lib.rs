//! Core types for the mkit service scaffolder.
//!
//! This crate provides the pieces shared by the generator and remover:
//! service name derivation, the generated-file write machinery, and
//! Go module path resolution.

mod file;
mod ident;
mod module;

pub use file::{GeneratedFile, Overwrite, WriteResult, write_file};
pub use ident::{IdentError, ServiceIdent};
pub use module::resolve_module;

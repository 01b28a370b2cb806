//! The five artifacts of a service unit.

use std::path::{Path, PathBuf};

use eyre::Result;
use mkit_core::{GeneratedFile, ServiceIdent};

use crate::{expand, templates};

/// The kinds of file a unit is made of, in generation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    Repository,
    Service,
    Handler,
    Dto,
    DtoTest,
}

impl ArtifactKind {
    pub const ALL: [ArtifactKind; 5] = [
        ArtifactKind::Repository,
        ArtifactKind::Service,
        ArtifactKind::Handler,
        ArtifactKind::Dto,
        ArtifactKind::DtoTest,
    ];

    /// Conventional target directory for this kind.
    pub fn dir(self) -> &'static str {
        match self {
            ArtifactKind::Repository => "internal/repository",
            ArtifactKind::Service => "internal/service",
            ArtifactKind::Handler => "internal/handler",
            ArtifactKind::Dto => "internal/dto",
            ArtifactKind::DtoTest => "test/unit/dto",
        }
    }

    /// File name for a unit with the given lowercase base name.
    pub fn file_name(self, base: &str) -> String {
        match self {
            ArtifactKind::Repository => format!("{base}_repository.go"),
            ArtifactKind::Service => format!("{base}_service.go"),
            ArtifactKind::Handler => format!("{base}_handler.go"),
            ArtifactKind::Dto => format!("{base}.go"),
            ArtifactKind::DtoTest => format!("{base}_input_test.go"),
        }
    }

    /// Project-relative path for a unit with the given base name.
    pub fn relative_path(self, base: &str) -> String {
        format!("{}/{}", self.dir(), self.file_name(base))
    }

    fn blueprint(self) -> &'static str {
        match self {
            ArtifactKind::Repository => templates::REPOSITORY,
            ArtifactKind::Service => templates::SERVICE,
            ArtifactKind::Handler => templates::HANDLER,
            ArtifactKind::Dto => templates::DTO,
            ArtifactKind::DtoTest => templates::DTO_TEST,
        }
    }
}

/// One renderable file of a unit.
pub struct Artifact<'a> {
    kind: ArtifactKind,
    ident: &'a ServiceIdent,
    module: &'a str,
}

impl<'a> Artifact<'a> {
    pub fn new(kind: ArtifactKind, ident: &'a ServiceIdent, module: &'a str) -> Self {
        Self {
            kind,
            ident,
            module,
        }
    }

    pub fn kind(&self) -> ArtifactKind {
        self.kind
    }

    /// Project-relative path of this artifact.
    pub fn relative_path(&self) -> String {
        self.kind.relative_path(self.ident.file_base())
    }
}

impl GeneratedFile for Artifact<'_> {
    fn path(&self, base: &Path) -> PathBuf {
        base.join(self.relative_path())
    }

    fn render(&self) -> Result<String> {
        let content = expand(
            self.kind.blueprint(),
            &[
                ("service", self.ident.service()),
                ("receiver", self.ident.receiver()),
                ("var", self.ident.var_name()),
                ("module", self.module),
            ],
        )?;
        Ok(content)
    }
}

//! Blueprints and scaffolding engines.
//!
//! `Scaffold` renders the five artifacts of a service unit, writes them,
//! wires the unit into the container and route files, and records the run
//! in the history store. `Teardown` reverses a recorded run.

mod artifact;
mod render;
mod scaffold;
mod teardown;
mod templates;

pub use artifact::{Artifact, ArtifactKind};
pub use render::{TemplateError, expand};
pub use scaffold::{
    CONTAINER_FILE, ContainerStatus, GenerateOutcome, PreviewFile, ROUTES_FILE, RouteStatus,
    Scaffold,
};
pub use teardown::{FRESHNESS_WINDOW_SECS, PolicyError, RemoveOutcome, Teardown, TeardownError};

//! Baler build orchestrator.
//!
//! Decides *what* to run, *in what order*, and *how to combine results*:
//! rule matching, transform pipelines, lifecycle hooks, the optimization
//! pass, and content-addressed emission. Concrete transformations
//! (transpilers, preprocessors) are external collaborators behind the
//! pipeline stage seam.
//!
//! Baler emits `tracing` events but installs no subscriber; applications
//! bring their own.

pub mod artifact;
pub mod build;
pub mod context;
pub mod error;
pub mod hooks;
pub mod manifest;
pub mod naming;
pub mod optimize;
pub mod output;
pub mod pipeline;
pub mod rules;

pub use artifact::{Artifact, Naming};
pub use build::{build, BuildReport, EmittedFile};
pub use context::BuildContext;
pub use error::{Error, Result};
pub use manifest::{Manifest, ManifestEntry};
pub use rules::RuleSet;

//! create-next-apollo-app core library
//!
//! Scaffolding pipeline that turns a fresh create-react-app project into a
//! Next.js + Apollo starter: generate, install, replace templates.

pub mod config;
pub mod error;
pub mod generator;
pub mod installer;
pub mod manifest;
pub mod navigator;
pub mod pipeline;
pub mod process;
pub mod reporter;
pub mod templates;
pub mod writer;

pub use config::{CommandSpec, ManifestRewrite, ScaffoldConfig, ScriptMap};
pub use error::{CnaError, CnaResult};
pub use pipeline::{Pipeline, PipelineOutcome, RunReport};
pub use reporter::{Event, Reporter};
pub use templates::{classify, Destination, Template, TemplateSet};

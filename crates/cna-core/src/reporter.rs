//! Progress narration.
//!
//! Stages describe what happened as [`Event`]s; how they reach the user is
//! up to the [`Reporter`] implementation. The CLI renders them in color.

use std::path::PathBuf;
use std::sync::Mutex;

/// Something the user should hear about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// No project name was given; carries the binary name for the hint.
    MissingProjectName { usage: String },
    /// The generator is about to run.
    InstallingPackages,
    /// An external command exited non-zero or could not be started.
    ProcessFailed { program: String, stderr: String },
    /// The generator stage finished.
    GeneratorFinished,
    /// The generator stage reported failure and the pipeline stopped.
    GeneratorAborted,
    /// Could not switch into the project directory.
    NavigationFailed { path: PathBuf, error: String },
    InstallingDependencies,
    /// The installer failed and strict mode stopped the pipeline.
    InstallerAborted,
    ReplacingTemplates,
    /// A best-effort filesystem step failed.
    StepFailed { step: String, error: String },
    CreatingFile { name: String },
    FileFailed { path: PathBuf, error: String },
    Done { project_name: String },
}

/// Receives pipeline events.
pub trait Reporter: Send + Sync {
    fn report(&self, event: Event);
}

/// Keeps every event in memory, in order.
#[derive(Debug, Default)]
pub struct MemoryReporter {
    events: Mutex<Vec<Event>>,
}

impl MemoryReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the events seen so far.
    pub fn events(&self) -> Vec<Event> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }
}

impl Reporter for MemoryReporter {
    fn report(&self, event: Event) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentReporter;

impl Reporter for SilentReporter {
    fn report(&self, _event: Event) {}
}

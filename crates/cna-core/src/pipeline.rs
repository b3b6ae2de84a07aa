//! The scaffolding pipeline: generate, enter, install, write templates.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

use crate::config::ScaffoldConfig;
use crate::generator;
use crate::installer;
use crate::navigator;
use crate::process::{CommandRunner, SystemRunner};
use crate::reporter::{Event, Reporter, SilentReporter};
use crate::templates::TemplateSet;
use crate::writer::{self, WriteSummary};

/// How a run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineOutcome {
    /// No project name; nothing was run or written.
    MissingName,
    /// The generator failed in strict mode.
    GeneratorFailed,
    /// The installer failed in strict mode.
    InstallerFailed { project_dir: PathBuf },
    /// Every stage ran.
    Completed(RunReport),
}

/// What a completed run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub project_dir: PathBuf,
    pub installer_ok: bool,
    pub writes: WriteSummary,
}

impl PipelineOutcome {
    /// Process exit code. Failures only surface in strict mode.
    pub fn exit_code(&self, strict: bool) -> i32 {
        if !strict {
            return 0;
        }
        match self {
            PipelineOutcome::MissingName => 0,
            PipelineOutcome::GeneratorFailed | PipelineOutcome::InstallerFailed { .. } => 1,
            PipelineOutcome::Completed(report) => {
                if report.installer_ok && report.writes.is_clean() {
                    0
                } else {
                    1
                }
            }
        }
    }
}

/// Runs every stage in order against one configuration.
pub struct Pipeline {
    config: ScaffoldConfig,
    templates: TemplateSet,
    runner: Arc<dyn CommandRunner>,
    reporter: Arc<dyn Reporter>,
}

impl Pipeline {
    /// Pipeline using the host's processes, built-in templates and no output.
    pub fn new(config: ScaffoldConfig) -> Self {
        Self {
            config,
            templates: TemplateSet::builtin(),
            runner: Arc::new(SystemRunner),
            reporter: Arc::new(SilentReporter),
        }
    }

    pub fn with_runner(mut self, runner: Arc<dyn CommandRunner>) -> Self {
        self.runner = runner;
        self
    }

    pub fn with_reporter(mut self, reporter: Arc<dyn Reporter>) -> Self {
        self.reporter = reporter;
        self
    }

    pub fn with_templates(mut self, templates: TemplateSet) -> Self {
        self.templates = templates;
        self
    }

    pub fn config(&self) -> &ScaffoldConfig {
        &self.config
    }

    /// Scaffold `name` under `base_dir`.
    ///
    /// Changes the process working directory to the new project.
    pub async fn run(&self, base_dir: &Path, name: Option<&str>) -> PipelineOutcome {
        let runner = self.runner.as_ref();
        let reporter = self.reporter.as_ref();

        let Some(name) = generator::project_name(name) else {
            generator::generate(runner, &self.config, base_dir, None, reporter).await;
            return PipelineOutcome::MissingName;
        };

        info!(project = %name, base = %base_dir.display(), "Scaffolding project");

        if !generator::generate(runner, &self.config, base_dir, Some(name), reporter).await {
            reporter.report(Event::GeneratorAborted);
            return PipelineOutcome::GeneratorFailed;
        }

        let project_dir = navigator::enter_project(base_dir, name, reporter);

        let installer_ok =
            installer::install_dependencies(runner, &self.config, &project_dir, reporter).await;
        if !installer_ok && self.config.strict {
            reporter.report(Event::InstallerAborted);
            return PipelineOutcome::InstallerFailed { project_dir };
        }

        let writes =
            writer::write_templates(runner, &self.config, &project_dir, &self.templates, reporter)
                .await;

        info!(
            written = writes.written.len(),
            failed = writes.failed.len(),
            "Templates replaced"
        );

        reporter.report(Event::Done {
            project_name: name.to_string(),
        });

        PipelineOutcome::Completed(RunReport {
            project_dir,
            installer_ok,
            writes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(installer_ok: bool, failed: usize) -> PipelineOutcome {
        let mut writes = WriteSummary {
            manifest_updated: true,
            ..Default::default()
        };
        for i in 0..failed {
            writes.failed.push((PathBuf::from(format!("f{}", i)), "denied".into()));
        }
        PipelineOutcome::Completed(RunReport {
            project_dir: PathBuf::from("/tmp/shop"),
            installer_ok,
            writes,
        })
    }

    #[test]
    fn test_exit_code_lenient_is_always_zero() {
        assert_eq!(PipelineOutcome::GeneratorFailed.exit_code(false), 0);
        assert_eq!(report(false, 3).exit_code(false), 0);
    }

    #[test]
    fn test_exit_code_strict() {
        assert_eq!(PipelineOutcome::MissingName.exit_code(true), 0);
        assert_eq!(PipelineOutcome::GeneratorFailed.exit_code(true), 1);
        assert_eq!(report(true, 0).exit_code(true), 0);
        assert_eq!(report(false, 0).exit_code(true), 1);
        assert_eq!(report(true, 1).exit_code(true), 1);
    }
}

//! Template writing stage.
//!
//! Best effort throughout: every failure is reported and logged, none is
//! returned to the caller as an error. The returned [`WriteSummary`] is
//! informational.

use futures::future::join_all;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::config::ScaffoldConfig;
use crate::manifest;
use crate::process::CommandRunner;
use crate::reporter::{Event, Reporter};
use crate::templates::{Destination, TemplateSet};

/// Generator defaults replaced by the template set.
pub const REMOVED_DIRS: [&str; 2] = ["src", "public"];

/// Outcome of a template writing pass.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct WriteSummary {
    pub written: Vec<PathBuf>,
    pub failed: Vec<(PathBuf, String)>,
    /// Whether the manifest scripts were rewritten.
    pub manifest_updated: bool,
}

impl WriteSummary {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty() && self.manifest_updated
    }
}

/// Replace the generator's defaults in `project_dir` with `templates`.
pub async fn write_templates(
    runner: &dyn CommandRunner,
    config: &ScaffoldConfig,
    project_dir: &Path,
    templates: &TemplateSet,
    reporter: &dyn Reporter,
) -> WriteSummary {
    reporter.report(Event::ReplacingTemplates);

    remove_defaults(project_dir, reporter).await;
    create_layout(project_dir, reporter).await;

    let mut summary = WriteSummary::default();

    match manifest::rewrite_scripts(runner, config.manifest_rewrite, project_dir, &config.scripts)
        .await
    {
        Ok(()) => summary.manifest_updated = true,
        Err(e) => {
            warn!(error = %e, "Could not rewrite manifest scripts");
            reporter.report(Event::StepFailed {
                step: "update package.json scripts".to_string(),
                error: e.to_string(),
            });
        }
    }

    let mut handles = Vec::with_capacity(templates.len());
    for template in templates.iter() {
        reporter.report(Event::CreatingFile {
            name: template.name.clone(),
        });

        let path = template.destination().dir(project_dir).join(&template.name);
        let content = template.content.clone();
        handles.push(tokio::spawn(async move {
            let result = tokio::fs::write(&path, content).await;
            (path, result)
        }));
    }

    for joined in join_all(handles).await {
        match joined {
            Ok((path, Ok(()))) => {
                debug!(path = %path.display(), "Wrote template");
                summary.written.push(path);
            }
            Ok((path, Err(e))) => {
                warn!(path = %path.display(), error = %e, "Failed to write template");
                reporter.report(Event::FileFailed {
                    path: path.clone(),
                    error: e.to_string(),
                });
                summary.failed.push((path, e.to_string()));
            }
            Err(e) => {
                warn!(error = %e, "Template write task did not complete");
                reporter.report(Event::StepFailed {
                    step: "write template".to_string(),
                    error: e.to_string(),
                });
            }
        }
    }

    summary
}

/// Delete `src/` and `public/`; absence is fine.
async fn remove_defaults(project_dir: &Path, reporter: &dyn Reporter) {
    for dir in REMOVED_DIRS {
        let path = project_dir.join(dir);
        match tokio::fs::remove_dir_all(&path).await {
            Ok(()) => debug!(path = %path.display(), "Removed generator default"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Could not remove directory");
                reporter.report(Event::StepFailed {
                    step: format!("remove {}", path.display()),
                    error: e.to_string(),
                });
            }
        }
    }
}

/// Create `pages/`, `components/` and `lib/`, including missing parents.
async fn create_layout(project_dir: &Path, reporter: &dyn Reporter) {
    for destination in Destination::CREATED_DIRS {
        let path = destination.dir(project_dir);
        if let Err(e) = tokio::fs::create_dir_all(&path).await {
            warn!(path = %path.display(), error = %e, "Could not create directory");
            reporter.report(Event::StepFailed {
                step: format!("create {}", path.display()),
                error: e.to_string(),
            });
        }
    }
}

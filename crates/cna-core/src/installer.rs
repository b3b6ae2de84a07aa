//! Dependency installation stage.

use std::path::Path;
use tracing::{info, warn};

use crate::config::ScaffoldConfig;
use crate::process::{run_captured, CommandRunner, Invocation};
use crate::reporter::{Event, Reporter};

/// Add the configured dependencies to the project at `project_dir`.
///
/// Returns `false` when the package manager fails, after echoing its stderr.
pub async fn install_dependencies(
    runner: &dyn CommandRunner,
    config: &ScaffoldConfig,
    project_dir: &Path,
    reporter: &dyn Reporter,
) -> bool {
    reporter.report(Event::InstallingDependencies);

    let invocation = Invocation::from_spec(&config.package_manager, project_dir)
        .args(config.dependencies.iter().cloned());

    info!(
        command = %invocation.display(),
        count = config.dependencies.len(),
        "Installing dependencies"
    );
    let output = run_captured(runner, &invocation).await;

    if !output.success() {
        warn!(code = ?output.code, "Dependency installation failed");
        reporter.report(Event::ProcessFailed {
            program: config.package_manager.program.clone(),
            stderr: output.stderr,
        });
        return false;
    }

    true
}

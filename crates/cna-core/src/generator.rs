//! Project generation stage.

use std::path::Path;
use tracing::{info, warn};

use crate::config::ScaffoldConfig;
use crate::process::{run_captured, CommandRunner, Invocation};
use crate::reporter::{Event, Reporter};

/// Name printed in the usage hint.
pub const BIN_NAME: &str = "create-next-apollo-app";

/// Return the project name if one was actually supplied.
pub fn project_name(arg: Option<&str>) -> Option<&str> {
    arg.filter(|name| !name.is_empty())
}

/// Run the project generator for `name` inside `base_dir`.
///
/// Returns `false` without running anything when no name was given. A
/// generator that exits non-zero has its stderr echoed; the stage still
/// counts as successful unless `config.strict` is set.
pub async fn generate(
    runner: &dyn CommandRunner,
    config: &ScaffoldConfig,
    base_dir: &Path,
    name: Option<&str>,
    reporter: &dyn Reporter,
) -> bool {
    let Some(name) = project_name(name) else {
        reporter.report(Event::MissingProjectName {
            usage: BIN_NAME.to_string(),
        });
        return false;
    };

    reporter.report(Event::InstallingPackages);

    // The project name goes before the generator's own flags.
    let invocation = Invocation::new(&config.generator.program, base_dir)
        .arg(name)
        .args(config.generator.args.iter().cloned());

    info!(command = %invocation.display(), "Generating project");
    let output = run_captured(runner, &invocation).await;

    if !output.success() {
        warn!(code = ?output.code, "Project generator failed");
        reporter.report(Event::ProcessFailed {
            program: config.generator.program.clone(),
            stderr: output.stderr.clone(),
        });
        if config.strict {
            return false;
        }
    }

    reporter.report(Event::GeneratorFinished);
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_name_filters_empty() {
        assert_eq!(project_name(None), None);
        assert_eq!(project_name(Some("")), None);
        assert_eq!(project_name(Some("shop")), Some("shop"));
    }
}

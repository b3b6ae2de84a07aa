//! Moves the process into the generated project.

use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::reporter::{Event, Reporter};

/// Absolute path of the project directory.
pub fn target_dir(base_dir: &Path, name: &str) -> PathBuf {
    base_dir.join(name)
}

/// Change the process working directory to `<base_dir>/<name>` and return
/// that path.
///
/// Later stages only use the returned absolute path, so a failed `chdir`
/// is reported and otherwise ignored.
pub fn enter_project(base_dir: &Path, name: &str, reporter: &dyn Reporter) -> PathBuf {
    let target = target_dir(base_dir, name);

    match std::env::set_current_dir(&target) {
        Ok(()) => debug!(path = %target.display(), "Entered project directory"),
        Err(e) => {
            warn!(path = %target.display(), error = %e, "Could not enter project directory");
            reporter.report(Event::NavigationFailed {
                path: target.clone(),
                error: e.to_string(),
            });
        }
    }

    target
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporter::MemoryReporter;

    #[test]
    fn test_target_dir_joins_name() {
        assert_eq!(
            target_dir(Path::new("/home/dev"), "shop"),
            PathBuf::from("/home/dev/shop")
        );
    }

    #[test]
    fn test_missing_directory_is_reported() {
        let base = tempfile::tempdir().unwrap();
        let reporter = MemoryReporter::new();

        let target = enter_project(base.path(), "not-generated", &reporter);

        assert_eq!(target, base.path().join("not-generated"));
        assert!(matches!(
            reporter.events().as_slice(),
            [Event::NavigationFailed { .. }]
        ));
    }
}

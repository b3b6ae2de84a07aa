//! External process invocation.
//!
//! Every stage that shells out goes through [`CommandRunner`], so the
//! pipeline can be driven against a fake in tests.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

use crate::config::CommandSpec;
use crate::error::{CnaError, CnaResult};

/// A fully resolved command line plus the directory to run it in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: PathBuf,
}

impl Invocation {
    pub fn new(program: impl Into<String>, cwd: &Path) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: cwd.to_path_buf(),
        }
    }

    /// Start from a configured command, keeping its fixed arguments.
    pub fn from_spec(spec: &CommandSpec, cwd: &Path) -> Self {
        Self {
            program: spec.program.clone(),
            args: spec.args.clone(),
            cwd: cwd.to_path_buf(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Render the command line for logs.
    pub fn display(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Captured result of a finished process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code; `None` when the process was killed by a signal.
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Runs external commands with their output captured.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run to completion. `Err` only when the process could not be started.
    async fn run(&self, invocation: &Invocation) -> CnaResult<CommandOutput>;
}

/// Runs commands on the host with stdout and stderr captured, so nothing
/// reaches the terminal unless the caller echoes it.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

#[async_trait]
impl CommandRunner for SystemRunner {
    async fn run(&self, invocation: &Invocation) -> CnaResult<CommandOutput> {
        debug!(
            command = %invocation.display(),
            cwd = %invocation.cwd.display(),
            "Running external command"
        );

        let output = Command::new(&invocation.program)
            .args(&invocation.args)
            .current_dir(&invocation.cwd)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| CnaError::spawn(&invocation.program, e))?;

        let result = CommandOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        };

        debug!(
            command = %invocation.program,
            code = ?result.code,
            "External command finished"
        );

        Ok(result)
    }
}

/// Run an invocation and fold a launch failure into a failed output, so
/// callers can treat "not installed" like any other non-zero exit.
pub async fn run_captured(runner: &dyn CommandRunner, invocation: &Invocation) -> CommandOutput {
    match runner.run(invocation).await {
        Ok(output) => output,
        Err(e) => CommandOutput {
            code: None,
            stdout: String::new(),
            stderr: e.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invocation_builder() {
        let spec = CommandSpec::new("npm", &["install", "--save"]);
        let inv = Invocation::from_spec(&spec, Path::new("/tmp/app")).args(["next", "graphql"]);
        assert_eq!(inv.display(), "npm install --save next graphql");
        assert_eq!(inv.cwd, PathBuf::from("/tmp/app"));
    }

    #[test]
    fn test_output_success() {
        let ok = CommandOutput { code: Some(0), ..Default::default() };
        let failed = CommandOutput { code: Some(1), ..Default::default() };
        let killed = CommandOutput { code: None, ..Default::default() };
        assert!(ok.success());
        assert!(!failed.success());
        assert!(!killed.success());
    }

    #[tokio::test]
    async fn test_missing_program_folds_into_failure() {
        let dir = tempfile::tempdir().unwrap();
        let inv = Invocation::new("cna-definitely-not-installed-binary", dir.path());
        let output = run_captured(&SystemRunner, &inv).await;
        assert!(!output.success());
        assert!(output.stderr.contains("cna-definitely-not-installed-binary"));
    }
}

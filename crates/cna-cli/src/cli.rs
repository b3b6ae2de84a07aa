//! Command line definition and dispatch.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;

use cna_core::{Pipeline, ScaffoldConfig};

use crate::output::ConsoleReporter;

/// Create a Next.js + Apollo app on top of create-react-app
#[derive(Parser, Debug)]
#[command(name = "create-next-apollo-app")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Name of the app directory to create
    pub project_name: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// TOML file overriding the generator, package manager, dependencies or scripts
    #[arg(short, long, env = "CNA_CONFIG")]
    pub config: Option<PathBuf>,

    /// Stop and exit non-zero when create-react-app or npm fails
    #[arg(long)]
    pub strict: bool,
}

impl Cli {
    /// Build the run configuration from defaults, the config file and flags.
    pub fn scaffold_config(&self) -> Result<ScaffoldConfig> {
        let mut config = match &self.config {
            Some(path) => ScaffoldConfig::load(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?,
            None => ScaffoldConfig::default(),
        };

        if self.strict {
            config.strict = true;
        }

        Ok(config)
    }

    /// Run the pipeline and return the process exit code.
    pub async fn execute(self) -> Result<i32> {
        let config = self.scaffold_config()?;
        let base_dir = std::env::current_dir().context("Failed to read current directory")?;
        let strict = config.strict;
        tracing::debug!(base = %base_dir.display(), strict, "Starting scaffold");

        let pipeline = Pipeline::new(config).with_reporter(Arc::new(ConsoleReporter));
        let outcome = pipeline.run(&base_dir, self.project_name.as_deref()).await;

        Ok(outcome.exit_code(strict))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_project_name_is_optional() {
        let cli = Cli::try_parse_from(["create-next-apollo-app"]).unwrap();
        assert!(cli.project_name.is_none());
        assert!(!cli.strict);
    }

    #[test]
    fn test_flags() {
        let cli =
            Cli::try_parse_from(["create-next-apollo-app", "shop", "--strict", "-v"]).unwrap();
        assert_eq!(cli.project_name.as_deref(), Some("shop"));
        assert!(cli.strict);
        assert!(cli.verbose);
        assert!(cli.scaffold_config().unwrap().strict);
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        let cli = Cli::try_parse_from([
            "create-next-apollo-app",
            "shop",
            "--config",
            "/nonexistent/cna.toml",
        ])
        .unwrap();
        let err = cli.scaffold_config().unwrap_err();
        assert!(err.to_string().contains("/nonexistent/cna.toml"));
    }
}

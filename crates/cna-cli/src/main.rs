//! create-next-apollo-app
//!
//! Scaffolds a Next.js + Apollo application on top of create-react-app.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod output;

use cli::Cli;

/// Initialize tracing on stderr so stdout carries only the narration.
fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "create_next_apollo_app=debug,cna_core=debug"
    } else {
        "create_next_apollo_app=warn,cna_core=warn"
    };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let code = cli.execute().await?;
    if code != 0 {
        std::process::exit(code);
    }
    Ok(())
}

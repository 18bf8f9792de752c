//! stackgen CLI - preconfigured AWS CDK app scaffolding.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod output;

use commands::Cli;

/// Initialize tracing from `RUST_LOG`, defaulting to stackgen's own
/// events. Logs go to stderr so generated-file listings on stdout stay
/// clean.
fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "stackgen=debug,stackgen_core=debug,stackgen_codegen=debug"
    } else {
        "stackgen=info"
    };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    cli.execute()
}

//! CLI command definitions and handlers.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod new;
pub mod synth;

/// Stackgen - preconfigured AWS CDK application scaffolding
#[derive(Parser)]
#[command(name = "stackgen")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to the project directory (defaults to the current directory)
    #[arg(short, long, global = true)]
    pub project: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scaffold a new CDK app
    New(new::NewArgs),

    /// Regenerate the managed files of an existing project
    Synth(synth::SynthArgs),
}

impl Cli {
    pub fn execute(self) -> Result<()> {
        let project_dir = self
            .project
            .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));

        match self.command {
            Commands::New(args) => new::execute(args, &project_dir),
            Commands::Synth(args) => synth::execute(args, &project_dir),
        }
    }
}

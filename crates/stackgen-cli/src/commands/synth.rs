//! Regenerate the managed files of an existing project from
//! `stackgen.toml`.

use anyhow::Result;
use clap::Args;
use std::path::Path;

use stackgen_codegen::compose;
use stackgen_core::identity::SystemEnvironment;
use stackgen_core::options::{self, ScaffoldOptions};

use crate::output;

#[derive(Args)]
pub struct SynthArgs {
    /// Preview without writing files
    #[arg(long)]
    pub dry_run: bool,
}

pub fn execute(args: SynthArgs, project_dir: &Path) -> Result<()> {
    tracing::debug!(project_dir = %project_dir.display(), "regenerating managed files");
    let file = options::load_config(project_dir)?;
    let env = SystemEnvironment::new(project_dir);
    let project = compose::compose(ScaffoldOptions::default(), file, &env)?;

    if args.dry_run {
        output::print_regenerate_plan(&project);
        return Ok(());
    }

    let written = project.write(project_dir)?;
    output::print_written(&written);
    output::print_regenerated(&project, written.len());

    Ok(())
}

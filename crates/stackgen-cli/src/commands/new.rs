//! Project scaffolding command.

use anyhow::Result;
use clap::Args;
use std::path::{Path, PathBuf};

use stackgen_codegen::compose;
use stackgen_core::identity::SystemEnvironment;
use stackgen_core::options::{
    self, PackageManager, ScaffoldOptions, ServiceNameSource, WorkflowStyle,
};

use crate::output;

#[derive(Args)]
pub struct NewArgs {
    /// Project name (inferred from the git remote or directory when omitted)
    pub name: Option<String>,

    /// Target directory (defaults to ./<name>, or the project directory)
    #[arg(short, long)]
    pub directory: Option<PathBuf>,

    /// Release branch deployed to prod
    #[arg(long)]
    pub branch: Option<String>,

    /// Package manager for the generated project [npm, yarn, pnpm]
    #[arg(long)]
    pub package_manager: Option<PackageManager>,

    /// CDK framework version to pin
    #[arg(long)]
    pub cdk_version: Option<String>,

    /// Workflow shape to generate [staged-test, direct-deploy]
    #[arg(long)]
    pub workflow_style: Option<WorkflowStyle>,

    /// Entry-point service name strategy [literal, context-lookup]
    #[arg(long)]
    pub service_name_source: Option<ServiceNameSource>,

    /// Preview without writing files
    #[arg(long)]
    pub dry_run: bool,
}

pub fn execute(args: NewArgs, project_dir: &Path) -> Result<()> {
    let target_dir = match (&args.directory, &args.name) {
        (Some(dir), _) => dir.clone(),
        (None, Some(name)) => project_dir.join(name),
        (None, None) => project_dir.to_path_buf(),
    };
    tracing::debug!(target_dir = %target_dir.display(), "resolved scaffold target");

    let explicit = ScaffoldOptions {
        name: args.name,
        default_branch: args.branch,
        package_manager: args.package_manager,
        cdk_version: args.cdk_version,
        workflow_style: args.workflow_style,
        service_name_source: args.service_name_source,
        ..Default::default()
    };
    let file = options::load_config(&target_dir)?;
    let env = SystemEnvironment::new(target_dir.clone());
    let project = compose::compose(explicit, file, &env)?;

    if args.dry_run {
        output::print_scaffold_plan(&project, &target_dir);
        return Ok(());
    }

    output::print_scaffolding(&project);

    let written = project.write(&target_dir)?;
    tracing::debug!(count = written.len(), "scaffold write pass finished");
    output::print_written(&written);
    output::print_created(&project, &target_dir);

    Ok(())
}

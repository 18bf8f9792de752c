//! Option merging and defaulting.

pub mod model;

use std::path::Path;

pub use model::{
    PackageManager, ResolvedOptions, ScaffoldOptions, ServiceNameSource, WorkflowStyle,
};

use crate::error::StackgenResult;

/// Branch deployed to production when the caller does not pick one.
pub const DEFAULT_BRANCH: &str = "main";

/// Pinned CDK framework version for generated projects.
pub const DEFAULT_CDK_VERSION: &str = "2.156.0";

/// Name of the per-project configuration file.
pub const CONFIG_FILE: &str = "stackgen.toml";

/// Merge explicit options over config-file options over defaults,
/// field by field.
pub fn resolve(explicit: ScaffoldOptions, file: ScaffoldOptions) -> ResolvedOptions {
    fn pick<T>(explicit: Option<T>, file: Option<T>, default: T) -> T {
        explicit.or(file).unwrap_or(default)
    }

    ResolvedOptions {
        name: explicit.name.or(file.name),
        default_branch: pick(
            explicit.default_branch,
            file.default_branch,
            DEFAULT_BRANCH.to_string(),
        ),
        package_manager: pick(
            explicit.package_manager,
            file.package_manager,
            PackageManager::default(),
        ),
        cdk_version: pick(
            explicit.cdk_version,
            file.cdk_version,
            DEFAULT_CDK_VERSION.to_string(),
        ),
        workflow_style: pick(
            explicit.workflow_style,
            file.workflow_style,
            WorkflowStyle::default(),
        ),
        service_name_source: pick(
            explicit.service_name_source,
            file.service_name_source,
            ServiceNameSource::default(),
        ),
        stage_aware: pick(explicit.stage_aware, file.stage_aware, true),
        deps: pick(explicit.deps, file.deps, Vec::new()),
        dev_deps: pick(explicit.dev_deps, file.dev_deps, Vec::new()),
        context: pick(explicit.context, file.context, Default::default()),
    }
}

/// Load `stackgen.toml` from the project directory. A missing file is not
/// an error; it simply contributes nothing to the merge.
pub fn load_config(project_dir: &Path) -> StackgenResult<ScaffoldOptions> {
    let path = project_dir.join(CONFIG_FILE);
    if !path.exists() {
        return Ok(ScaffoldOptions::default());
    }
    let text = std::fs::read_to_string(&path)?;
    tracing::debug!(path = %path.display(), "loaded project configuration");
    Ok(toml::from_str(&text)?)
}

impl ResolvedOptions {
    /// Render the resolved configuration as `stackgen.toml` content, so a
    /// scaffolded project regenerates identically on later runs.
    pub fn to_config_toml(&self) -> StackgenResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

//! Scaffold option models.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Package manager used by the generated project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PackageManager {
    #[default]
    Npm,
    Yarn,
    Pnpm,
}

impl PackageManager {
    /// Install command executed by CI before anything else touches the
    /// project.
    pub fn ci_install_command(&self) -> &'static str {
        match self {
            Self::Npm => "npm ci",
            Self::Yarn => "yarn install --frozen-lockfile",
            Self::Pnpm => "pnpm install --frozen-lockfile",
        }
    }

    /// Shell command running a package script with extra arguments.
    pub fn run_script(&self, script: &str, args: &str) -> String {
        match (self, args.is_empty()) {
            (Self::Npm, true) => format!("npm run {script}"),
            (Self::Npm, false) => format!("npm run {script} -- {args}"),
            (Self::Yarn, true) => format!("yarn {script}"),
            (Self::Yarn, false) => format!("yarn {script} {args}"),
            (Self::Pnpm, true) => format!("pnpm run {script}"),
            (Self::Pnpm, false) => format!("pnpm run {script} {args}"),
        }
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Npm => "npm",
            Self::Yarn => "yarn",
            Self::Pnpm => "pnpm",
        };
        write!(f, "{name}")
    }
}

impl FromStr for PackageManager {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "npm" => Ok(Self::Npm),
            "yarn" => Ok(Self::Yarn),
            "pnpm" => Ok(Self::Pnpm),
            other => Err(format!(
                "unknown package manager '{other}' (expected npm, yarn or pnpm)"
            )),
        }
    }
}

/// Which CI/CD job-graph shape to generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WorkflowStyle {
    /// Ephemeral test stage with e2e tests gating both deploys.
    #[default]
    StagedTest,
    /// Dev and prod deploy directly on their trigger, with a bootstrap step.
    DirectDeploy,
}

impl FromStr for WorkflowStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "staged-test" => Ok(Self::StagedTest),
            "direct-deploy" => Ok(Self::DirectDeploy),
            other => Err(format!(
                "unknown workflow style '{other}' (expected staged-test or direct-deploy)"
            )),
        }
    }
}

/// How the generated entry point resolves its service name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ServiceNameSource {
    /// The inferred name baked in as a literal.
    #[default]
    Literal,
    /// A runtime context lookup with the inferred name as fallback.
    ContextLookup,
}

impl FromStr for ServiceNameSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "literal" => Ok(Self::Literal),
            "context-lookup" => Ok(Self::ContextLookup),
            other => Err(format!(
                "unknown service name source '{other}' (expected literal or context-lookup)"
            )),
        }
    }
}

/// Caller-supplied options, all optional. Unset fields fall back per the
/// precedence documented on [`ResolvedOptions`]. Also the on-disk shape of
/// `stackgen.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScaffoldOptions {
    pub name: Option<String>,
    pub default_branch: Option<String>,
    pub package_manager: Option<PackageManager>,
    pub cdk_version: Option<String>,
    pub workflow_style: Option<WorkflowStyle>,
    pub service_name_source: Option<ServiceNameSource>,
    pub stage_aware: Option<bool>,
    pub deps: Option<Vec<String>>,
    pub dev_deps: Option<Vec<String>>,
    pub context: Option<BTreeMap<String, String>>,
}

/// Fully merged configuration, owned by the composer for the duration of
/// one construction.
///
/// Precedence per field: explicit caller value > `stackgen.toml` > default.
///
/// | field                 | default       |
/// |-----------------------|---------------|
/// | `default_branch`      | `main`        |
/// | `package_manager`     | `npm`         |
/// | `cdk_version`         | `2.156.0`     |
/// | `workflow_style`      | `staged-test` |
/// | `service_name_source` | `literal`     |
/// | `stage_aware`         | `true`        |
/// | `deps` / `dev_deps`   | empty         |
/// | `context`             | empty         |
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedOptions {
    /// Explicit project name, if any; `None` engages the resolver's
    /// git-remote and working-directory fallbacks.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub default_branch: String,
    pub package_manager: PackageManager,
    pub cdk_version: String,
    pub workflow_style: WorkflowStyle,
    pub service_name_source: ServiceNameSource,
    pub stage_aware: bool,
    pub deps: Vec<String>,
    pub dev_deps: Vec<String>,
    pub context: BTreeMap<String, String>,
}

//! Name resolution: derive a project identity from explicit input, git
//! remote metadata, or the working directory.

pub mod model;

use std::path::PathBuf;
use std::process::{Command, Stdio};

pub use model::{pascal_case, ProjectIdentity};

use crate::error::StackgenResult;

/// Ambient inputs to name resolution, injected so resolution is
/// deterministic under test.
pub trait EnvironmentContext {
    /// Configured remote URL of the current repository, if any.
    ///
    /// `None` covers every failure mode: git not installed, no remote
    /// configured, non-zero exit, empty output.
    fn git_remote_url(&self) -> Option<String>;

    /// Directory whose basename acts as the last naming fallback.
    fn current_dir(&self) -> PathBuf;
}

/// Production environment: shells out to git and reads the project
/// directory from the filesystem.
pub struct SystemEnvironment {
    project_dir: PathBuf,
}

impl SystemEnvironment {
    pub fn new(project_dir: impl Into<PathBuf>) -> Self {
        Self {
            project_dir: project_dir.into(),
        }
    }
}

impl EnvironmentContext for SystemEnvironment {
    fn git_remote_url(&self) -> Option<String> {
        let output = Command::new("git")
            .args(["config", "--get", "remote.origin.url"])
            .current_dir(&self.project_dir)
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .output()
            .ok()?;
        if !output.status.success() {
            return None;
        }
        let url = String::from_utf8(output.stdout).ok()?.trim().to_string();
        if url.is_empty() {
            None
        } else {
            Some(url)
        }
    }

    fn current_dir(&self) -> PathBuf {
        self.project_dir
            .canonicalize()
            .unwrap_or_else(|_| self.project_dir.clone())
    }
}

/// Resolve the project identity.
///
/// Priority: explicit name, then the last path segment of the git remote
/// URL (`.git` suffix stripped), then the basename of the working
/// directory. Remote-lookup failures fall through silently; they are an
/// expected condition, not an error.
pub fn resolve(
    explicit: Option<&str>,
    env: &dyn EnvironmentContext,
) -> StackgenResult<ProjectIdentity> {
    if let Some(name) = explicit {
        return ProjectIdentity::from_raw(name);
    }

    if let Some(remote) = env.git_remote_url() {
        if let Some(name) = name_from_remote(&remote) {
            tracing::debug!(name = %name, "inferred project name from git remote");
            return ProjectIdentity::from_raw(name);
        }
    }

    let name = env
        .current_dir()
        .file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    tracing::debug!(name = %name, "inferred project name from working directory");
    ProjectIdentity::from_raw(name)
}

/// Last path segment of a remote URL with any `.git` suffix stripped.
///
/// URLs without a `/` (or with an empty last segment) produce no name,
/// matching the fallback chain rather than guessing.
fn name_from_remote(remote: &str) -> Option<String> {
    let trimmed = remote.trim().trim_end_matches('/');
    let (_, last) = trimmed.rsplit_once('/')?;
    let name = last.strip_suffix(".git").unwrap_or(last);
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

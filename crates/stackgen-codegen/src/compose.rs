//! Project composition: option resolution, identity resolution, and
//! artifact assembly.
//!
//! Composition is a one-shot, synchronous construction: options are
//! merged once, the identity derived once, and every artifact assembled
//! in memory before anything touches disk. There is no partial success;
//! an invalid configuration fails before the first write.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use stackgen_core::identity::{self, EnvironmentContext, ProjectIdentity};
use stackgen_core::options::{self, ResolvedOptions, ScaffoldOptions};

use crate::writer::GeneratedFile;
use crate::{entrypoint, package, stack_file, tooling, workflows};

/// A fully described project: identity, resolved options, and every
/// artifact, ready to be persisted.
#[derive(Debug)]
pub struct ComposedProject {
    pub identity: ProjectIdentity,
    pub options: ResolvedOptions,
    pub files: Vec<GeneratedFile>,
}

/// Merge options, resolve the identity, and assemble every artifact.
pub fn compose(
    explicit: ScaffoldOptions,
    file: ScaffoldOptions,
    env: &dyn EnvironmentContext,
) -> Result<ComposedProject> {
    let mut options = options::resolve(explicit, file);

    let identity = identity::resolve(options.name.as_deref(), env)
        .context("Failed to resolve a project name")?;
    tracing::info!(
        name = %identity.raw_name,
        class = %identity.class_name,
        "resolved project identity"
    );

    // Pin the resolved name so later regenerations skip the inference
    // chain, and seed the CDK context with the service name unless the
    // caller set one.
    options.name = Some(identity.raw_name.clone());
    options
        .context
        .entry("serviceName".to_string())
        .or_insert_with(|| identity.raw_name.clone());

    let files = vec![
        GeneratedFile::sample(options::CONFIG_FILE, options.to_config_toml()?),
        stack_file::stack_file(&identity, options.stage_aware),
        entrypoint::entrypoint(&identity, &options),
        workflows::workflow_file(&options)?,
        tooling::prettier_file()?,
        tooling::eslint_file()?,
        tooling::jest_file()?,
        package::package_json_file(&identity, &options)?,
        package::cdk_json_file(&options)?,
    ];

    Ok(ComposedProject {
        identity,
        options,
        files,
    })
}

impl ComposedProject {
    /// Persist every artifact under `project_dir`, honoring each file's
    /// overwrite policy. Returns the relative paths actually written.
    pub fn write(&self, project_dir: &Path) -> Result<Vec<PathBuf>> {
        let mut written = Vec::new();
        for file in &self.files {
            if file.write(project_dir)? {
                written.push(file.path.clone());
            }
        }
        tracing::info!(count = written.len(), "wrote project files");
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::writer::OverwritePolicy;

    struct FakeEnvironment {
        remote: Option<String>,
        dir: PathBuf,
    }

    impl EnvironmentContext for FakeEnvironment {
        fn git_remote_url(&self) -> Option<String> {
            self.remote.clone()
        }

        fn current_dir(&self) -> PathBuf {
            self.dir.clone()
        }
    }

    fn git_env() -> FakeEnvironment {
        FakeEnvironment {
            remote: Some("git@github.com:AlfGoto/projalf.git".into()),
            dir: PathBuf::from("/work/elsewhere"),
        }
    }

    fn compose_default() -> ComposedProject {
        compose(
            ScaffoldOptions::default(),
            ScaffoldOptions::default(),
            &git_env(),
        )
        .unwrap()
    }

    #[test]
    fn test_compose_produces_the_full_artifact_set() {
        let project = compose_default();
        let paths: Vec<&str> = project
            .files
            .iter()
            .map(|f| f.path.to_str().unwrap())
            .collect();
        assert_eq!(
            paths,
            vec![
                "stackgen.toml",
                "src/projalf.ts",
                "src/main.ts",
                ".github/workflows/ci-cd.yml",
                ".prettierrc.json",
                ".eslintrc.json",
                "jest.config.json",
                "package.json",
                "cdk.json",
            ]
        );
    }

    #[test]
    fn test_identity_comes_from_the_remote() {
        let project = compose_default();
        assert_eq!(project.identity.raw_name, "projalf");
        assert_eq!(project.identity.class_name, "Projalf");
        assert_eq!(project.options.name.as_deref(), Some("projalf"));
    }

    #[test]
    fn test_explicit_name_bypasses_the_environment() {
        let project = compose(
            ScaffoldOptions {
                name: Some("my cool api".into()),
                ..Default::default()
            },
            ScaffoldOptions::default(),
            &git_env(),
        )
        .unwrap();
        assert_eq!(project.identity.class_name, "MyCoolApi");
    }

    #[test]
    fn test_context_is_seeded_with_the_service_name() {
        let project = compose_default();
        assert_eq!(
            project.options.context.get("serviceName").map(String::as_str),
            Some("projalf")
        );
    }

    #[test]
    fn test_caller_pinned_context_survives() {
        let mut explicit = ScaffoldOptions::default();
        explicit.context = Some([("serviceName".to_string(), "pinned".to_string())].into());
        let project = compose(explicit, ScaffoldOptions::default(), &git_env()).unwrap();
        assert_eq!(
            project.options.context.get("serviceName").map(String::as_str),
            Some("pinned")
        );
    }

    #[test]
    fn test_overwrite_policies() {
        let project = compose_default();
        let policy = |path: &str| {
            project
                .files
                .iter()
                .find(|f| f.path.to_str() == Some(path))
                .unwrap()
                .policy
        };
        // Authoring starting points are never clobbered.
        assert_eq!(policy("stackgen.toml"), OverwritePolicy::SkipIfExists);
        assert_eq!(policy("src/projalf.ts"), OverwritePolicy::SkipIfExists);
        // Managed files always regenerate.
        assert_eq!(policy("src/main.ts"), OverwritePolicy::Replace);
        assert_eq!(
            policy(".github/workflows/ci-cd.yml"),
            OverwritePolicy::Replace
        );
    }

    #[test]
    fn test_invalid_name_fails_before_composition() {
        let result = compose(
            ScaffoldOptions {
                name: Some("---".into()),
                ..Default::default()
            },
            ScaffoldOptions::default(),
            &git_env(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_write_then_rewrite_preserves_samples() {
        let dir = tempfile::tempdir().unwrap();
        let project = compose_default();

        let written = project.write(dir.path()).unwrap();
        assert_eq!(written.len(), project.files.len());

        // Simulate hand-edits to a sample and a managed file.
        std::fs::write(dir.path().join("src/projalf.ts"), "my infra").unwrap();
        std::fs::write(dir.path().join("src/main.ts"), "stale entry").unwrap();

        let rewritten = project.write(dir.path()).unwrap();
        assert!(!rewritten.contains(&PathBuf::from("src/projalf.ts")));
        assert!(rewritten.contains(&PathBuf::from("src/main.ts")));

        let stub = std::fs::read_to_string(dir.path().join("src/projalf.ts")).unwrap();
        assert_eq!(stub, "my infra");
        let main = std::fs::read_to_string(dir.path().join("src/main.ts")).unwrap();
        assert!(main.contains("app.synth();"));
    }
}

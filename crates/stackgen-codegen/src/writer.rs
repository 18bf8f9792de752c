//! File persistence with per-file overwrite policies.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// How an existing file at the target path is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverwritePolicy {
    /// Sample file: written once as an authoring starting point, then left
    /// to the user.
    SkipIfExists,
    /// Managed file: removed and recreated so stale content never merges
    /// with the current template.
    Replace,
}

/// A generated artifact ready to be persisted.
#[derive(Debug, Clone)]
pub struct GeneratedFile {
    /// Path relative to the project root.
    pub path: PathBuf,
    pub contents: String,
    pub policy: OverwritePolicy,
}

impl GeneratedFile {
    pub fn sample(path: impl Into<PathBuf>, contents: String) -> Self {
        Self {
            path: path.into(),
            contents,
            policy: OverwritePolicy::SkipIfExists,
        }
    }

    pub fn managed(path: impl Into<PathBuf>, contents: String) -> Self {
        Self {
            path: path.into(),
            contents,
            policy: OverwritePolicy::Replace,
        }
    }

    /// Write the file under `project_dir`, honoring the overwrite policy.
    ///
    /// Returns `true` when the file was written, `false` when an existing
    /// sample file was left untouched.
    pub fn write(&self, project_dir: &Path) -> Result<bool> {
        let target = project_dir.join(&self.path);

        match self.policy {
            OverwritePolicy::SkipIfExists if target.exists() => {
                tracing::debug!(path = %self.path.display(), "sample file exists, leaving as is");
                return Ok(false);
            }
            OverwritePolicy::Replace if target.exists() => {
                std::fs::remove_file(&target)
                    .with_context(|| format!("Failed to remove {}", target.display()))?;
            }
            _ => {}
        }

        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        std::fs::write(&target, &self.contents)
            .with_context(|| format!("Failed to write {}", target.display()))?;
        tracing::debug!(path = %self.path.display(), "wrote file");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let file = GeneratedFile::managed("src/deep/main.ts", "content".into());
        assert!(file.write(dir.path()).unwrap());
        let written = std::fs::read_to_string(dir.path().join("src/deep/main.ts")).unwrap();
        assert_eq!(written, "content");
    }

    #[test]
    fn test_sample_file_is_not_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("stub.ts"), "edited by hand").unwrap();

        let file = GeneratedFile::sample("stub.ts", "fresh template".into());
        assert!(!file.write(dir.path()).unwrap());
        let kept = std::fs::read_to_string(dir.path().join("stub.ts")).unwrap();
        assert_eq!(kept, "edited by hand");
    }

    #[test]
    fn test_managed_file_is_replaced() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("main.ts"), "stale").unwrap();

        let file = GeneratedFile::managed("main.ts", "fresh".into());
        assert!(file.write(dir.path()).unwrap());
        let replaced = std::fs::read_to_string(dir.path().join("main.ts")).unwrap();
        assert_eq!(replaced, "fresh");
    }
}

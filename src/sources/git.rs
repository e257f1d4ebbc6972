//! @acp:module "Git Sources"
//! @acp:summary "HEAD commit lookup via the git binary or libgit2"
//! @acp:domain cli
//! @acp:layer service

use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{anyhow, bail, Context};
use serde::{Deserialize, Serialize};

use super::VersionControl;

/// Which implementation answers `-g`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GitBackend {
    /// Spawn `git rev-parse HEAD`
    #[default]
    Command,
    /// Open the repository in-process
    Libgit2,
}

impl GitBackend {
    /// Build the collaborator for this backend rooted at `dir`
    pub fn into_source(self, program: &str, dir: &Path) -> Box<dyn VersionControl> {
        match self {
            Self::Command => Box::new(GitCommand::new(dir).with_program(program)),
            Self::Libgit2 => Box::new(Git2Repository::new(dir)),
        }
    }
}

/// @acp:summary "Runs `git rev-parse HEAD` and captures stdout"
#[derive(Debug, Clone)]
pub struct GitCommand {
    program: String,
    dir: PathBuf,
}

impl GitCommand {
    pub const ARGS: [&'static str; 2] = ["rev-parse", "HEAD"];

    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            program: "git".to_string(),
            dir: dir.into(),
        }
    }

    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }
}

impl VersionControl for GitCommand {
    fn head(&self) -> anyhow::Result<String> {
        tracing::debug!(program = %self.program, dir = %self.dir.display(), "running git rev-parse HEAD");

        let output = Command::new(&self.program)
            .args(Self::ARGS)
            .current_dir(&self.dir)
            .output()
            .with_context(|| format!("failed to spawn {}", self.program))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            bail!("{} exited with {}: {}", self.program, output.status, stderr.trim());
        }

        let stdout = String::from_utf8(output.stdout).context("git output is not UTF-8")?;
        Ok(stdout.trim().to_string())
    }
}

/// @acp:summary "Resolves HEAD through libgit2 without a git binary"
#[derive(Debug, Clone)]
pub struct Git2Repository {
    dir: PathBuf,
}

impl Git2Repository {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl VersionControl for Git2Repository {
    fn head(&self) -> anyhow::Result<String> {
        let repo = git2::Repository::discover(&self.dir)
            .with_context(|| format!("no git repository at {}", self.dir.display()))?;
        let commit = repo
            .head()
            .and_then(|head| head.peel_to_commit())
            .map_err(|e| anyhow!("cannot resolve HEAD: {}", e.message()))?;
        Ok(commit.id().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_binary_fails() {
        let dir = tempfile::tempdir().unwrap();
        let git = GitCommand::new(dir.path()).with_program("versionly-no-such-git");
        assert!(git.head().is_err());
    }

    #[test]
    fn test_libgit2_outside_repository_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Git2Repository::new(dir.path()).head().is_err());
    }

    #[test]
    fn test_libgit2_reads_head_commit() {
        let dir = tempfile::tempdir().unwrap();
        let repo = git2::Repository::init(dir.path()).unwrap();
        let signature = git2::Signature::now("Versionly", "versionly@example.com").unwrap();
        let tree_id = repo.index().unwrap().write_tree().unwrap();
        let tree = repo.find_tree(tree_id).unwrap();
        let oid = repo
            .commit(Some("HEAD"), &signature, &signature, "initial", &tree, &[])
            .unwrap();

        let head = Git2Repository::new(dir.path()).head().unwrap();
        assert_eq!(head, oid.to_string());
        assert_eq!(head.len(), 40);
    }

    #[test]
    fn test_backend_deserializes_lowercase() {
        let backend: GitBackend = serde_json::from_str("\"libgit2\"").unwrap();
        assert_eq!(backend, GitBackend::Libgit2);
        assert_eq!(GitBackend::default(), GitBackend::Command);
    }
}

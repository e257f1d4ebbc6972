//! @acp:module "Sources"
//! @acp:summary "Read-only collaborators consulted by directives"
//! @acp:domain cli
//! @acp:layer service
//!
//! The interpreter never touches the process environment, the filesystem or
//! git directly. Each effect goes through one of these traits so the dispatch
//! logic can run against in-memory fakes.

pub mod clock;
pub mod env;
pub mod git;
pub mod manifest;

use std::path::Path;

use chrono::{DateTime, Utc};

pub use clock::{FixedClock, SystemClock};
pub use env::{MapEnvironment, ProcessEnvironment};
pub use git::{GitBackend, GitCommand, Git2Repository};
pub use manifest::{JsonManifestLoader, PackageManifest};

/// Named variable lookup used by `-e`
pub trait Environment {
    fn var(&self, name: &str) -> Option<String>;
}

/// HEAD commit lookup used by `-g`
pub trait VersionControl {
    fn head(&self) -> anyhow::Result<String>;
}

/// Package manifest reader used by `-p`
pub trait ManifestLoader {
    fn load(&self, path: &Path) -> anyhow::Result<PackageManifest>;
}

/// Wall-clock source used by `-d`
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

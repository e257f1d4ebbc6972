//! @acp:module "Manifest Sources"
//! @acp:summary "package.json loading for the -p directive"
//! @acp:domain cli
//! @acp:layer service

use std::path::Path;

use anyhow::Context;
use serde_json::Value;

use super::ManifestLoader;

/// Manifest read when no path is given
pub const DEFAULT_MANIFEST: &str = "package.json";

/// The parts of a package manifest versionly cares about
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageManifest {
    pub version: Option<String>,
}

impl PackageManifest {
    /// Extract the manifest from parsed JSON.
    ///
    /// A missing, empty or non-string `version` reads as no version.
    pub fn from_value(value: &Value) -> Self {
        let version = value
            .get("version")
            .and_then(Value::as_str)
            .filter(|v| !v.is_empty())
            .map(str::to_string);
        Self { version }
    }
}

/// Reads manifests as JSON from disk
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonManifestLoader;

impl ManifestLoader for JsonManifestLoader {
    fn load(&self, path: &Path) -> anyhow::Result<PackageManifest> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read {}", path.display()))?;
        let value: Value = serde_json::from_str(&content)
            .with_context(|| format!("cannot parse {}", path.display()))?;
        Ok(PackageManifest::from_value(&value))
    }
}

//! @acp:module "Configuration"
//! @acp:summary "Project configuration loading and defaults"
//! @acp:domain cli
//! @acp:layer config

use std::path::{Path, PathBuf};

use chrono::Locale;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::date::{parse_locale, DEFAULT_LOCALE};
use crate::generate::Generator;
use crate::output::OutputFormat;
use crate::sources::{Environment, GitBackend};

/// Config file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = ".versionly.json";

/// Variables consulted, in order, when no locale is configured
const LOCALE_VARS: [&str; 3] = ["LC_ALL", "LC_TIME", "LANG"];

/// @acp:summary "Main versionly configuration structure"
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Base directory for `-p` paths and git lookups
    #[serde(default = "default_root", skip_serializing_if = "is_default_root")]
    pub root: PathBuf,

    /// Directive list used when none is given on the command line.
    /// Kept loosely typed so a malformed list is reported as invalid input.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directives: Option<Value>,

    #[serde(default)]
    pub output: OutputConfig,

    /// Locale name for `-d locale*` formats, e.g. `de_DE`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,

    #[serde(default)]
    pub git: GitConfig,
}

fn default_root() -> PathBuf {
    PathBuf::from(".")
}

fn is_default_root(p: &Path) -> bool {
    p == Path::new(".")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root: default_root(),
            directives: None,
            output: OutputConfig::default(),
            locale: None,
            git: GitConfig::default(),
        }
    }
}

impl Config {
    /// @acp:summary "Load config from a .versionly.json file"
    pub fn load<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// @acp:summary "Save config to a file"
    pub fn save<P: AsRef<Path>>(&self, path: P) -> crate::Result<()> {
        let mut content = serde_json::to_string_pretty(self)?;
        content.push('\n');
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Starter config written by `versionly init`
    pub fn starter() -> Self {
        Self {
            directives: Some(serde_json::json!([
                "-p", "version",
                "-g", "commit",
                "-d", "built:iso",
            ])),
            output: OutputConfig {
                path: Some(PathBuf::from("version.json")),
                ..OutputConfig::default()
            },
            ..Self::default()
        }
    }

    /// Configured locale, then the locale environment variables, then en_US
    pub fn resolve_locale(&self, env: &dyn Environment) -> Locale {
        if let Some(name) = &self.locale {
            match parse_locale(name) {
                Some(locale) => return locale,
                None => tracing::warn!("Unknown locale in config: {}", name),
            }
        }

        LOCALE_VARS
            .iter()
            .filter_map(|var| env.var(var))
            .find_map(|value| parse_locale(&value))
            .unwrap_or(DEFAULT_LOCALE)
    }

    /// Root made absolute against the working directory
    pub fn root_dir(&self) -> PathBuf {
        std::path::absolute(&self.root).unwrap_or_else(|_| self.root.clone())
    }

    /// @acp:summary "Build a generator wired to the real sources"
    pub fn generator(&self, env: &dyn Environment) -> Generator {
        let root = self.root_dir();
        let vcs = self.git.backend.into_source(&self.git.command, &root);
        Generator::new()
            .with_boxed_version_control(vcs)
            .with_locale(self.resolve_locale(env))
            .with_root(root)
    }
}

/// @acp:summary "Where and how generated annotations are written"
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Output file; stdout when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,

    #[serde(default)]
    pub format: OutputFormat,

    /// Handlebars template used with the `template` format
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<PathBuf>,
}

/// @acp:summary "Git lookup settings for -g"
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitConfig {
    #[serde(default)]
    pub backend: GitBackend,

    /// git binary used by the `command` backend
    #[serde(default = "default_git_command")]
    pub command: String,
}

fn default_git_command() -> String {
    "git".to_string()
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            backend: GitBackend::default(),
            command: default_git_command(),
        }
    }
}

//! @acp:module "Directive Interpreter"
//! @acp:summary "Turns a directive list into a key/value annotation map"
//! @acp:domain cli
//! @acp:layer logic
//!
//! Directives are applied strictly left to right. The first failure aborts
//! the run and nothing is returned.

use std::collections::BTreeMap;
use std::path::PathBuf;

use chrono::{Local, Locale};
use serde_json::Value;

use crate::date::{DateFormat, DEFAULT_LOCALE};
use crate::directive::{args_from_value, pair_directives, Directive, DirectiveKind};
use crate::error::{Result, VersionlyError};
use crate::sources::manifest::DEFAULT_MANIFEST;
use crate::sources::{
    Clock, Environment, GitCommand, JsonManifestLoader, ManifestLoader, ProcessEnvironment,
    SystemClock, VersionControl,
};

/// Variable consulted by `-e` when the field has no value part
pub const NULL_VARIABLE: &str = "null";

/// Generated annotations, keyed by annotation name. `None` serializes as null.
pub type Annotations = BTreeMap<String, Option<String>>;

/// @acp:summary "Directive interpreter with injectable sources"
pub struct Generator {
    environment: Box<dyn Environment>,
    version_control: Box<dyn VersionControl>,
    manifests: Box<dyn ManifestLoader>,
    clock: Box<dyn Clock>,
    root: PathBuf,
    locale: Locale,
}

impl Default for Generator {
    fn default() -> Self {
        let root = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self {
            environment: Box::new(ProcessEnvironment),
            version_control: Box::new(GitCommand::new(&root)),
            manifests: Box::new(JsonManifestLoader),
            clock: Box::new(SystemClock),
            root,
            locale: DEFAULT_LOCALE,
        }
    }
}

impl Generator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_environment(mut self, environment: impl Environment + 'static) -> Self {
        self.environment = Box::new(environment);
        self
    }

    pub fn with_version_control(mut self, vcs: impl VersionControl + 'static) -> Self {
        self.version_control = Box::new(vcs);
        self
    }

    /// Same as [`Generator::with_version_control`] for an already boxed source
    pub fn with_boxed_version_control(mut self, vcs: Box<dyn VersionControl>) -> Self {
        self.version_control = vcs;
        self
    }

    pub fn with_manifest_loader(mut self, loader: impl ManifestLoader + 'static) -> Self {
        self.manifests = Box::new(loader);
        self
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Directory that relative `-p` paths resolve against.
    ///
    /// This does not move the version control source; build it for the same
    /// directory when that matters.
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    /// @acp:summary "Interpret a flat `type, field, type, field, ...` list"
    pub fn generate<S: AsRef<str>>(&self, args: &[S]) -> Result<Annotations> {
        let mut result = Annotations::new();
        for directive in pair_directives(args) {
            self.apply(&directive, &mut result)?;
        }
        Ok(result)
    }

    /// Interpret loosely typed input; anything but an array is rejected
    pub fn generate_value(&self, value: &Value) -> Result<Annotations> {
        let args = args_from_value(value)?;
        self.generate(&args)
    }

    fn apply(&self, directive: &Directive, result: &mut Annotations) -> Result<()> {
        let key = directive.validate_key()?;
        if result.contains_key(key) {
            return Err(VersionlyError::DuplicateKey(key.to_string()));
        }

        let kind = directive.kind()?;
        tracing::debug!(%kind, field = %directive.field.raw, "applying directive");

        let field = &directive.field;
        match kind {
            DirectiveKind::Annotation => {
                result.insert(field.key.clone(), field.value.clone());
            }
            DirectiveKind::Date => {
                let format = DateFormat::from_value(field.value.as_deref())?;
                let now = self.clock.now().with_timezone(&Local);
                result.insert(field.key.clone(), Some(format.render(&now, self.locale)));
            }
            DirectiveKind::Environment => {
                // A field without a value names the variable `null`.
                let name = field.value.as_deref().unwrap_or(NULL_VARIABLE);
                let value = self
                    .environment
                    .var(name)
                    .filter(|v| !v.is_empty())
                    .ok_or_else(|| VersionlyError::MissingEnvironmentVariable(name.to_string()))?;
                result.insert(field.key.clone(), Some(value));
            }
            DirectiveKind::Git => {
                let head = self
                    .version_control
                    .head()
                    .map_err(|e| VersionlyError::VersionControlUnavailable(e.into()))?;
                // -g keys on the whole field, colon and all.
                result.insert(field.raw.clone(), Some(head.trim().to_string()));
            }
            DirectiveKind::Package => {
                let path = self.manifest_path(field.non_empty_value().unwrap_or(DEFAULT_MANIFEST));
                let manifest = self.manifests.load(&path).map_err(|e| {
                    VersionlyError::ManifestLoadFailure {
                        path: path.clone(),
                        source: e.into(),
                    }
                })?;
                result.insert(field.key.clone(), manifest.version);
            }
        }

        Ok(())
    }

    fn manifest_path(&self, value: &str) -> PathBuf {
        let joined = self.root.join(value);
        std::path::absolute(&joined).unwrap_or(joined)
    }
}

/// Interpret `args` against the real environment, git and filesystem
pub fn generate<S: AsRef<str>>(args: &[S]) -> Result<Annotations> {
    Generator::default().generate(args)
}

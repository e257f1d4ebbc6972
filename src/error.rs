//! @acp:module "Errors"
//! @acp:summary "Error types for directive interpretation and output"
//! @acp:domain cli
//! @acp:layer model
//!
//! Every directive failure aborts the whole run, so there is a single error
//! enum and no partial results. [`VersionlyError::InvalidInput`] is kept apart
//! from the directive-level variants so callers can tell misuse from
//! processing failures.

use std::path::PathBuf;

use thiserror::Error;

/// Boxed error carried by collaborator failures
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// @acp:summary "All failures surfaced by the versionly library"
#[derive(Debug, Error)]
pub enum VersionlyError {
    /// The directive input was not a sequence
    #[error("options must be an array")]
    InvalidInput,

    /// A field had an empty key part
    #[error("Invalid entry: '{0}'")]
    MalformedEntry(String),

    /// The key was already produced by an earlier directive
    #[error("Duplicate entry: '{0}'")]
    DuplicateKey(String),

    #[error("Unexpected input: '{kind} {field}'")]
    UnsupportedDirectiveType { kind: String, field: String },

    #[error("Unexpected date format: '{0}'")]
    UnsupportedDateFormat(String),

    /// `-e` named a variable that is unset or empty
    #[error("Unknown environment variable: '{0}'")]
    MissingEnvironmentVariable(String),

    #[error("Cannot parse git history")]
    VersionControlUnavailable(#[source] BoxError),

    #[error("Cannot load package from: '{}'", path.display())]
    ManifestLoadFailure {
        path: PathBuf,
        #[source]
        source: BoxError,
    },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Template(#[from] Box<handlebars::RenderError>),

    #[error(transparent)]
    TemplateSyntax(#[from] Box<handlebars::TemplateError>),
}

impl VersionlyError {
    /// True when the caller handed in something that is not a directive list
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput)
    }

    /// True for failures raised while interpreting an individual directive
    pub fn is_directive_error(&self) -> bool {
        matches!(
            self,
            Self::MalformedEntry(_)
                | Self::DuplicateKey(_)
                | Self::UnsupportedDirectiveType { .. }
                | Self::UnsupportedDateFormat(_)
                | Self::MissingEnvironmentVariable(_)
                | Self::VersionControlUnavailable(_)
                | Self::ManifestLoadFailure { .. }
        )
    }
}

impl From<handlebars::RenderError> for VersionlyError {
    fn from(err: handlebars::RenderError) -> Self {
        Self::Template(Box::new(err))
    }
}

impl From<handlebars::TemplateError> for VersionlyError {
    fn from(err: handlebars::TemplateError) -> Self {
        Self::TemplateSyntax(Box::new(err))
    }
}

/// Result type for versionly operations
pub type Result<T> = std::result::Result<T, VersionlyError>;

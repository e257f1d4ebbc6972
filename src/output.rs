//! @acp:module "Output"
//! @acp:summary "Render annotations as JSON, YAML, env lines or a template"
//! @acp:domain cli
//! @acp:layer service

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use handlebars::Handlebars;
use serde::{Deserialize, Serialize};

use crate::error::{Result, VersionlyError};
use crate::generate::Annotations;

/// @acp:summary "Supported renderings of an annotation map"
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
    /// `key=value` lines
    Env,
    /// Handlebars template with the annotations as context
    Template,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            "env" | "dotenv" => Ok(Self::Env),
            "template" | "hbs" => Ok(Self::Template),
            _ => Err(format!("Unknown output format: {}", s)),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Json => "json",
            Self::Yaml => "yaml",
            Self::Env => "env",
            Self::Template => "template",
        };
        f.write_str(name)
    }
}

/// Render for the structured formats. Use [`render_template`] for templates.
pub fn render(annotations: &Annotations, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => {
            let mut out = serde_json::to_string_pretty(annotations)?;
            out.push('\n');
            Ok(out)
        }
        OutputFormat::Yaml => Ok(serde_yaml::to_string(annotations)?),
        OutputFormat::Env => Ok(render_env(annotations)),
        OutputFormat::Template => Err(VersionlyError::Config(
            "template output needs a template file".to_string(),
        )),
    }
}

fn render_env(annotations: &Annotations) -> String {
    annotations
        .iter()
        .map(|(key, value)| format!("{}={}\n", key, value.as_deref().unwrap_or("")))
        .collect()
}

/// Render `template` with each annotation available by key.
///
/// Strict mode: referencing a key that was not generated is an error.
pub fn render_template(annotations: &Annotations, template: &str) -> Result<String> {
    let mut registry = Handlebars::new();
    registry.set_strict_mode(true);
    registry.register_escape_fn(handlebars::no_escape);
    registry.register_template_string("output", template)?;
    Ok(registry.render("output", annotations)?)
}

/// Write rendered output, creating parent directories as needed
pub fn write_output(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, contents)?;
    tracing::info!(path = %path.display(), bytes = contents.len(), "wrote annotations");
    Ok(())
}

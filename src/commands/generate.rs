//! @acp:module "Generate Command"
//! @acp:summary "Interpret directives and write the annotation file"
//! @acp:domain cli
//! @acp:layer handler

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use console::style;

use crate::config::Config;
use crate::generate::Annotations;
use crate::output::{render, render_template, write_output, OutputFormat};
use crate::sources::ProcessEnvironment;

/// Options for the generate command
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    /// Flat directive list; falls back to the config when empty
    pub directives: Vec<String>,
    /// Output file (stdout when neither this nor the config sets one)
    pub output: Option<PathBuf>,
    pub format: Option<OutputFormat>,
    /// Handlebars template; implies the template format
    pub template: Option<PathBuf>,
    /// Overrides the configured root
    pub root: Option<PathBuf>,
}

/// Execute the generate command
pub fn execute_generate(options: GenerateOptions, config: Config) -> Result<()> {
    let output_path = options.output.clone().or_else(|| config.output.path.clone());
    let rendered = generate_output(&options, config)?;

    match output_path {
        Some(path) => {
            write_output(&path, &rendered)?;
            eprintln!("{} Annotations written to {}", style("✓").green(), path.display());
        }
        None => print!("{}", rendered),
    }

    Ok(())
}

/// Run the directives and render them, without touching the output target
pub fn generate_output(options: &GenerateOptions, mut config: Config) -> Result<String> {
    if let Some(root) = &options.root {
        config.root = root.clone();
    }

    let annotations = run_directives(options, &config)?;
    tracing::debug!(count = annotations.len(), "generated annotations");

    let template = options.template.clone().or_else(|| config.output.template.clone());
    let format = match (options.format, &options.template) {
        (Some(format), _) => format,
        (None, Some(_)) => OutputFormat::Template,
        (None, None) => config.output.format,
    };

    if format == OutputFormat::Template {
        let Some(path) = template else {
            bail!("The template format requires --template or output.template in the config");
        };
        let source = std::fs::read_to_string(&path)
            .with_context(|| format!("Cannot read template {}", path.display()))?;
        return Ok(render_template(&annotations, &source)?);
    }

    Ok(render(&annotations, format)?)
}

fn run_directives(options: &GenerateOptions, config: &Config) -> Result<Annotations> {
    let generator = config.generator(&ProcessEnvironment);

    if !options.directives.is_empty() {
        return Ok(generator.generate(&options.directives)?);
    }

    match &config.directives {
        Some(directives) => Ok(generator.generate_value(directives)?),
        None => bail!("No directives given on the command line or in the config"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(directives: &[&str]) -> GenerateOptions {
        GenerateOptions {
            directives: directives.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_command_line_directives_win() {
        let config = Config {
            directives: Some(serde_json::json!(["-a", "from:config"])),
            ..Config::default()
        };
        let out = generate_output(&options(&["-a", "from:cli"]), config).unwrap();
        assert_eq!(out, "{\n  \"from\": \"cli\"\n}\n");
    }

    #[test]
    fn test_config_directives_used_when_cli_empty() {
        let config = Config {
            directives: Some(serde_json::json!(["-a", "channel:beta"])),
            ..Config::default()
        };
        let out = generate_output(
            &GenerateOptions {
                format: Some(OutputFormat::Env),
                ..options(&[])
            },
            config,
        )
        .unwrap();
        assert_eq!(out, "channel=beta\n");
    }

    #[test]
    fn test_config_directives_must_be_array() {
        let config = Config {
            directives: Some(serde_json::json!({"-a": "x"})),
            ..Config::default()
        };
        let err = generate_output(&options(&[]), config).unwrap_err();
        assert_eq!(err.to_string(), "options must be an array");
    }

    #[test]
    fn test_no_directives_anywhere() {
        assert!(generate_output(&options(&[]), Config::default()).is_err());
    }

    #[test]
    fn test_template_flag_implies_template_format() {
        let dir = tempfile::tempdir().unwrap();
        let template = dir.path().join("version.rs.hbs");
        std::fs::write(&template, "pub const CHANNEL: &str = \"{{channel}}\";\n").unwrap();

        let out = generate_output(
            &GenerateOptions {
                template: Some(template),
                ..options(&["-a", "channel:beta"])
            },
            Config::default(),
        )
        .unwrap();
        assert_eq!(out, "pub const CHANNEL: &str = \"beta\";\n");
    }

    #[test]
    fn test_root_override_resolves_manifests() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("package.json"), r#"{"version": "4.5.6"}"#).unwrap();

        let out = generate_output(
            &GenerateOptions {
                root: Some(dir.path().to_path_buf()),
                format: Some(OutputFormat::Env),
                ..options(&["-p", "version"])
            },
            Config::default(),
        )
        .unwrap();
        assert_eq!(out, "version=4.5.6\n");
    }
}

#![forbid(unsafe_code)]
//! Versionly Command Line Interface

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use versionly::commands::{execute_generate, execute_init, GenerateOptions, InitOptions};
use versionly::config::DEFAULT_CONFIG_FILE;
use versionly::{Config, OutputFormat};

#[derive(Parser)]
#[command(name = "versionly")]
#[command(about = "Generate version annotations for build artifacts")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Interpret directives and write the annotations
    ///
    /// Directives are pairs such as `-a channel:beta -g commit -p version`.
    /// Put options before the first directive.
    Generate {
        /// Output file (default: stdout, or output.path from the config)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum)]
        format: Option<FormatArg>,

        /// Handlebars template to render (implies --format template)
        #[arg(short, long)]
        template: Option<PathBuf>,

        /// Directory for relative package paths and git lookups
        #[arg(short, long)]
        root: Option<PathBuf>,

        /// Directive list (-a, -d, -e, -g, -p followed by a field)
        #[arg(
            value_name = "DIRECTIVE",
            trailing_var_arg = true,
            allow_hyphen_values = true
        )]
        directives: Vec<String>,
    },

    /// Write a starter config file
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Json,
    Yaml,
    Env,
    Template,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    // Load config
    let config = if cli.config.exists() {
        Config::load(&cli.config)?
    } else {
        Config::default()
    };

    match cli.command {
        Commands::Generate { output, format, template, root, directives } => {
            let format = format.map(|f| match f {
                FormatArg::Json => OutputFormat::Json,
                FormatArg::Yaml => OutputFormat::Yaml,
                FormatArg::Env => OutputFormat::Env,
                FormatArg::Template => OutputFormat::Template,
            });

            let options = GenerateOptions {
                directives,
                output,
                format,
                template,
                root,
            };
            execute_generate(options, config)?;
        }

        Commands::Init { force } => {
            let options = InitOptions {
                path: cli.config,
                force,
            };
            execute_init(options)?;
        }
    }

    Ok(())
}

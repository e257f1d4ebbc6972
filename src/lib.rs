#![forbid(unsafe_code)]

//! @acp:module "Versionly Library"
//! @acp:summary "Build version annotations from typed directives"
//! @acp:domain cli
//! @acp:layer api
//! @acp:stability stable
//!
//! # Versionly
//!
//! Collects build metadata (timestamps, git commits, package versions,
//! environment values and literals) into a flat key/value map that can be
//! embedded in build artifacts.
//!
//! ## Directives
//!
//! | Tag  | Field              | Result                                  |
//! |------|--------------------|-----------------------------------------|
//! | `-a` | `key:value`        | the literal value                       |
//! | `-d` | `key[:format]`     | the current date (`now`, `iso`, `utc`...) |
//! | `-e` | `key:NAME`         | the value of environment variable NAME  |
//! | `-g` | `field`            | `git rev-parse HEAD`, keyed by the whole field |
//! | `-p` | `key[:path]`       | `version` from a package.json           |
//!
//! ## Example
//!
//! ```rust,no_run
//! use versionly::Generator;
//!
//! fn main() -> versionly::Result<()> {
//!     let annotations = Generator::new().generate(&[
//!         "-p", "version",
//!         "-g", "commit",
//!         "-d", "built:iso",
//!     ])?;
//!
//!     println!("{}", versionly::output::render(&annotations, Default::default())?);
//!     Ok(())
//! }
//! ```

pub mod commands;
pub mod config;
pub mod date;
pub mod directive;
pub mod error;
pub mod generate;
pub mod output;
pub mod sources;

// Re-exports
pub use config::Config;
pub use date::DateFormat;
pub use directive::{Directive, DirectiveKind, Field};
pub use error::{Result, VersionlyError};
pub use generate::{generate, Annotations, Generator};
pub use output::OutputFormat;
pub use sources::{Clock, Environment, ManifestLoader, PackageManifest, VersionControl};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

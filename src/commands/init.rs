//! @acp:module "Init Command"
//! @acp:summary "Write a starter .versionly.json"
//! @acp:domain cli
//! @acp:layer handler

use std::path::PathBuf;

use anyhow::{bail, Result};
use console::style;

use crate::config::Config;

/// Options for the init command
#[derive(Debug, Clone)]
pub struct InitOptions {
    /// Where to write the config
    pub path: PathBuf,
    /// Force overwrite existing config
    pub force: bool,
}

/// Execute the init command
pub fn execute_init(options: InitOptions) -> Result<()> {
    if options.path.exists() && !options.force {
        bail!(
            "{} already exists. Use --force to overwrite.",
            options.path.display()
        );
    }

    Config::starter().save(&options.path)?;
    println!("{} Created {}", style("✓").green(), options.path.display());
    println!("  Run 'versionly generate' to write version.json");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".versionly.json");
        std::fs::write(&path, "{}").unwrap();

        let options = InitOptions { path: path.clone(), force: false };
        assert!(execute_init(options).is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{}");

        execute_init(InitOptions { path: path.clone(), force: true }).unwrap();
        assert!(Config::load(&path).unwrap().directives.is_some());
    }
}

//! @acp:module "Environment Sources"
//! @acp:summary "Process and in-memory environment lookups"
//! @acp:domain cli
//! @acp:layer service

use std::collections::HashMap;

use super::Environment;

/// Reads the real process environment
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnvironment;

impl Environment for ProcessEnvironment {
    fn var(&self, name: &str) -> Option<String> {
        if name.is_empty() {
            return None;
        }
        std::env::var(name).ok()
    }
}

/// @acp:summary "Fixed set of variables, for tests and embedding"
#[derive(Debug, Clone, Default)]
pub struct MapEnvironment {
    vars: HashMap<String, String>,
}

impl MapEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }
}

impl Environment for MapEnvironment {
    fn var(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_environment_lookup() {
        let env = MapEnvironment::new().with("BUILD_ID", "42");
        assert_eq!(env.var("BUILD_ID").as_deref(), Some("42"));
        assert_eq!(env.var("MISSING"), None);
    }

    #[test]
    fn test_process_environment_reads_path() {
        let env = ProcessEnvironment;
        assert!(env.var("PATH").is_some());
        assert_eq!(env.var(""), None);
    }
}

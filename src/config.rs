//! Resolver configuration — defaults, TOML overrides, and validation.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::MapPortsError;

/// Runtime CLI used when no override is configured.
pub const DEFAULT_RUNTIME_COMMAND: &str = "docker";

/// Host names that already point at the local machine.
pub const DEFAULT_LOOPBACK_HOSTS: &[&str] = &["localhost", "127.0.0.1"];

/// Settings the port resolver runs with.
///
/// Built explicitly by the caller and handed to `PortResolver`, so nothing in
/// the resolver looks at the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverConfig {
    /// Directory holding one subdirectory per stack.
    pub stacks_dir: PathBuf,
    /// Executable queried for containers and port tables.
    pub runtime_command: String,
    /// Hosts left untouched because they are already local.
    pub loopback_hosts: Vec<String>,
}

impl ResolverConfig {
    /// Config rooted at an explicit stacks directory, with default runtime and
    /// loopback aliases.
    pub fn new(stacks_dir: impl Into<PathBuf>) -> Self {
        Self {
            stacks_dir: stacks_dir.into(),
            runtime_command: DEFAULT_RUNTIME_COMMAND.to_string(),
            loopback_hosts: DEFAULT_LOOPBACK_HOSTS
                .iter()
                .map(|h| h.to_string())
                .collect(),
        }
    }

    /// Config using the FireFly CLI's stack location: `<home>/.firefly/stacks`.
    pub fn for_home(home: &Path) -> Self {
        Self::new(home.join(".firefly").join("stacks"))
    }

    /// Apply overrides from a config file on top of this config.
    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(dir) = overrides.stacks_dir {
            self.stacks_dir = dir;
        }
        if let Some(command) = overrides.runtime_command {
            self.runtime_command = command;
        }
        self
    }

    /// Validate the config before any file is opened or command spawned.
    pub fn validate(&self) -> crate::Result<()> {
        if self.stacks_dir.as_os_str().is_empty() {
            return Err(MapPortsError::InvalidConfig(
                "stacks_dir must not be empty".to_string(),
            ));
        }
        if self.runtime_command.trim().is_empty() {
            return Err(MapPortsError::InvalidConfig(
                "runtime_command must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Optional overrides, parsed from TOML.
///
/// ```toml
/// stacks_dir = "/srv/firefly/stacks"
/// runtime_command = "podman"
/// ```
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ConfigOverrides {
    pub stacks_dir: Option<PathBuf>,
    pub runtime_command: Option<String>,
}

impl ConfigOverrides {
    /// Parse overrides from TOML text.
    pub fn from_toml_str(content: &str) -> crate::Result<Self> {
        toml::from_str(content).map_err(|e| MapPortsError::InvalidConfig(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_home_default_layout() {
        let config = ResolverConfig::for_home(Path::new("/home/dev"));
        assert_eq!(config.stacks_dir, PathBuf::from("/home/dev/.firefly/stacks"));
        assert_eq!(config.runtime_command, "docker");
        assert_eq!(config.loopback_hosts, vec!["localhost", "127.0.0.1"]);
    }

    #[test]
    fn test_empty_overrides_keep_defaults() {
        let overrides = ConfigOverrides::from_toml_str("# nothing here").unwrap();
        let config = ResolverConfig::new("/stacks").with_overrides(overrides);
        assert_eq!(config, ResolverConfig::new("/stacks"));
    }

    #[test]
    fn test_overrides_replace_fields() {
        let overrides = ConfigOverrides::from_toml_str(
            r#"
            stacks_dir = "/srv/stacks"
            runtime_command = "podman"
            "#,
        )
        .unwrap();
        let config = ResolverConfig::new("/stacks").with_overrides(overrides);
        assert_eq!(config.stacks_dir, PathBuf::from("/srv/stacks"));
        assert_eq!(config.runtime_command, "podman");
    }

    #[test]
    fn test_unknown_override_field_rejected() {
        let result = ConfigOverrides::from_toml_str(r#"runtime = "docker""#);
        assert!(matches!(result, Err(MapPortsError::InvalidConfig(_))));
    }

    #[test]
    fn test_invalid_toml_rejected() {
        let result = ConfigOverrides::from_toml_str("this is not valid toml {{");
        assert!(matches!(result, Err(MapPortsError::InvalidConfig(_))));
    }

    #[test]
    fn test_empty_runtime_command_invalid() {
        let mut config = ResolverConfig::new("/stacks");
        config.runtime_command = "  ".to_string();
        let result = config.validate();
        assert!(
            matches!(result, Err(MapPortsError::InvalidConfig(msg)) if msg.contains("runtime_command"))
        );
    }

    #[test]
    fn test_empty_stacks_dir_invalid() {
        let config = ResolverConfig::new("");
        let result = config.validate();
        assert!(
            matches!(result, Err(MapPortsError::InvalidConfig(msg)) if msg.contains("stacks_dir"))
        );
    }

    #[test]
    fn test_default_config_valid() {
        assert!(ResolverConfig::for_home(Path::new("/home/dev")).validate().is_ok());
    }
}

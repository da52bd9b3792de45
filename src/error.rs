//! Error types for port mapping operations.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for port mapping operations
#[derive(Error, Debug)]
pub enum MapPortsError {
    /// The stack's config file does not exist
    #[error("config file not found: {}", .0.display())]
    ConfigNotFound(PathBuf),

    /// The stack's config file exists but could not be read
    #[error("failed to read config file {}: {}", .0.display(), .1)]
    ConfigRead(PathBuf, #[source] std::io::Error),

    /// The container runtime command could not be started
    #[error("failed to run '{0}': {1}")]
    RuntimeSpawn(String, #[source] std::io::Error),

    /// A port table line did not have the `<port>/<proto> -> <addr>:<port>` shape
    #[error("malformed runtime output '{0}': {1}")]
    MalformedRuntimeOutput(String, String),

    /// Invalid resolver configuration
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// No home directory to derive the default stacks directory from
    #[error("unable to determine home directory")]
    HomeDirUnavailable,
}

/// Result type alias for port mapping operations
pub type Result<T> = std::result::Result<T, MapPortsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_display() {
        let err = MapPortsError::ConfigNotFound(PathBuf::from("/tmp/stacks/dev/configs/x.yml"));
        assert_eq!(
            err.to_string(),
            "config file not found: /tmp/stacks/dev/configs/x.yml"
        );
    }

    #[test]
    fn test_malformed_runtime_output_display() {
        let err = MapPortsError::MalformedRuntimeOutput(
            "garbage".to_string(),
            "missing ' -> ' separator".to_string(),
        );
        assert_eq!(
            err.to_string(),
            "malformed runtime output 'garbage': missing ' -> ' separator"
        );
    }

    #[test]
    fn test_config_read_display() {
        let err = MapPortsError::ConfigRead(
            PathBuf::from("/tmp/stacks/dev/configs/x.yml"),
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "permission denied"),
        );
        assert_eq!(
            err.to_string(),
            "failed to read config file /tmp/stacks/dev/configs/x.yml: permission denied"
        );
    }

    #[test]
    fn test_runtime_spawn_keeps_source() {
        use std::error::Error as _;

        let err = MapPortsError::RuntimeSpawn(
            "docker".to_string(),
            std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        );
        assert_eq!(err.to_string(), "failed to run 'docker': no such file");
        assert!(err.source().is_some());
    }
}

//! ff-map-ports — print a FireFly stack's core config with container
//! `host:port` references mapped to their published localhost ports.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use firefly_map_ports::{
    ConfigOverrides, DockerCli, MapPortsError, PortResolver, ResolverConfig, StackRef,
};
use tracing_subscriber::EnvFilter;

/// Read a FireFly config file and map internal Docker ports to the exposed
/// ports on localhost.
#[derive(Parser)]
#[command(name = "ff-map-ports")]
struct Cli {
    /// Name of a running FireFly CLI stack
    name: String,
    /// 0-based index of container in the stack
    #[arg(short, long, default_value_t = 0)]
    index: u32,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Stdout carries the rewritten config, so diagnostics go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = resolve_config().await?;
    config.validate()?;

    let runtime = DockerCli::new(config.runtime_command.clone());
    let resolver = PortResolver::new(config, runtime);
    let lines = resolver.resolve(&StackRef::new(cli.name, cli.index)).await?;

    let mut stdout = std::io::stdout().lock();
    for line in &lines {
        stdout.write_all(line.as_bytes())?;
    }
    stdout.flush()?;

    Ok(())
}

/// Defaults rooted at the home directory, plus overrides from
/// `<config_dir>/firefly-map-ports/config.toml` when that file exists.
async fn resolve_config() -> Result<ResolverConfig> {
    let home = dirs::home_dir().ok_or(MapPortsError::HomeDirUnavailable)?;
    let config = ResolverConfig::for_home(&home);

    let Some(overrides_path) = dirs::config_dir().map(|dir| overrides_file(&dir)) else {
        return Ok(config);
    };
    if !overrides_path.exists() {
        return Ok(config);
    }

    let overrides = load_overrides(&overrides_path).await?;
    tracing::debug!(path = %overrides_path.display(), "applied config overrides");
    Ok(config.with_overrides(overrides))
}

fn overrides_file(config_dir: &Path) -> PathBuf {
    config_dir.join("firefly-map-ports").join("config.toml")
}

async fn load_overrides(path: &Path) -> Result<ConfigOverrides> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read config file {:?}", path))?;
    let overrides = ConfigOverrides::from_toml_str(&content)
        .with_context(|| format!("Failed to parse config file {:?}", path))?;
    Ok(overrides)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults_index_zero() {
        let cli = Cli::try_parse_from(["ff-map-ports", "dev"]).unwrap();
        assert_eq!(cli.name, "dev");
        assert_eq!(cli.index, 0);
    }

    #[test]
    fn test_cli_index_flags() {
        let cli = Cli::try_parse_from(["ff-map-ports", "dev", "-i", "2"]).unwrap();
        assert_eq!(cli.index, 2);
        let cli = Cli::try_parse_from(["ff-map-ports", "--index", "1", "dev"]).unwrap();
        assert_eq!(cli.index, 1);
    }

    #[test]
    fn test_cli_requires_name() {
        assert!(Cli::try_parse_from(["ff-map-ports"]).is_err());
    }

    #[test]
    fn test_cli_rejects_negative_index() {
        assert!(Cli::try_parse_from(["ff-map-ports", "dev", "-i", "-1"]).is_err());
    }

    #[test]
    fn test_cli_has_no_version_flag() {
        assert!(Cli::try_parse_from(["ff-map-ports", "dev", "--version"]).is_err());
        assert!(Cli::try_parse_from(["ff-map-ports", "dev", "-V"]).is_err());
    }

    #[test]
    fn test_overrides_file_location() {
        assert_eq!(
            overrides_file(Path::new("/home/me/.config")),
            PathBuf::from("/home/me/.config/firefly-map-ports/config.toml")
        );
    }

    #[tokio::test]
    async fn test_load_overrides_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "runtime_command = \"podman\"\n").unwrap();

        let overrides = load_overrides(&path).await.unwrap();
        assert_eq!(overrides.runtime_command.as_deref(), Some("podman"));
        assert_eq!(overrides.stacks_dir, None);
    }
}

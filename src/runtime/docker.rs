//! `ContainerRuntime` backed by the docker CLI (or a compatible one).
//!
//! Commands are spawned with structured args, never through a shell, and
//! awaited to completion one at a time.

use std::process::Stdio;

use tokio::process::Command;

use crate::config::DEFAULT_RUNTIME_COMMAND;
use crate::error::MapPortsError;
use crate::parse::{PortMapping, parse_port_table};
use crate::runtime::ContainerRuntime;

/// Runs `docker ps` / `docker port` and parses their stdout.
#[derive(Debug, Clone)]
pub struct DockerCli {
    command: String,
}

impl DockerCli {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    /// Run the runtime with `args` and return its stdout.
    ///
    /// A non-zero exit is not an error: docker prints nothing useful on stdout
    /// in that case, which callers already treat as "not found".
    async fn run(&self, args: &[&str]) -> crate::Result<String> {
        let output = Command::new(&self.command)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| MapPortsError::RuntimeSpawn(self.command_line(args), e))?;

        if !output.status.success() {
            tracing::debug!(
                command = %self.command_line(args),
                exit_code = ?output.status.code(),
                stderr = %String::from_utf8_lossy(&output.stderr).trim_end(),
                "runtime command failed"
            );
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn command_line(&self, args: &[&str]) -> String {
        let mut line = self.command.clone();
        for arg in args {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }
}

impl Default for DockerCli {
    fn default() -> Self {
        Self::new(DEFAULT_RUNTIME_COMMAND)
    }
}

impl ContainerRuntime for DockerCli {
    async fn list_containers_by_name(&self, name: &str) -> crate::Result<Vec<String>> {
        let filter = format!("name={name}");
        let stdout = self
            .run(&["ps", "--filter", &filter, "--format", "{{.ID}}"])
            .await?;
        Ok(parse_container_ids(&stdout))
    }

    async fn get_port_mappings(&self, container_id: &str) -> crate::Result<Vec<PortMapping>> {
        let stdout = self.run(&["port", container_id]).await?;
        parse_port_table(&stdout)
    }
}

/// One container ID per line; surrounding whitespace and blank lines dropped.
fn parse_container_ids(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(String::from)
        .collect()
}

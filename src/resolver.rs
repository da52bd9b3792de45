//! Port resolver — rewrites container `host:port` tokens in a stack config to
//! the `localhost` port the runtime publishes for them.
//!
//! Resolution is best-effort: any lookup that comes back empty leaves the
//! line exactly as read. Read errors on the config file stop the run, as do
//! runtime failures that are not simply "nothing found".

use std::io::ErrorKind;

use crate::config::ResolverConfig;
use crate::error::MapPortsError;
use crate::parse::{find_host_port, is_loopback_host};
use crate::runtime::ContainerRuntime;
use crate::stack::StackRef;

/// Host written in place of a resolved container name.
const LOCAL_HOST: &str = "localhost";

/// Rewrites a stack config using port tables from a `ContainerRuntime`.
pub struct PortResolver<R> {
    config: ResolverConfig,
    runtime: R,
}

impl<R: ContainerRuntime> PortResolver<R> {
    pub fn new(config: ResolverConfig, runtime: R) -> Self {
        Self { config, runtime }
    }

    /// Read the stack's core config and return its lines, rewritten where a
    /// mapping was found.
    ///
    /// Lines keep their terminators, so concatenating the result reproduces
    /// the file with only the substituted tokens changed.
    pub async fn resolve(&self, stack: &StackRef) -> crate::Result<Vec<String>> {
        let path = stack.config_path(&self.config.stacks_dir);
        let content = tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => MapPortsError::ConfigNotFound(path.clone()),
                _ => MapPortsError::ConfigRead(path.clone(), e),
            })?;

        tracing::debug!(path = %path.display(), "read stack config");

        let mut lines = Vec::new();
        let mut rewritten = 0usize;
        for line in content.split_inclusive('\n') {
            let output = self.rewrite_line(line).await?;
            if output != line {
                rewritten += 1;
            }
            lines.push(output);
        }

        tracing::info!(
            stack = %stack.name,
            index = stack.index,
            lines = lines.len(),
            rewritten,
            "mapped stack config ports"
        );

        Ok(lines)
    }

    /// Rewrite the first `host:port` token of a single line, if it resolves.
    pub async fn rewrite_line(&self, line: &str) -> crate::Result<String> {
        let Some(token) = find_host_port(line) else {
            return Ok(line.to_string());
        };

        if is_loopback_host(&token.host, &self.config.loopback_hosts) {
            return Ok(line.to_string());
        }

        let container_ids = self.runtime.list_containers_by_name(&token.host).await?;
        let Some(container_id) = container_ids.first() else {
            tracing::debug!(host = %token.host, "no running container");
            return Ok(line.to_string());
        };

        let mappings = self.runtime.get_port_mappings(container_id).await?;
        let Some(mapping) = mappings.iter().find(|m| m.publishes(&token.port)) else {
            tracing::debug!(
                host = %token.host,
                container = %container_id,
                port = %token.port,
                "port not published"
            );
            return Ok(line.to_string());
        };

        tracing::debug!(
            host = %token.host,
            port = %token.port,
            external_port = mapping.external_port,
            "rewriting host:port"
        );

        Ok(format!(
            "{}{LOCAL_HOST}:{}{}",
            &line[..token.span.start],
            mapping.external_port,
            &line[token.span.end..]
        ))
    }
}

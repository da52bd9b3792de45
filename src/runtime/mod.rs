//! Container runtime queries.
//!
//! The resolver only needs two read-only questions answered: which running
//! container matches a name, and what its port table looks like. Both sit
//! behind `ContainerRuntime` so the resolver can run against a fake.

pub mod docker;

use std::future::Future;

use crate::parse::PortMapping;

pub use docker::DockerCli;

/// Read-only view of a container runtime.
pub trait ContainerRuntime {
    /// IDs of running containers whose name contains `name`, in runtime order.
    /// An empty list means no container matched.
    fn list_containers_by_name(
        &self,
        name: &str,
    ) -> impl Future<Output = crate::Result<Vec<String>>> + Send;

    /// The published port table of a container.
    fn get_port_mappings(
        &self,
        container_id: &str,
    ) -> impl Future<Output = crate::Result<Vec<PortMapping>>> + Send;
}

//! firefly-map-ports — rewrite container `host:port` references in a FireFly
//! stack's core config to the ports the container runtime publishes on
//! localhost, so the config can be used from the host machine.

pub mod config;
pub mod error;
pub mod parse;
pub mod resolver;
pub mod runtime;
pub mod stack;

pub use config::{ConfigOverrides, ResolverConfig};
pub use error::{MapPortsError, Result};
pub use parse::{
    HostPort, PortMapping, find_host_port, is_loopback_host, parse_port_mapping_line,
    parse_port_table,
};
pub use resolver::PortResolver;
pub use runtime::{ContainerRuntime, DockerCli};
pub use stack::StackRef;

//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into the server. Request
//! handling never reads process-wide environment variables.

use crate::{CoreError, CoreResult};
use std::net::{Ipv4Addr, SocketAddr};

/// Port used when `PORT` is unset or blank.
pub const DEFAULT_PORT: u16 = 3000;

/// Core configuration resolved at startup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CoreConfig {
    port: u16,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self { port: DEFAULT_PORT }
    }
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    pub fn new(port: u16) -> Self {
        Self { port }
    }

    /// Build the configuration from a raw `PORT` value, see [`port_from_env_value`].
    pub fn from_env_value(value: Option<String>) -> CoreResult<Self> {
        Ok(Self::new(port_from_env_value(value)?))
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Address the server binds to: all IPv4 interfaces on the configured port.
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::from((Ipv4Addr::UNSPECIFIED, self.port))
    }
}

/// Parse the listening port from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns [`DEFAULT_PORT`].
pub fn port_from_env_value(value: Option<String>) -> CoreResult<u16> {
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());

    match value {
        None => Ok(DEFAULT_PORT),
        Some(v) => v.parse::<u16>().map_err(|e| {
            CoreError::InvalidConfig(format!("PORT '{}' is not a valid port: {}", v, e))
        }),
    }
}

//! Listen address for the `vlog-mock` binary.
//!
//! The mock listens on port 5001 unless the `PORT` environment variable says
//! otherwise. Only the binary reads the environment; the library types take
//! their configuration as arguments.

use std::net::{Ipv4Addr, SocketAddr};
use std::num::ParseIntError;

/// Port the mock listens on by default.
pub const DEFAULT_PORT: u16 = 5001;

/// Environment variable overriding [`DEFAULT_PORT`].
pub const PORT_ENV: &str = "PORT";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid PORT value {value:?}: {source}")]
    InvalidPort {
        value: String,
        #[source]
        source: ParseIntError,
    },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    pub addr: SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from((Ipv4Addr::UNSPECIFIED, DEFAULT_PORT)),
        }
    }
}

impl ServerConfig {
    /// Build the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_port(std::env::var(PORT_ENV).ok().as_deref())
    }

    fn from_port(port: Option<&str>) -> Result<Self, ConfigError> {
        let Some(value) = port.map(str::trim).filter(|v| !v.is_empty()) else {
            return Ok(Self::default());
        };

        let port = value.parse::<u16>().map_err(|source| ConfigError::InvalidPort {
            value: value.to_string(),
            source,
        })?;

        Ok(Self {
            addr: SocketAddr::from((Ipv4Addr::UNSPECIFIED, port)),
        })
    }
}

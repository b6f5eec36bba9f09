//! Listen address configuration

use std::net::{IpAddr, SocketAddr};

use crate::error::{Result, ServerError};

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl ServerConfig {
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Reads `PORT` and `PROMPTTUNE_HOST`; unparsable values keep the defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(port) = std::env::var("PORT") {
            if let Ok(val) = port.parse::<u16>() {
                config.port = val;
            }
        }

        if let Ok(host) = std::env::var("PROMPTTUNE_HOST") {
            config.host = host;
        }

        config
    }

    pub fn socket_addr(&self) -> Result<SocketAddr> {
        let ip = if self.host == "localhost" {
            IpAddr::from([127, 0, 0, 1])
        } else {
            self.host
                .parse::<IpAddr>()
                .map_err(|_| ServerError::InvalidAddress(self.host.clone()))?
        };
        Ok(SocketAddr::new(ip, self.port))
    }
}

//! Configuration for logging and trace export

use serde::{Deserialize, Serialize};

const DEFAULT_SERVICE_NAME: &str = "prompttune";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Service name attached to exported spans (e.g. "prompttune-server")
    #[serde(default = "default_service_name")]
    pub service_name: String,

    pub service_version: Option<String>,

    /// OTLP gRPC endpoint, e.g. "http://localhost:4317". No export when `None`.
    pub otlp_endpoint: Option<String>,

    /// Write formatted events to stderr
    #[serde(default = "default_console")]
    pub enable_console: bool,

    /// `EnvFilter` directive; "info" when unset
    pub log_level: Option<String>,
}

fn default_service_name() -> String {
    DEFAULT_SERVICE_NAME.to_string()
}

fn default_console() -> bool {
    true
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            service_name: default_service_name(),
            service_version: None,
            otlp_endpoint: None,
            enable_console: true,
            log_level: None,
        }
    }
}

impl ObservabilityConfig {
    pub fn new(service_name: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
            ..Default::default()
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.service_version = Some(version.into());
        self
    }

    pub fn with_otlp_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.otlp_endpoint = Some(endpoint.into());
        self
    }

    pub fn with_console(mut self, enable: bool) -> Self {
        self.enable_console = enable;
        self
    }

    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = Some(level.into());
        self
    }

    /// Build from environment variables
    ///
    /// Reads:
    /// - `OTEL_SERVICE_NAME` → service_name (keeps `service_name` argument otherwise)
    /// - `OTEL_EXPORTER_OTLP_ENDPOINT` → otlp_endpoint
    /// - `PROMPTTUNE_LOG` or `RUST_LOG` → log_level
    pub fn from_env(service_name: impl Into<String>) -> Self {
        let service_name = std::env::var("OTEL_SERVICE_NAME").unwrap_or_else(|_| service_name.into());

        // Only export when explicitly asked; otherwise console-only.
        let otlp_endpoint = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT").ok();

        let log_level = std::env::var("PROMPTTUNE_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .ok();

        Self {
            service_name,
            service_version: None,
            otlp_endpoint,
            enable_console: true,
            log_level,
        }
    }

    /// Filter directive that will be installed.
    pub fn filter_directive(&self) -> &str {
        self.log_level.as_deref().unwrap_or("info")
    }
}

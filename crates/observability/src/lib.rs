//! PromptTune observability: tracing setup shared by the CLI and the HTTP server.
//!
//! Console logging is always available; spans are additionally exported over
//! OTLP when an endpoint is configured.
//!
//! ```no_run
//! use prompttune_observability::{init, ObservabilityConfig};
//!
//! let config = ObservabilityConfig::new("prompttune-server").with_log_level("debug");
//! init(config)?;
//! tracing::info!("server starting");
//! # Ok::<(), prompttune_observability::ObservabilityError>(())
//! ```
//!
//! # Environment Variables
//!
//! - `OTEL_SERVICE_NAME` - Service name
//! - `OTEL_EXPORTER_OTLP_ENDPOINT` - OTLP endpoint (export disabled when unset)
//! - `PROMPTTUNE_LOG` or `RUST_LOG` - Log level filter

pub mod config;
pub mod error;
pub mod telemetry;
pub mod tracing;

pub use config::ObservabilityConfig;
pub use error::ObservabilityError;
pub use telemetry::{init, shutdown};
pub use crate::tracing::{record_duration, record_error};

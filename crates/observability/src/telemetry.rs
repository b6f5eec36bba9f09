//! Subscriber installation with optional OTLP span export (OpenTelemetry 0.31).

use once_cell::sync::OnceCell;
use opentelemetry::{global, trace::TracerProvider, KeyValue};
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::trace::SdkTracerProvider;
use opentelemetry_sdk::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

use crate::config::ObservabilityConfig;
use crate::error::{ObservabilityError, Result};

static TRACER_PROVIDER: OnceCell<SdkTracerProvider> = OnceCell::new();

/// Install the global subscriber.
///
/// An unreachable or invalid OTLP endpoint degrades to console-only logging
/// instead of failing startup.
pub fn init(config: ObservabilityConfig) -> Result<()> {
    let env_filter = EnvFilter::try_new(config.filter_directive())
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = config
        .enable_console
        .then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    let mut export_error = None;
    let otel_layer = match &config.otlp_endpoint {
        Some(endpoint) => match build_otlp_tracer_provider(&config, endpoint) {
            Ok((tracer, provider)) => {
                global::set_tracer_provider(provider.clone());
                let _ = TRACER_PROVIDER.set(provider);
                Some(OpenTelemetryLayer::new(tracer))
            }
            Err(e) => {
                export_error = Some(e);
                None
            }
        },
        None => None,
    };

    Registry::default()
        .with(env_filter)
        .with(fmt_layer)
        .with(otel_layer)
        .try_init()
        .map_err(|e| ObservabilityError::AlreadyInitialized(e.to_string()))?;

    match (&config.otlp_endpoint, export_error) {
        (Some(endpoint), None) => tracing::info!(
            service.name = %config.service_name,
            otlp.endpoint = %endpoint,
            "OTLP tracing enabled"
        ),
        (Some(endpoint), Some(e)) => tracing::warn!(
            service.name = %config.service_name,
            endpoint = %endpoint,
            error = %e,
            "Failed to initialize OTLP export, falling back to console-only tracing"
        ),
        (None, _) => tracing::debug!(
            service.name = %config.service_name,
            "Tracing initialized (console only)"
        ),
    }

    Ok(())
}

fn build_otlp_tracer_provider(
    config: &ObservabilityConfig,
    endpoint: &str,
) -> Result<(opentelemetry_sdk::trace::SdkTracer, SdkTracerProvider)> {
    let mut attributes = vec![KeyValue::new("service.name", config.service_name.clone())];
    if let Some(version) = &config.service_version {
        attributes.push(KeyValue::new("service.version", version.clone()));
    }
    let resource = Resource::builder().with_attributes(attributes).build();

    let span_exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(endpoint.to_string())
        .build()
        .map_err(|e| ObservabilityError::Exporter(e.to_string()))?;

    let provider = SdkTracerProvider::builder()
        .with_batch_exporter(span_exporter)
        .with_resource(resource)
        .build();

    let tracer = provider.tracer(config.service_name.clone());

    Ok((tracer, provider))
}

/// Flush and stop the OTLP exporter, if one was installed.
pub fn shutdown() {
    if let Some(provider) = TRACER_PROVIDER.get() {
        let _ = provider.shutdown();
        tracing::debug!("OpenTelemetry tracer provider shut down");
    }
}

//! Telemetry lifecycle management.

use opentelemetry_sdk::trace::SdkTracerProvider;
use tracing::error;

use crate::config::ServerConfig;

use super::{ObservabilityError, logging, otel, settings};

/// Runtime observability state.
#[derive(Debug)]
pub(crate) struct Observability {
    tracer_provider: Option<SdkTracerProvider>,
}

impl Observability {
    /// Initialize structured logging and optional OpenTelemetry export.
    pub(crate) fn init(config: &ServerConfig) -> Result<Self, ObservabilityError> {
        settings::apply_runtime_config(config);

        let tracer_provider = config
            .observability
            .otel_enabled
            .then(|| otel::build_tracer_provider(config))
            .transpose()?;

        logging::init_subscriber(config, tracer_provider.as_ref())?;

        Ok(Self { tracer_provider })
    }

    /// Flush and shutdown telemetry pipelines.
    pub(crate) fn shutdown(self) {
        let Some(provider) = self.tracer_provider else {
            return;
        };

        if let Err(source) = provider.shutdown() {
            error!("failed to shutdown tracer provider: {source}");
        }
    }
}

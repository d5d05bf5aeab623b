//! Prometheus registry, HTTP metrics and the `/metrics` exposition handler.

use std::sync::OnceLock;

use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounterVec, IntGauge, Opts, Registry, TextEncoder,
    core::Collector,
};
use salvo::{
    Request, Response, handler,
    http::{
        StatusCode,
        header::{CONTENT_TYPE, HeaderValue},
    },
};
use tracing::error;

const LATENCY_BUCKETS: [f64; 13] = [
    0.001, 0.0025, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
];

#[derive(Debug)]
struct ApiMetrics {
    registry: Registry,
    requests_total: IntCounterVec,
    request_duration_seconds: HistogramVec,
    requests_in_flight: IntGauge,
    registration_submissions_total: IntCounterVec,
}

static API_METRICS: OnceLock<Option<ApiMetrics>> = OnceLock::new();

/// How a public registration form submission ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SubmissionOutcome {
    Recorded,
    Invalid,
    Failed,
}

impl SubmissionOutcome {
    fn as_label(self) -> &'static str {
        match self {
            Self::Recorded => "recorded",
            Self::Invalid => "invalid",
            Self::Failed => "failed",
        }
    }
}

#[derive(Debug)]
pub(super) struct InFlightRequestGuard {
    tracked: bool,
}

impl InFlightRequestGuard {
    pub(super) fn track() -> Self {
        let tracked = metrics().inspect(|m| m.requests_in_flight.inc()).is_some();

        Self { tracked }
    }
}

impl Drop for InFlightRequestGuard {
    fn drop(&mut self) {
        if self.tracked
            && let Some(metrics) = metrics()
        {
            metrics.requests_in_flight.dec();
        }
    }
}

pub(super) fn observe_request(method: &str, route: &str, status_code: u16, duration_seconds: f64) {
    let Some(metrics) = metrics() else {
        return;
    };

    let status_code_label = status_code.to_string();

    metrics
        .requests_total
        .with_label_values(&[method, route, status_class(status_code), &status_code_label])
        .inc();

    metrics
        .request_duration_seconds
        .with_label_values(&[method, route])
        .observe(duration_seconds);
}

/// Count one registration form submission.
pub(crate) fn record_registration_submission(outcome: SubmissionOutcome) {
    if let Some(metrics) = metrics() {
        metrics
            .registration_submissions_total
            .with_label_values(&[outcome.as_label()])
            .inc();
    }
}

#[handler]
pub(crate) async fn metrics_handler(_req: &mut Request, res: &mut Response) {
    let Some(metrics) = metrics() else {
        res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
        return;
    };

    let encoder = TextEncoder::new();
    let mut encoded = Vec::new();

    if let Err(source) = encoder.encode(&metrics.registry.gather(), &mut encoded) {
        error!("failed to encode metrics response: {source}");
        res.status_code(StatusCode::INTERNAL_SERVER_ERROR);

        return;
    }

    match HeaderValue::from_str(encoder.format_type()) {
        Ok(content_type) => {
            res.headers_mut().insert(CONTENT_TYPE, content_type);
            res.render(String::from_utf8_lossy(&encoded).into_owned());
        }
        Err(source) => {
            error!("failed to encode metrics content type header: {source}");
            res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
        }
    }
}

fn metrics() -> Option<&'static ApiMetrics> {
    API_METRICS
        .get_or_init(|| {
            build_metrics()
                .inspect_err(|source| error!("failed to build metrics registry: {source}"))
                .ok()
        })
        .as_ref()
}

fn register<C>(registry: &Registry, collector: C) -> prometheus::Result<C>
where
    C: Collector + Clone + 'static,
{
    registry.register(Box::new(collector.clone()))?;

    Ok(collector)
}

fn build_metrics() -> prometheus::Result<ApiMetrics> {
    let registry = Registry::new();

    let requests_total = register(
        &registry,
        IntCounterVec::new(
            Opts::new(
                "academy_json_http_requests_total",
                "HTTP requests by method, route, status class and status code.",
            ),
            &["method", "route", "status_class", "status_code"],
        )?,
    )?;

    let request_duration_seconds = register(
        &registry,
        HistogramVec::new(
            HistogramOpts::new(
                "academy_json_http_request_duration_seconds",
                "HTTP request duration in seconds by method and route.",
            )
            .buckets(LATENCY_BUCKETS.to_vec()),
            &["method", "route"],
        )?,
    )?;

    let requests_in_flight = register(
        &registry,
        IntGauge::with_opts(Opts::new(
            "academy_json_http_requests_in_flight",
            "HTTP requests currently being served.",
        ))?,
    )?;

    let registration_submissions_total = register(
        &registry,
        IntCounterVec::new(
            Opts::new(
                "academy_json_registration_submissions_total",
                "Public registration form submissions by outcome.",
            ),
            &["outcome"],
        )?,
    )?;

    Ok(ApiMetrics {
        registry,
        requests_total,
        request_duration_seconds,
        requests_in_flight,
        registration_submissions_total,
    })
}

fn status_class(status_code: u16) -> &'static str {
    match status_code {
        100..=199 => "1xx",
        200..=299 => "2xx",
        300..=399 => "3xx",
        400..=499 => "4xx",
        500..=599 => "5xx",
        _ => "other",
    }
}

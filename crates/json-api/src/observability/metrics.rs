//! Prometheus registry: HTTP traffic plus portal business counters.

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

const DURATION_BUCKETS: [f64; 13] = [
    0.001, 0.0025, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
];

#[derive(Debug)]
struct PortalMetrics {
    registry: Registry,
    requests_total: IntCounterVec,
    request_duration_seconds: HistogramVec,
    requests_in_flight: IntGauge,
    submission_groups_total: IntCounterVec,
    rebate_claims_total: IntCounterVec,
    cashback_claims_total: IntCounterVec,
}

static PORTAL_METRICS: OnceLock<Option<PortalMetrics>> = OnceLock::new();

/// Keeps the in-flight gauge raised for as long as it lives.
#[derive(Debug)]
pub(super) struct InFlightRequestGuard {
    tracked: bool,
}

impl InFlightRequestGuard {
    pub(super) fn track() -> Self {
        let tracked = metrics().is_some_and(|metrics| {
            metrics.requests_in_flight.inc();
            true
        });

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

    let code = status_code.to_string();

    metrics
        .requests_total
        .with_label_values(&[method, route, status_class(status_code), code.as_str()])
        .inc();

    metrics
        .request_duration_seconds
        .with_label_values(&[method, route])
        .observe(duration_seconds);
}

/// Count distributor groups written by one grouped submission.
pub(crate) fn record_submission_groups(kind: &str, groups: usize) {
    if let Some(metrics) = metrics() {
        metrics
            .submission_groups_total
            .with_label_values(&[kind])
            .inc_by(u64::try_from(groups).unwrap_or(u64::MAX));
    }
}

/// Count a filed rebate claim by tier.
pub(crate) fn record_rebate_claim(tier: i16) {
    if let Some(metrics) = metrics() {
        metrics
            .rebate_claims_total
            .with_label_values(&[tier.to_string().as_str()])
            .inc();
    }
}

/// Count a filed cashback claim by type.
pub(crate) fn record_cashback_claim(cashback_type: &str) {
    if let Some(metrics) = metrics() {
        metrics
            .cashback_claims_total
            .with_label_values(&[cashback_type])
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

fn metrics() -> Option<&'static PortalMetrics> {
    PORTAL_METRICS.get_or_init(build_metrics).as_ref()
}

fn register<M>(registry: &Registry, name: &str, metric: prometheus::Result<M>) -> Option<M>
where
    M: Collector + Clone + 'static,
{
    let metric = metric
        .inspect_err(|source| error!("failed to create {name} metric: {source}"))
        .ok()?;

    registry
        .register(Box::new(metric.clone()))
        .inspect_err(|source| error!("failed to register {name} metric: {source}"))
        .ok()?;

    Some(metric)
}

fn build_metrics() -> Option<PortalMetrics> {
    let registry = Registry::new();

    let requests_total = register(
        &registry,
        "requests_total",
        IntCounterVec::new(
            Opts::new(
                "portal_json_http_requests_total",
                "HTTP requests by method, route, status class and status code.",
            ),
            &["method", "route", "status_class", "status_code"],
        ),
    )?;

    let request_duration_seconds = register(
        &registry,
        "request_duration",
        HistogramVec::new(
            HistogramOpts::new(
                "portal_json_http_request_duration_seconds",
                "HTTP request duration in seconds by method and route.",
            )
            .buckets(DURATION_BUCKETS.to_vec()),
            &["method", "route"],
        ),
    )?;

    let requests_in_flight = register(
        &registry,
        "in_flight",
        IntGauge::with_opts(Opts::new(
            "portal_json_http_requests_in_flight",
            "HTTP requests currently being served.",
        )),
    )?;

    let submission_groups_total = register(
        &registry,
        "submission_groups",
        IntCounterVec::new(
            Opts::new(
                "portal_json_submission_groups_total",
                "Distributor groups written, by submission kind.",
            ),
            &["kind"],
        ),
    )?;

    let rebate_claims_total = register(
        &registry,
        "rebate_claims",
        IntCounterVec::new(
            Opts::new(
                "portal_json_rebate_claims_total",
                "Rebate claims filed, by tier.",
            ),
            &["tier"],
        ),
    )?;

    let cashback_claims_total = register(
        &registry,
        "cashback_claims",
        IntCounterVec::new(
            Opts::new(
                "portal_json_cashback_claims_total",
                "Cashback claims filed, by type.",
            ),
            &["type"],
        ),
    )?;

    Some(PortalMetrics {
        registry,
        requests_total,
        request_duration_seconds,
        requests_in_flight,
        submission_groups_total,
        rebate_claims_total,
        cashback_claims_total,
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

use axum::{http::StatusCode, response::IntoResponse};
use lazy_static::lazy_static;
use prometheus::{
    CounterVec, Encoder, Gauge, Histogram, HistogramOpts, HistogramVec, Opts, Registry,
    TextEncoder,
};
use std::time::Duration;

/// Metric name prefix for all LevelUp metrics
const PREFIX: &str = "levelup";

lazy_static! {
    // Global Prometheus registry
    pub static ref REGISTRY: Registry = Registry::new();

    // HTTP Request Metrics
    pub static ref HTTP_REQUESTS_TOTAL: CounterVec = CounterVec::new(
        Opts::new(format!("{PREFIX}_http_requests_total"), "Total number of HTTP requests"),
        &["method", "path", "status"]
    ).expect("Failed to create http_requests_total metric");

    pub static ref HTTP_REQUEST_DURATION_SECONDS: HistogramVec = HistogramVec::new(
        HistogramOpts::new(
            format!("{PREFIX}_http_request_duration_seconds"),
            "HTTP request duration in seconds"
        )
        .buckets(vec![0.001, 0.01, 0.05, 0.1, 0.5, 1.0, 2.0, 5.0, 10.0]),
        &["method", "path"]
    ).expect("Failed to create http_request_duration_seconds metric");

    // Authentication Metrics
    pub static ref AUTH_LOGIN_ATTEMPTS_TOTAL: CounterVec = CounterVec::new(
        Opts::new(format!("{PREFIX}_auth_login_attempts_total"), "Total login attempts"),
        &["status"]
    ).expect("Failed to create auth_login_attempts_total metric");

    // Catalog Sync Metrics
    pub static ref SYNC_RUNS_TOTAL: CounterVec = CounterVec::new(
        Opts::new(format!("{PREFIX}_sync_runs_total"), "Top sellers sync runs by outcome"),
        &["outcome"]
    ).expect("Failed to create sync_runs_total metric");

    pub static ref SYNC_RUN_DURATION_SECONDS: Histogram = Histogram::with_opts(
        HistogramOpts::new(
            format!("{PREFIX}_sync_run_duration_seconds"),
            "Top sellers sync run duration in seconds"
        )
        .buckets(vec![1.0, 10.0, 60.0, 300.0, 900.0, 1800.0])
    ).expect("Failed to create sync_run_duration_seconds metric");

    pub static ref SYNC_ITEMS_TOTAL: CounterVec = CounterVec::new(
        Opts::new(format!("{PREFIX}_sync_items_total"), "Games processed by sync, by result"),
        &["result"]
    ).expect("Failed to create sync_items_total metric");

    pub static ref CATALOG_GAMES_TOTAL: Gauge = Gauge::new(
        format!("{PREFIX}_catalog_games_total"),
        "Number of games in the local catalog"
    ).expect("Failed to create catalog_games_total metric");
}

/// Initialize all metrics and register them with the Prometheus registry
pub fn init_metrics() {
    // Register all metrics - ignore errors if already registered (for tests)
    let _ = REGISTRY.register(Box::new(HTTP_REQUESTS_TOTAL.clone()));
    let _ = REGISTRY.register(Box::new(HTTP_REQUEST_DURATION_SECONDS.clone()));
    let _ = REGISTRY.register(Box::new(AUTH_LOGIN_ATTEMPTS_TOTAL.clone()));
    let _ = REGISTRY.register(Box::new(SYNC_RUNS_TOTAL.clone()));
    let _ = REGISTRY.register(Box::new(SYNC_RUN_DURATION_SECONDS.clone()));
    let _ = REGISTRY.register(Box::new(SYNC_ITEMS_TOTAL.clone()));
    let _ = REGISTRY.register(Box::new(CATALOG_GAMES_TOTAL.clone()));

    tracing::info!("Metrics system initialized successfully");
}

/// Record an HTTP request
pub fn record_http_request(method: &str, path: &str, status: u16, duration: Duration) {
    HTTP_REQUESTS_TOTAL
        .with_label_values(&[method, path, &status.to_string()])
        .inc();

    HTTP_REQUEST_DURATION_SECONDS
        .with_label_values(&[method, path])
        .observe(duration.as_secs_f64());
}

/// Record a login attempt
pub fn record_login_attempt(status: &str) {
    AUTH_LOGIN_ATTEMPTS_TOTAL.with_label_values(&[status]).inc();
}

/// Record the end of a sync run ("completed" or "failed")
pub fn record_sync_run(outcome: &str, duration: Duration) {
    SYNC_RUNS_TOTAL.with_label_values(&[outcome]).inc();
    SYNC_RUN_DURATION_SECONDS.observe(duration.as_secs_f64());
}

/// Record one processed game ("synced", "cached" or "fetch_failed")
pub fn record_sync_item(result: &str) {
    SYNC_ITEMS_TOTAL.with_label_values(&[result]).inc();
}

pub fn set_catalog_games(count: usize) {
    CATALOG_GAMES_TOTAL.set(count as f64);
}

/// Collapses numeric path segments so ids don't explode label cardinality.
pub fn normalize_path(path: &str) -> String {
    path.split('/')
        .map(|segment| {
            if !segment.is_empty() && segment.chars().all(|c| c.is_ascii_digit()) {
                ":id"
            } else {
                segment
            }
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Handler for the /metrics endpoint
pub async fn metrics_handler() -> impl IntoResponse {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();

    match encoder.encode(&metric_families, &mut buffer) {
        Ok(()) => (
            StatusCode::OK,
            [("content-type", encoder.format_type().to_string())],
            buffer,
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to encode metrics: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to encode metrics",
            )
                .into_response()
        }
    }
}

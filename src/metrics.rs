use lazy_static::lazy_static;
use prometheus::{CounterVec, Encoder, Histogram, HistogramOpts, HistogramVec, Opts, Registry, TextEncoder};
use std::time::Duration;

/// Metric name prefix for all recommender metrics
const PREFIX: &str = "track_recommender";

lazy_static! {
    // Global Prometheus registry
    pub static ref REGISTRY: Registry = Registry::new();

    pub static ref RECOMMENDATION_REQUESTS_TOTAL: CounterVec = CounterVec::new(
        Opts::new(
            format!("{PREFIX}_recommendation_requests_total"),
            "Total number of recommendation requests"
        ),
        &["kind", "status"]
    ).expect("Failed to create recommendation_requests_total metric");

    pub static ref RECOMMENDATION_DURATION_SECONDS: HistogramVec = HistogramVec::new(
        HistogramOpts::new(
            format!("{PREFIX}_recommendation_duration_seconds"),
            "Recommendation request duration in seconds"
        )
        .buckets(vec![0.001, 0.01, 0.05, 0.1, 0.5, 1.0, 2.0, 5.0, 10.0]),
        &["kind"]
    ).expect("Failed to create recommendation_duration_seconds metric");

    pub static ref CORPUS_SIZE_TRACKS: Histogram = Histogram::with_opts(
        HistogramOpts::new(
            format!("{PREFIX}_corpus_size_tracks"),
            "Number of tracks scored per recommendation request"
        )
        .buckets(vec![10.0, 100.0, 500.0, 1000.0, 5000.0, 10000.0, 50000.0])
    ).expect("Failed to create corpus_size_tracks metric");
}

/// Register all metrics. Safe to call more than once.
pub fn init_metrics() {
    // Ignore errors if already registered (for tests)
    let _ = REGISTRY.register(Box::new(RECOMMENDATION_REQUESTS_TOTAL.clone()));
    let _ = REGISTRY.register(Box::new(RECOMMENDATION_DURATION_SECONDS.clone()));
    let _ = REGISTRY.register(Box::new(CORPUS_SIZE_TRACKS.clone()));

    tracing::debug!("Metrics system initialized");
}

/// Record a finished recommendation request.
///
/// `corpus_size` is `None` when the request failed before the corpus was read.
pub fn record_recommendation(
    kind: &str,
    status: &str,
    corpus_size: Option<usize>,
    duration: Duration,
) {
    RECOMMENDATION_REQUESTS_TOTAL
        .with_label_values(&[kind, status])
        .inc();
    RECOMMENDATION_DURATION_SECONDS
        .with_label_values(&[kind])
        .observe(duration.as_secs_f64());
    if let Some(size) = corpus_size {
        CORPUS_SIZE_TRACKS.observe(size as f64);
    }
}

/// Render all registered metrics in the Prometheus text format.
pub fn gather_text() -> anyhow::Result<String> {
    let encoder = TextEncoder::new();
    let mut buffer = Vec::new();
    encoder.encode(&REGISTRY.gather(), &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}

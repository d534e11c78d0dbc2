use lazy_static::lazy_static;
use prometheus::{
    register_histogram_vec, register_int_counter_vec, Encoder, HistogramVec, IntCounterVec,
    TextEncoder,
};

lazy_static! {
    // HTTP Metrics
    pub static ref HTTP_REQUESTS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "http_requests_total",
        "Total number of HTTP requests",
        &["method", "path", "status"]
    )
    .unwrap();

    pub static ref HTTP_REQUEST_DURATION_SECONDS: HistogramVec = register_histogram_vec!(
        "http_request_duration_seconds",
        "HTTP request duration in seconds",
        &["method", "path"],
        vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]
    )
    .unwrap();

    // Provider Metrics
    pub static ref PROVIDER_REQUEST_DURATION_SECONDS: HistogramVec = register_histogram_vec!(
        "provider_request_duration_seconds",
        "Language model request duration in seconds",
        &["operation", "status"],
        vec![0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 20.0, 30.0, 60.0, 120.0]
    )
    .unwrap();

    // Content Metrics
    pub static ref LESSONS_GENERATED_TOTAL: IntCounterVec = register_int_counter_vec!(
        "lessons_generated_total",
        "Total number of lessons produced",
        &["outcome"]
    )
    .unwrap();

    pub static ref QUIZZES_GENERATED_TOTAL: IntCounterVec = register_int_counter_vec!(
        "quizzes_generated_total",
        "Total number of quizzes produced",
        &["outcome"]
    )
    .unwrap();

    pub static ref CONTENT_CACHE_TOTAL: IntCounterVec = register_int_counter_vec!(
        "content_cache_total",
        "Content cache lookups",
        &["kind", "result"]
    )
    .unwrap();

    pub static ref QUIZZES_SCORED_TOTAL: IntCounterVec = register_int_counter_vec!(
        "quizzes_scored_total",
        "Total number of submitted quizzes by feedback band",
        &["band"]
    )
    .unwrap();
}

/// Renders all metrics in Prometheus text format
pub fn render_metrics() -> Result<String, prometheus::Error> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;
    String::from_utf8(buffer)
        .map_err(|e| prometheus::Error::Msg(format!("Failed to convert metrics to UTF-8: {}", e)))
}

/// Helper: time a provider call and label it by outcome
pub async fn track_provider_call<F, T, E>(operation: &str, future: F) -> Result<T, E>
where
    F: std::future::Future<Output = Result<T, E>>,
{
    let start = std::time::Instant::now();
    let result = future.await;
    let duration = start.elapsed().as_secs_f64();

    let status = if result.is_ok() { "success" } else { "error" };

    PROVIDER_REQUEST_DURATION_SECONDS
        .with_label_values(&[operation, status])
        .observe(duration);

    result
}

pub fn record_cache_hit(kind: &str) {
    CONTENT_CACHE_TOTAL.with_label_values(&[kind, "hit"]).inc();
}

pub fn record_cache_miss(kind: &str) {
    CONTENT_CACHE_TOTAL.with_label_values(&[kind, "miss"]).inc();
}

pub fn record_quiz_scored(band: &str) {
    QUIZZES_SCORED_TOTAL.with_label_values(&[band]).inc();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_registration() {
        let _ = HTTP_REQUESTS_TOTAL
            .with_label_values(&["GET", "/health", "200"])
            .get();
        let _ = QUIZZES_GENERATED_TOTAL.with_label_values(&["ok"]).get();
    }

    #[test]
    fn test_render_metrics() {
        LESSONS_GENERATED_TOTAL.with_label_values(&["ok"]).inc();

        let output = render_metrics().unwrap();
        assert!(output.contains("lessons_generated_total"));
    }

    #[tokio::test]
    async fn test_track_provider_call_passes_result_through() {
        let ok: Result<u8, &str> = track_provider_call("lesson", async { Ok(7) }).await;
        assert_eq!(ok, Ok(7));

        let err: Result<u8, &str> = track_provider_call("quiz", async { Err("boom") }).await;
        assert_eq!(err, Err("boom"));
    }

    #[test]
    fn test_record_quiz_scored() {
        let before = QUIZZES_SCORED_TOTAL.with_label_values(&["mastered"]).get();
        record_quiz_scored("mastered");
        assert!(QUIZZES_SCORED_TOTAL.with_label_values(&["mastered"]).get() > before);
    }
}

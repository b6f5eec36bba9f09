//! Span helpers

/// Span for one HTTP request; `http.status_code` is recorded once the handler returns.
///
/// ```rust
/// use prompttune_observability::http_request_span;
///
/// let span = http_request_span!("POST", "/optimize", "b7c1");
/// let _guard = span.enter();
/// ```
#[macro_export]
macro_rules! http_request_span {
    ($method:expr, $path:expr, $request_id:expr) => {
        tracing::info_span!(
            "http.request",
            http.method = $method,
            http.route = $path,
            http.status_code = tracing::field::Empty,
            request.id = $request_id,
            duration_ms = tracing::field::Empty,
            error = tracing::field::Empty,
            error.message = tracing::field::Empty,
        )
    };
}

/// Span around one optimize round trip.
#[macro_export]
macro_rules! optimize_span {
    ($caller:expr, $model:expr) => {
        tracing::info_span!(
            "prompt.optimize",
            caller = $caller,
            model = $model,
            duration_ms = tracing::field::Empty,
            error = tracing::field::Empty,
            error.message = tracing::field::Empty,
        )
    };
}

/// Mark the current span as failed and log the error.
pub fn record_error<E: std::error::Error>(error: &E) {
    let span = tracing::Span::current();
    span.record("error", true);
    span.record("error.message", error.to_string());
    tracing::error!(error = %error, "Operation failed");
}

/// Record `duration` in milliseconds under `key` on the current span.
pub fn record_duration(key: &str, duration: std::time::Duration) {
    let span = tracing::Span::current();
    span.record(key, duration.as_millis() as u64);
}

//! CORS and request tracing middleware.

use std::time::Instant;

use axum::extract::Request;
use axum::http::{header, HeaderMap, HeaderValue, Method, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use tracing::Instrument;

const ALLOW_METHODS: &str = "GET, POST, PUT, DELETE, OPTIONS";
const ALLOW_HEADERS: &str = "Origin, X-Requested-With, Content-Type, Accept, Authorization";

/// Allow any origin; answer preflight `OPTIONS` directly with 200.
pub(crate) async fn cors(req: Request, next: Next) -> Response {
    let mut res = if req.method() == Method::OPTIONS {
        (StatusCode::OK, "OK").into_response()
    } else {
        next.run(req).await
    };
    apply_cors_headers(res.headers_mut());
    res
}

fn apply_cors_headers(headers: &mut HeaderMap) {
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(ALLOW_METHODS),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(ALLOW_HEADERS),
    );
}

pub(crate) async fn trace_request(req: Request, next: Next) -> Response {
    let request_id = uuid::Uuid::new_v4().to_string();
    let span = prompttune_observability::http_request_span!(
        req.method().as_str(),
        req.uri().path(),
        request_id.as_str()
    );

    let started = Instant::now();
    let res = next.run(req).instrument(span.clone()).await;
    let status = res.status().as_u16();

    span.record("http.status_code", status);
    span.in_scope(|| {
        prompttune_observability::record_duration("duration_ms", started.elapsed());
        if status >= 500 {
            tracing::warn!(status, "request failed");
        } else {
            tracing::info!(status, duration_ms = started.elapsed().as_millis() as u64, "request completed");
        }
    });

    res
}

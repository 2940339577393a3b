use crate::api::error::ErrorCode;
use crate::api::{ApiError, ApiResponse, AppState};
use axum::{
    Json,
    extract::{MatchedPath, Request, State},
    http::HeaderValue,
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tracing::{Instrument, info, info_span, warn};
use uuid::Uuid;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub uptime_seconds: u64,
}

/// GET /health
///
/// Pings the database so a broken store surfaces as a 500.
pub async fn health(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<HealthResponse>>, ApiError> {
    state
        .store()
        .ping()
        .await
        .map_err(|e| ApiError::DatabaseError(format!("Health check failed: {e}")))?;

    Ok(Json(ApiResponse::success(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        uptime_seconds: state.start_time.elapsed().as_secs(),
    })))
}

pub async fn get_metrics(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    state.prometheus_handle.as_ref().map_or_else(
        || "Metrics not enabled or failed to initialize".to_string(),
        metrics_exporter_prometheus::PrometheusHandle::render,
    )
}

/// Catalog resource a route belongs to: the segment after `/api`, with
/// `/movies/{id}/ratings` and `/movies/{id}/comments` attributed to ratings
/// and comments.
fn resource_of(route: &str) -> &'static str {
    let mut segments = route
        .trim_start_matches('/')
        .trim_start_matches("api/")
        .split('/');

    let head = segments.next().unwrap_or_default();
    let tail = segments.nth(1);

    match (head, tail) {
        ("movies", Some("ratings")) | ("ratings", _) => "ratings",
        ("comments", Some("replies")) | ("replies", _) => "replies",
        ("movies", Some("comments")) | ("comments", _) => "comments",
        ("movies", _) => "movies",
        ("auth", _) => "auth",
        ("health" | "metrics", _) => "system",
        _ => "other",
    }
}

pub async fn logging_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let request_id = Uuid::new_v4().to_string();

    let method = req.method().to_string();
    let path = req.uri().path().to_string();

    // Unmatched paths are grouped so arbitrary URLs cannot blow up label cardinality.
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map_or_else(|| "unmatched".to_string(), |mp| mp.as_str().to_string());
    let resource = resource_of(&route);

    let span = info_span!(
        "request",
        request_id = %request_id,
        method = %method,
        path = %path,
        route = %route,
        resource,
        user_id = tracing::field::Empty,
    );

    async move {
        let response = next.run(req).await;

        let elapsed = start.elapsed();
        let duration_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);
        let status = response.status().as_u16();
        let error_code = response.extensions().get::<ErrorCode>().map(|c| c.0);

        let labels = [
            ("method", method.clone()),
            ("resource", resource.to_string()),
            ("status", status.to_string()),
        ];
        metrics::counter!("catalog_http_requests_total", &labels).increment(1);
        metrics::histogram!("catalog_http_request_duration_seconds", &labels)
            .record(elapsed.as_secs_f64());

        if let Some(code) = error_code {
            metrics::counter!(
                "catalog_http_errors_total",
                "resource" => resource,
                "code" => code
            )
            .increment(1);
        }

        if status >= 500 {
            warn!(
                event = "catalog_request_finished",
                duration_ms,
                status_code = status,
                error_code = error_code.unwrap_or("unknown"),
                "Request failed"
            );
        } else {
            info!(
                event = "catalog_request_finished",
                duration_ms,
                status_code = status,
                error_code,
                "Request finished"
            );
        }

        response
    }
    .instrument(span)
    .await
}

pub async fn security_headers_middleware(req: Request, next: Next) -> Response {
    let mut response = next.run(req).await;
    let headers = response.headers_mut();

    headers.insert(
        "x-content-type-options",
        HeaderValue::from_static("nosniff"),
    );
    headers.insert("x-frame-options", HeaderValue::from_static("DENY"));
    headers.insert(
        "content-security-policy",
        HeaderValue::from_static("default-src 'none'; frame-ancestors 'none'"),
    );
    headers.insert("cache-control", HeaderValue::from_static("no-store"));

    response
}

#[cfg(test)]
mod tests {
    use super::resource_of;

    #[test]
    fn routes_map_to_catalog_resources() {
        assert_eq!(resource_of("/api/movies"), "movies");
        assert_eq!(resource_of("/api/movies/{id}"), "movies");
        assert_eq!(resource_of("/api/movies/mine"), "movies");
        assert_eq!(resource_of("/api/movies/{id}/ratings"), "ratings");
        assert_eq!(resource_of("/api/ratings/{id}"), "ratings");
        assert_eq!(resource_of("/api/movies/{id}/comments"), "comments");
        assert_eq!(resource_of("/api/comments/{id}"), "comments");
        assert_eq!(resource_of("/api/comments/{id}/replies"), "replies");
        assert_eq!(resource_of("/api/replies/{id}"), "replies");
        assert_eq!(resource_of("/api/auth/login"), "auth");
        assert_eq!(resource_of("/health"), "system");
        assert_eq!(resource_of("unmatched"), "other");
    }
}

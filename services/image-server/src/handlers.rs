//! HTTP handlers.

use std::fmt::Write as _;
use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::Extension,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Serialize;
use tracing::{debug, error};

use crate::metrics;
use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
}

/// GET / - Render one image
///
/// Rendering is CPU-bound and runs on the blocking pool. Each request gets
/// its own canvas; plugins are shared.
pub async fn render_handler(Extension(state): Extension<Arc<AppState>>) -> Response {
    let start = Instant::now();
    let worker_state = Arc::clone(&state);
    let joined = tokio::task::spawn_blocking(move || worker_state.pipeline.render()).await;

    match joined {
        Ok(Ok(png)) => {
            metrics::record_render(start.elapsed(), Ok(()));
            debug!(bytes = png.len(), elapsed_ms = start.elapsed().as_millis() as u64, "Served image");
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, "image/png"),
                    (header::CACHE_CONTROL, "no-store"),
                ],
                png,
            )
                .into_response()
        }
        Ok(Err(e)) => {
            metrics::record_render(start.elapsed(), Err(&e));
            let status = StatusCode::from_u16(e.http_status_code())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            (status, format!("{}: {}", e.error_code(), e)).into_response()
        }
        Err(e) => {
            metrics::record_worker_failure();
            error!(error = %e, "Render task failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "WorkerError: render task failed".to_string(),
            )
                .into_response()
        }
    }
}

/// GET /health - Basic health check
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// GET /metrics - Prometheus metrics
pub async fn metrics_handler(
    Extension(state): Extension<Arc<AppState>>,
    Extension(prometheus): Extension<PrometheusHandle>,
) -> Response {
    let stats = state.pipeline.stats();
    let mut output = prometheus.render();

    let gauges = [
        ("pipeline_renders_started", "Renders started", stats.renders_started),
        ("pipeline_renders_succeeded", "Renders that produced an image", stats.renders_succeeded),
        ("pipeline_renders_failed", "Renders aborted by an error", stats.renders_failed),
        ("pipeline_canvases_created", "Canvases allocated", stats.canvases_created),
        ("pipeline_canvases_disposed", "Canvases released", stats.canvases_disposed),
        ("pipeline_plugins", "Registered drawing plugins", state.pipeline.registry().len() as u64),
    ];
    for (name, help, value) in gauges {
        let _ = write!(
            output,
            "# HELP {name} {help}\n# TYPE {name} gauge\n{name} {value}\n"
        );
    }

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        output,
    )
        .into_response()
}

/// GET /api/stats - JSON pipeline statistics
pub async fn stats_handler(Extension(state): Extension<Arc<AppState>>) -> impl IntoResponse {
    let (width, height) = state.pipeline.dimensions();
    Json(serde_json::json!({
        "plugins": state.pipeline.registry().names(),
        "output_mode": format!("{:?}", state.pipeline.output_mode()),
        "width": width,
        "height": height,
        "uptime_secs": state.started_at.elapsed().as_secs(),
        "stats": state.pipeline.stats(),
    }))
}

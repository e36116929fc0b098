//! Render metrics published through the `metrics` facade.
//!
//! Nothing is recorded unless a recorder is installed, which `main` does with
//! the Prometheus exporter.

use metrics::{counter, histogram};
use std::time::Duration;

use pipeline::RenderError;

pub const RENDERS_TOTAL: &str = "renders_total";
pub const RENDER_ERRORS_TOTAL: &str = "render_errors_total";
pub const RENDER_DURATION_SECONDS: &str = "render_duration_seconds";

/// Record a finished render.
pub fn record_render(elapsed: Duration, result: Result<(), &RenderError>) {
    counter!(RENDERS_TOTAL).increment(1);
    histogram!(RENDER_DURATION_SECONDS).record(elapsed.as_secs_f64());

    if let Err(e) = result {
        counter!(RENDER_ERRORS_TOTAL, "code" => e.error_code()).increment(1);
    }
}

/// Record a render whose worker task died before producing a result.
pub fn record_worker_failure() {
    counter!(RENDERS_TOTAL).increment(1);
    counter!(RENDER_ERRORS_TOTAL, "code" => "WorkerError").increment(1);
}

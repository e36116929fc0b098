//! Per-pipeline render counters.

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

/// Counters updated by every render of one pipeline.
#[derive(Debug, Default)]
pub struct RenderStats {
    pub renders_started: AtomicU64,
    pub renders_succeeded: AtomicU64,
    pub renders_failed: AtomicU64,
    pub canvases_created: AtomicU64,
    pub canvases_disposed: AtomicU64,
}

/// Point-in-time copy of [`RenderStats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RenderStatsSnapshot {
    pub renders_started: u64,
    pub renders_succeeded: u64,
    pub renders_failed: u64,
    pub canvases_created: u64,
    pub canvases_disposed: u64,
}

impl RenderStats {
    pub fn snapshot(&self) -> RenderStatsSnapshot {
        RenderStatsSnapshot {
            renders_started: self.renders_started.load(Ordering::Relaxed),
            renders_succeeded: self.renders_succeeded.load(Ordering::Relaxed),
            renders_failed: self.renders_failed.load(Ordering::Relaxed),
            canvases_created: self.canvases_created.load(Ordering::Relaxed),
            canvases_disposed: self.canvases_disposed.load(Ordering::Relaxed),
        }
    }
}

impl RenderStatsSnapshot {
    /// Canvases created but not yet disposed.
    pub fn canvases_live(&self) -> u64 {
        self.canvases_created.saturating_sub(self.canvases_disposed)
    }
}

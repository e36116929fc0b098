//! Application state for the image server.

use std::time::Instant;

use pipeline::RenderPipeline;

use crate::config::Args;

/// Shared application state.
#[derive(Debug)]
pub struct AppState {
    /// Render pipeline with its plugin registry already populated.
    pub pipeline: RenderPipeline,

    /// Start time for uptime reporting.
    pub started_at: Instant,
}

impl AppState {
    pub fn new(pipeline: RenderPipeline) -> Self {
        Self {
            pipeline,
            started_at: Instant::now(),
        }
    }

    /// Build the pipeline described by the command line.
    pub fn from_args(args: &Args) -> Self {
        Self::new(args.build_pipeline())
    }
}

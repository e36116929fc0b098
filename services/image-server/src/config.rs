//! Command-line and environment configuration.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use count_plugin::CountPlugin;
use pipeline::{OutputMode, PluginRegistry, RenderPipeline};

/// Image server
#[derive(Parser, Debug, Clone)]
#[command(name = "image-server")]
#[command(about = "Serves PNG images composed by drawing plugins")]
pub struct Args {
    /// Listen address
    #[arg(short, long, default_value = "0.0.0.0:8080", env = "IMAGE_SERVER_LISTEN_ADDR")]
    pub listen: String,

    /// Log level
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    pub log_level: String,

    /// Number of worker threads
    #[arg(long, env = "IMAGE_SERVER_WORKER_THREADS")]
    pub worker_threads: Option<usize>,

    /// How rendered images are serialized
    #[arg(long, value_enum, default_value_t = OutputModeArg::Memory, env = "IMAGE_SERVER_OUTPUT_MODE")]
    pub output_mode: OutputModeArg,

    /// Directory for temp-file output (defaults to the system temp dir)
    #[arg(long, env = "IMAGE_SERVER_TEMP_DIR")]
    pub temp_dir: Option<PathBuf>,

    /// Drawing plugins to register, in paint order
    #[arg(
        long = "plugin",
        value_enum,
        value_delimiter = ',',
        env = "IMAGE_SERVER_PLUGINS"
    )]
    pub plugins: Vec<PluginKind>,
}

/// Plugins that can be enabled from the command line.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PluginKind {
    /// Draws how many times it has painted
    Count,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputModeArg {
    Memory,
    TempFile,
}

impl From<OutputModeArg> for OutputMode {
    fn from(arg: OutputModeArg) -> Self {
        match arg {
            OutputModeArg::Memory => OutputMode::Memory,
            OutputModeArg::TempFile => OutputMode::TempFile,
        }
    }
}

impl Args {
    /// Instantiate the configured plugins in order.
    pub fn build_registry(&self) -> PluginRegistry {
        let mut registry = PluginRegistry::new();
        for kind in &self.plugins {
            match kind {
                PluginKind::Count => registry.register(CountPlugin::new()),
            };
        }
        registry
    }

    pub fn build_pipeline(&self) -> RenderPipeline {
        let pipeline =
            RenderPipeline::new(self.build_registry()).with_output_mode(self.output_mode.into());
        match &self.temp_dir {
            Some(dir) => pipeline.with_temp_dir(dir),
            None => pipeline,
        }
    }
}

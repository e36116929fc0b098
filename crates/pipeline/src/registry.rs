//! Ordered collection of drawing plugins.

use std::fmt;

use crate::plugin::DrawingPlugin;

/// The plugins of a pipeline, in paint order.
///
/// Populated at startup and then moved into a
/// [`RenderPipeline`](crate::RenderPipeline), after which it can only be read.
/// Duplicates are allowed; order is exactly registration order.
#[derive(Default)]
pub struct PluginRegistry {
    plugins: Vec<Box<dyn DrawingPlugin>>,
}

impl PluginRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a plugin to the end of the paint order.
    pub fn register<P: DrawingPlugin + 'static>(&mut self, plugin: P) -> &mut Self {
        tracing::info!(
            plugin = plugin.name(),
            position = self.plugins.len() + 1,
            "Registered drawing plugin"
        );
        self.plugins.push(Box::new(plugin));
        self
    }

    /// Builder form of [`register`](Self::register).
    pub fn with<P: DrawingPlugin + 'static>(mut self, plugin: P) -> Self {
        self.register(plugin);
        self
    }

    /// Registered plugins in registration order.
    pub fn list(&self) -> &[Box<dyn DrawingPlugin>] {
        &self.plugins
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    pub fn names(&self) -> Vec<&str> {
        self.plugins.iter().map(|p| p.name()).collect()
    }
}

impl fmt::Debug for PluginRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PluginRegistry")
            .field("plugins", &self.names())
            .finish()
    }
}

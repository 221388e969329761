//! Plugin factory: the list of shipped send plugins.

use crate::error::{PluginError, Result};
use crate::metadata::{send_mono, send_stereo, PluginMetadata};
use crate::module::SendModule;
use sendfx_core::SendConfig;

/// Registered send plugins, in registration order.
#[derive(Debug, Clone)]
pub struct PluginFactory {
    plugins: Vec<PluginMetadata>,
}

impl PluginFactory {
    /// Factory with the metered mono and stereo send plugins.
    pub fn new() -> Self {
        let mut factory = Self::empty();
        factory.register(send_mono());
        factory.register(send_stereo());
        factory
    }

    pub fn empty() -> Self {
        Self {
            plugins: Vec::new(),
        }
    }

    /// Register a plugin. A plugin with the same id is replaced.
    pub fn register(&mut self, metadata: PluginMetadata) {
        tracing::info!("Registered plugin {} ({})", metadata.id, metadata.uid);
        match self.plugins.iter_mut().find(|p| p.id == metadata.id) {
            Some(existing) => *existing = metadata,
            None => self.plugins.push(metadata),
        }
    }

    pub fn plugins(&self) -> &[PluginMetadata] {
        &self.plugins
    }

    pub fn metadata(&self, id: &str) -> Option<&PluginMetadata> {
        self.plugins.iter().find(|p| p.id == id)
    }

    pub fn create(&self, id: &str) -> Result<SendModule> {
        self.create_with_config(id, SendConfig::default())
    }

    pub fn create_with_config(&self, id: &str, config: SendConfig) -> Result<SendModule> {
        let metadata = self
            .metadata(id)
            .cloned()
            .ok_or_else(|| PluginError::UnknownPlugin(id.to_string()))?;
        SendModule::with_config(metadata, config)
    }
}

impl Default for PluginFactory {
    fn default() -> Self {
        Self::new()
    }
}

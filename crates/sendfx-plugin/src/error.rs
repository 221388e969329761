//! Error types for the send plugin.

use crate::metadata::PortKindTag;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PluginError {
    #[error(transparent)]
    Core(#[from] sendfx_core::Error),

    #[error("Failed to allocate {channels} channel(s)")]
    AllocationFailed { channels: usize },

    #[error("Port count mismatch: expected {expected}, found {found}")]
    PortCount { expected: usize, found: usize },

    #[error("Port {index} ('{id}') expects {expected}")]
    PortMismatch {
        index: usize,
        id: &'static str,
        expected: PortKindTag,
    },

    #[error("Unknown plugin: {0}")]
    UnknownPlugin(String),

    #[error("Shared memory error: {0}")]
    SharedMemory(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PluginError>;

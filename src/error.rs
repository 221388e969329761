//! Centralized error type for the sendfx umbrella crate.
//!
//! Wraps the subsystem errors so `?` propagates across crate boundaries.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Core(#[from] sendfx_core::Error),

    #[error("Plugin: {0}")]
    Plugin(#[from] sendfx_plugin::PluginError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

//! sendfx: a per-channel audio send effect.
//!
//! Passes each channel to its output and routes an independently scaled copy
//! to a shared bus, with a click-free bypass crossfade on the send path and
//! optional peak metering.
//!
//! ## Quick Start
//!
//! ```
//! use sendfx::prelude::*;
//!
//! let mut module = PluginFactory::new().create("send_mono")?;
//! let ports = PortMap::new(module.metadata()).with_send_name("reverb");
//! module.init(ports.ports())?;
//! module.set_sample_rate(44100.0)?;
//!
//! ports.control("g_in").unwrap().set_value(db_to_gain(-6.0));
//! module.update_settings();
//!
//! let input = [0.5f32; 256];
//! let mut output = [0.0f32; 256];
//! module.process(&mut [ChannelBuffers::new(&input, &mut output)], 256);
//!
//! assert!(output[0] < 0.5);
//! # Ok::<(), sendfx::Error>(())
//! ```
//!
//! ## Crates
//!
//! - [`core`]: gain math, bypass crossfade, lock-free ports, configuration
//! - [`plugin`]: port tables, the send module, the shared send bus

pub mod error;
pub use error::{Error, Result};

pub use sendfx_core as core;
pub use sendfx_plugin as plugin;

pub use sendfx_core::{
    db_to_gain, gain_to_db, Bypass, BypassState, ControlPort, MeterPort, ParameterRange,
    SendConfig, BYPASS_RAMP_TIME, GAIN_AMP_0_DB, GAIN_AMP_M_INF_DB, GAIN_AMP_P_24_DB,
};

pub use sendfx_plugin::{
    send_mono, send_stereo, ChannelBuffers, ChannelLayout, Gains, PluginFactory, PluginMetadata,
    Port, PortMap, SendBuffer, SendDestination, SendModule, SharedSendBus, StateDump, Variant,
};

/// Everything needed to host a send plugin.
pub mod prelude {
    pub use crate::{Error, Result};

    pub use sendfx_core::{db_to_gain, gain_to_db, BypassState, SendConfig};

    pub use sendfx_plugin::{
        send_mono, send_stereo, ChannelBuffers, ChannelLayout, PluginFactory, PluginMetadata,
        PortMap, SendBuffer, SendDestination, SendModule, SharedSendBus, Variant,
    };
}

//! Diagnostic state snapshots.
//!
//! Not part of the real-time path: a dump allocates and reads every shared
//! port value.

use crate::channel::Gains;
use crate::metadata::{Capabilities, Variant};
use sendfx_core::{BypassState, SendConfig};
use serde::Serialize;

/// Snapshot of one channel. Unbound meters are `None`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChannelDump {
    pub bypass_state: BypassState,
    pub bypass_gain: f32,
    pub bypass_ramp_samples: u32,
    pub in_meter: Option<f32>,
    pub send_meter: Option<f32>,
    pub out_meter: Option<f32>,
}

/// Snapshot of a whole module, see [`SendModule::dump`](crate::SendModule::dump).
///
/// Control values are `None` while the matching port is unbound.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StateDump {
    pub plugin: String,
    pub variant: Variant,
    pub capabilities: Capabilities,
    pub n_channels: usize,
    pub channels: Vec<ChannelDump>,
    pub gains: Gains,
    pub sample_rate: f64,
    pub config: SendConfig,
    pub initialized: bool,
    pub settings_applied: bool,
    pub bypass: Option<f32>,
    pub in_gain: Option<f32>,
    pub out_gain: Option<f32>,
    pub send_gain: Option<f32>,
    pub send_name: Option<String>,
}

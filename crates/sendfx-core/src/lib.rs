//! Real-time primitives for the sendfx audio send plugin.
//!
//! - [`Bypass`]: click-free bypass crossfade
//! - [`ParameterRange`]: host control ranges and sanitizing
//! - [`ControlPort`] / [`MeterPort`]: lock-free values shared with the host
//! - [`SendConfig`]: sample rate and crossfade settings
//! - [`gain`]: amplitude constants and dB conversion
//! - [`dsp`]: allocation-free block helpers
//!
//! Nothing in this crate allocates or locks on the audio path.

pub mod error;
pub use error::{Error, Result};

pub mod config;
pub use config::SendConfig;

pub mod bypass;
pub use bypass::{Bypass, BypassState, BYPASS_RAMP_TIME};

pub mod dsp;

pub mod gain;
pub use gain::{
    db_to_gain, gain_to_db, GAIN_AMP_0_DB, GAIN_AMP_M_INF_DB, GAIN_AMP_P_24_DB, SEND_GAIN_DFL,
    SEND_GAIN_MAX, SEND_GAIN_MIN, SEND_GAIN_STEP,
};

pub mod parameter;
pub use parameter::{ParameterRange, ParameterScale};

mod port;
pub use port::{ControlPort, MeterPort};

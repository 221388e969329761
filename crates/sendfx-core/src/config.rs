//! Send module configuration.

use crate::{Error, Result, BYPASS_RAMP_TIME};
use serde::{Deserialize, Serialize};

/// Configuration applied when a send module is initialized.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SendConfig {
    /// Sample rate used until the host reports its own.
    pub sample_rate: f64,
    /// Bypass crossfade duration in seconds.
    pub bypass_ramp_secs: f32,
}

impl Default for SendConfig {
    fn default() -> Self {
        Self {
            sample_rate: 48000.0,
            bypass_ramp_secs: BYPASS_RAMP_TIME,
        }
    }
}

impl SendConfig {
    pub fn validate(&self) -> Result<()> {
        validate_sample_rate(self.sample_rate)?;
        if !(self.bypass_ramp_secs > 0.0 && self.bypass_ramp_secs <= 1.0) {
            return Err(Error::InvalidConfig(format!(
                "bypass_ramp_secs {} out of range (0-1 s)",
                self.bypass_ramp_secs
            )));
        }
        Ok(())
    }

    pub fn with_sample_rate(mut self, sample_rate: f64) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    pub fn with_bypass_ramp(mut self, secs: f32) -> Self {
        self.bypass_ramp_secs = secs;
        self
    }
}

pub fn validate_sample_rate(sample_rate: f64) -> Result<()> {
    if !(8000.0..=384000.0).contains(&sample_rate) {
        return Err(Error::InvalidSampleRate(sample_rate));
    }
    Ok(())
}

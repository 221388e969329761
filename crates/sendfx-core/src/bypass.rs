//! Click-free bypass crossfade.
//!
//! A [`Bypass`] blends between a dry path and a (gain-scaled) wet path. Toggling
//! bypass never jumps: the wet weight moves one step per sample over a fixed
//! ramp, so a full transition lasts exactly [`Bypass::ramp_samples`] samples.
//!
//! # Example
//!
//! ```
//! use sendfx_core::{Bypass, BYPASS_RAMP_TIME};
//!
//! let mut bypass = Bypass::new();
//! bypass.init(48000.0, BYPASS_RAMP_TIME);
//! bypass.set_bypass(true);
//!
//! let wet = [1.0f32; 512];
//! let mut out = [0.0f32; 512];
//! bypass.process_wet(&mut out, None, &wet, 0.5);
//!
//! // 5 ms at 48 kHz: silent from sample 240 onwards
//! assert!(out[0] > 0.49);
//! assert_eq!(out[239], 0.0);
//! assert!(bypass.is_bypassed());
//! ```

use crate::dsp::{fill_zero, mul_k3};
use serde::{Deserialize, Serialize};

/// Default crossfade duration in seconds.
pub const BYPASS_RAMP_TIME: f32 = 0.005;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BypassState {
    /// Wet path fully audible.
    Active,
    /// Dry path only.
    Bypassed,
    /// Ramping between the two.
    Fading,
}

/// Per-channel bypass crossfade.
///
/// The ramp position is an integer sample counter rather than an accumulated
/// float, so the endpoints are hit exactly and the wet weight never overshoots.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bypass {
    /// 0 = bypassed, `ramp_samples` = active.
    position: u32,
    ramp_samples: u32,
    bypassed: bool,
}

impl Bypass {
    /// Active, with a one-sample ramp until [`init`](Bypass::init) is called.
    pub fn new() -> Self {
        Self {
            position: 1,
            ramp_samples: 1,
            bypassed: false,
        }
    }

    /// Recompute the ramp length for a sample rate.
    ///
    /// The current wet weight is preserved, so this is safe to call mid-fade.
    pub fn init(&mut self, sample_rate: f64, time: f32) {
        let gain = self.gain();
        let len = ((sample_rate * time as f64).round() as u32).max(1);

        self.ramp_samples = len;
        self.position = ((gain * len as f32).round() as u32).min(len);
    }

    /// Sets the target state. Returns `true` if the target changed.
    #[inline]
    pub fn set_bypass(&mut self, bypass: bool) -> bool {
        let changed = self.bypassed != bypass;
        self.bypassed = bypass;
        changed
    }

    /// Jump to a state without ramping.
    pub fn set_immediate(&mut self, bypass: bool) {
        self.bypassed = bypass;
        self.position = self.target_position();
    }

    #[inline]
    pub fn is_bypassed(&self) -> bool {
        self.bypassed
    }

    #[inline]
    pub fn is_fading(&self) -> bool {
        self.position != self.target_position()
    }

    pub fn state(&self) -> BypassState {
        if self.is_fading() {
            BypassState::Fading
        } else if self.bypassed {
            BypassState::Bypassed
        } else {
            BypassState::Active
        }
    }

    /// Current wet weight in `[0, 1]`.
    #[inline]
    pub fn gain(&self) -> f32 {
        self.position as f32 / self.ramp_samples as f32
    }

    #[inline]
    pub fn ramp_samples(&self) -> u32 {
        self.ramp_samples
    }

    /// Samples left until the target is reached.
    #[inline]
    pub fn samples_remaining(&self) -> u32 {
        self.position.abs_diff(self.target_position())
    }

    #[inline]
    fn target_position(&self) -> u32 {
        if self.bypassed {
            0
        } else {
            self.ramp_samples
        }
    }

    #[inline]
    fn step(&mut self) {
        if self.bypassed {
            self.position = self.position.saturating_sub(1);
        } else if self.position < self.ramp_samples {
            self.position += 1;
        }
    }

    /// `dst = dry + (wet - dry) * k`, with `k` the ramped wet weight.
    #[inline]
    pub fn process(&mut self, dst: &mut [f32], dry: Option<&[f32]>, wet: &[f32]) {
        self.process_wet(dst, dry, wet, 1.0);
    }

    /// `dst = dry + (wet * gain - dry) * k`, with `k` the ramped wet weight.
    ///
    /// `dry = None` is silence. Processes the shortest of the given slices.
    pub fn process_wet(&mut self, dst: &mut [f32], dry: Option<&[f32]>, wet: &[f32], gain: f32) {
        let mut n = dst.len().min(wet.len());
        if let Some(dry) = dry {
            n = n.min(dry.len());
        }

        let mut i = 0;
        while i < n && self.is_fading() {
            self.step();
            let k = self.gain();
            let d = dry.map_or(0.0, |dry| dry[i]);
            dst[i] = d + (wet[i] * gain - d) * k;
            i += 1;
        }

        if i == n {
            return;
        }

        let dst = &mut dst[i..n];
        if !self.bypassed {
            mul_k3(dst, &wet[i..n], gain);
        } else if let Some(dry) = dry {
            dst.copy_from_slice(&dry[i..n]);
        } else {
            fill_zero(dst);
        }
    }
}

impl Default for Bypass {
    fn default() -> Self {
        Self::new()
    }
}

//! Parameter ranges for host controls.
//!
//! Provides normalized (0.0-1.0) ↔ real value conversion for automation, plus
//! the sanitizing step the send module applies to every control value it reads.
//!
//! # Example
//!
//! ```
//! use sendfx_core::ParameterRange;
//!
//! // Gain knob: -inf dB floor to +24 dB, default 0 dB
//! let gain = ParameterRange::gain_amp();
//!
//! assert_eq!(gain.sanitize(f32::NAN), 1.0);
//! assert_eq!(gain.sanitize(100.0), gain.max);
//! ```

use crate::gain::{SEND_GAIN_DFL, SEND_GAIN_MAX, SEND_GAIN_MIN, SEND_GAIN_STEP};
use serde::{Deserialize, Serialize};

/// How a parameter value is scaled between normalized (0-1) and real values.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum ParameterScale {
    /// `real = min + normalized * (max - min)`
    #[default]
    Linear,

    /// `real = min * (max/min)^normalized`
    ///
    /// Requires `min > 0`, which is why gain floors are never literal zero.
    Logarithmic,

    /// On/off toggle. Real values `>= 0.5` are on.
    Toggle,
}

/// Parameter range with scaling and step size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParameterRange {
    pub min: f32,
    pub max: f32,
    pub default: f32,
    /// Step in real units; `0.0` means continuous.
    pub step: f32,
    pub scale: ParameterScale,
}

impl ParameterRange {
    pub fn new(min: f32, max: f32, default: f32, scale: ParameterScale) -> Self {
        debug_assert!(max > min, "max must be greater than min");

        Self {
            min,
            max,
            default: default.clamp(min, max),
            step: 0.0,
            scale,
        }
    }

    pub fn linear(min: f32, max: f32, default: f32) -> Self {
        Self::new(min, max, default, ParameterScale::Linear)
    }

    /// # Panics
    ///
    /// Panics in debug mode if `min <= 0`.
    pub fn logarithmic(min: f32, max: f32, default: f32) -> Self {
        debug_assert!(min > 0.0, "logarithmic scale requires min > 0");
        Self::new(min, max, default, ParameterScale::Logarithmic)
    }

    pub fn toggle(default_on: bool) -> Self {
        Self::new(
            0.0,
            1.0,
            if default_on { 1.0 } else { 0.0 },
            ParameterScale::Toggle,
        )
    }

    /// Linear amplitude gain control: floor to +24 dB, default 0 dB, step 0.01.
    pub fn gain_amp() -> Self {
        Self::logarithmic(SEND_GAIN_MIN, SEND_GAIN_MAX, SEND_GAIN_DFL).with_step(SEND_GAIN_STEP)
    }

    pub fn with_step(mut self, step: f32) -> Self {
        self.step = step.max(0.0);
        self
    }

    /// Clamp to range; NaN maps to the default.
    #[inline]
    pub fn sanitize(&self, value: f32) -> f32 {
        if value.is_nan() {
            self.default
        } else {
            value.clamp(self.min, self.max)
        }
    }

    /// Snap to the step grid anchored at `min`.
    #[inline]
    pub fn quantize(&self, value: f32) -> f32 {
        let value = self.sanitize(value);
        if self.step <= 0.0 {
            return value;
        }
        let steps = ((value - self.min) / self.step).round();
        (self.min + steps * self.step).clamp(self.min, self.max)
    }

    #[inline]
    pub fn is_on(&self, value: f32) -> bool {
        value >= 0.5
    }

    #[inline]
    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }

    /// Convert a real value to normalized (0.0-1.0).
    #[inline]
    pub fn normalize(&self, value: f32) -> f32 {
        let value = self.sanitize(value);
        let range = self.max - self.min;

        if range <= 0.0 {
            return 0.0;
        }

        match self.scale {
            ParameterScale::Linear => (value - self.min) / range,

            ParameterScale::Logarithmic => {
                if self.min <= 0.0 {
                    (value - self.min) / range
                } else {
                    let log_min = self.min.ln();
                    let log_max = self.max.ln();
                    (value.ln() - log_min) / (log_max - log_min)
                }
            }

            ParameterScale::Toggle => {
                if self.is_on(value) {
                    1.0
                } else {
                    0.0
                }
            }
        }
    }

    /// Convert a normalized value (0.0-1.0) to a real value.
    #[inline]
    pub fn denormalize(&self, normalized: f32) -> f32 {
        let normalized = if normalized.is_nan() {
            self.normalize(self.default)
        } else {
            normalized.clamp(0.0, 1.0)
        };
        let range = self.max - self.min;

        match self.scale {
            ParameterScale::Linear => self.min + normalized * range,

            ParameterScale::Logarithmic => {
                if self.min <= 0.0 {
                    self.min + normalized * range
                } else {
                    let log_min = self.min.ln();
                    let log_max = self.max.ln();
                    (log_min + normalized * (log_max - log_min))
                        .exp()
                        .clamp(self.min, self.max)
                }
            }

            ParameterScale::Toggle => {
                if normalized >= 0.5 {
                    self.max
                } else {
                    self.min
                }
            }
        }
    }
}

impl Default for ParameterRange {
    fn default() -> Self {
        Self::gain_amp()
    }
}

//! Per-channel processing.

use crate::destination::SendDestination;
use crate::dump::ChannelDump;
use crate::metadata::{Capabilities, MeterRole};
use sendfx_core::{dsp, Bypass, MeterPort, GAIN_AMP_M_INF_DB};
use serde::Serialize;
use std::sync::Arc;

/// Buffers for one channel, borrowed for a single `process()` call.
///
/// `output` and the send destination are written independently; neither may
/// alias `input`, which the borrow rules already guarantee.
pub struct ChannelBuffers<'a> {
    pub input: &'a [f32],
    pub output: &'a mut [f32],
    pub send: Option<&'a mut dyn SendDestination>,
}

impl<'a> ChannelBuffers<'a> {
    pub fn new(input: &'a [f32], output: &'a mut [f32]) -> Self {
        Self {
            input,
            output,
            send: None,
        }
    }

    pub fn with_send(mut self, send: &'a mut dyn SendDestination) -> Self {
        self.send = Some(send);
        self
    }
}

/// Gain coefficients, recomputed once per settings refresh.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Gains {
    pub input: f32,
    pub output: f32,
    pub send: f32,
}

impl Gains {
    pub fn silent() -> Self {
        Self {
            input: GAIN_AMP_M_INF_DB,
            output: GAIN_AMP_M_INF_DB,
            send: GAIN_AMP_M_INF_DB,
        }
    }
}

impl Default for Gains {
    fn default() -> Self {
        Self::silent()
    }
}

#[derive(Debug, Default)]
pub(crate) struct Channel {
    pub(crate) bypass: Bypass,
    in_meter: Option<Arc<MeterPort>>,
    send_meter: Option<Arc<MeterPort>>,
    out_meter: Option<Arc<MeterPort>>,
}

impl Channel {
    pub(crate) fn bind_meter(&mut self, role: MeterRole, meter: Option<Arc<MeterPort>>) {
        match role {
            MeterRole::Input => self.in_meter = meter,
            MeterRole::Send => self.send_meter = meter,
            MeterRole::Output => self.out_meter = meter,
        }
    }

    pub(crate) fn unbind_meters(&mut self) {
        self.in_meter = None;
        self.send_meter = None;
        self.out_meter = None;
    }

    pub(crate) fn process(
        &mut self,
        io: &mut ChannelBuffers<'_>,
        samples: usize,
        gains: &Gains,
        caps: Capabilities,
    ) {
        let n = samples.min(io.input.len()).min(io.output.len());
        if n == 0 {
            return;
        }
        let input = &io.input[..n];

        let peak = if caps.metering {
            dsp::abs_max(input)
        } else {
            0.0
        };

        dsp::mul_k3(&mut io.output[..n], input, gains.output);

        if let Some(send) = io.send.as_deref_mut() {
            if send.is_active() {
                let dst = send.buffer_mut();
                let m = n.min(dst.len());
                if caps.crossfade {
                    self.bypass
                        .process_wet(&mut dst[..m], None, &input[..m], gains.send);
                } else {
                    dsp::mul_k3(&mut dst[..m], &input[..m], gains.send);
                }
            }
        }

        if caps.metering {
            if let Some(meter) = &self.in_meter {
                meter.set_value(peak * gains.input);
            }
            if let Some(meter) = &self.send_meter {
                meter.set_value(peak * gains.send);
            }
            if let Some(meter) = &self.out_meter {
                meter.set_value(peak * gains.output);
            }
        }
    }

    pub(crate) fn dump(&self) -> ChannelDump {
        ChannelDump {
            bypass_state: self.bypass.state(),
            bypass_gain: self.bypass.gain(),
            bypass_ramp_samples: self.bypass.ramp_samples(),
            in_meter: self.in_meter.as_ref().map(|m| m.value()),
            send_meter: self.send_meter.as_ref().map(|m| m.value()),
            out_meter: self.out_meter.as_ref().map(|m| m.value()),
        }
    }
}

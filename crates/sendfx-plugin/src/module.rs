//! The send plugin instance.

use crate::channel::{Channel, ChannelBuffers, Gains};
use crate::dump::StateDump;
use crate::error::{PluginError, Result};
use crate::metadata::{Capabilities, GainRole, PluginMetadata, PortKind};
use crate::port::Port;
use sendfx_core::config::validate_sample_rate;
use sendfx_core::{ControlPort, ParameterRange, SendConfig, GAIN_AMP_0_DB};
use std::sync::Arc;

/// A mono or stereo send effect.
///
/// Passes every input channel to its output scaled by the output gain and
/// writes an independently scaled copy to an optional send destination. The
/// three variants share this type and differ only in [`Capabilities`].
///
/// Lifecycle: [`new`](SendModule::new), [`init`](SendModule::init), then any
/// number of [`update_settings`](SendModule::update_settings) /
/// [`process`](SendModule::process) cycles, then [`destroy`](SendModule::destroy).
/// `update_settings` and `process` never allocate, lock or log.
///
/// # Example
///
/// ```
/// use sendfx_plugin::{send_mono, ChannelBuffers, PortMap, SendBuffer, SendModule};
///
/// let meta = send_mono();
/// let ports = PortMap::new(&meta).with_send_name("aux");
/// let mut module = SendModule::new(meta);
/// module.init(ports.ports()).unwrap();
///
/// ports.control("g_out").unwrap().set_value(0.5);
/// module.update_settings();
///
/// let input = [1.0f32; 64];
/// let mut output = [0.0f32; 64];
/// let mut send = [0.0f32; 64];
/// let mut dst = SendBuffer::active(&mut send);
/// module.process(&mut [ChannelBuffers::new(&input, &mut output).with_send(&mut dst)], 64);
///
/// assert_eq!(output[0], 0.5);
/// assert_eq!(send[0], 1.0);
/// ```
#[derive(Debug)]
pub struct SendModule {
    metadata: PluginMetadata,
    config: SendConfig,
    caps: Capabilities,
    n_channels: usize,
    channels: Vec<Channel>,
    gains: Gains,
    sample_rate: f64,

    bypass: Option<Arc<ControlPort>>,
    in_gain: Option<Arc<ControlPort>>,
    out_gain: Option<Arc<ControlPort>>,
    send_gain: Option<Arc<ControlPort>>,
    send_name: Option<String>,

    initialized: bool,
    settings_applied: bool,
}

/// Control ports collected while binding, committed only if binding succeeds.
#[derive(Default)]
struct Bound {
    bypass: Option<Arc<ControlPort>>,
    in_gain: Option<Arc<ControlPort>>,
    out_gain: Option<Arc<ControlPort>>,
    send_gain: Option<Arc<ControlPort>>,
    send_name: Option<String>,
}

impl SendModule {
    /// Create a module with the default [`SendConfig`].
    ///
    /// The channel count is taken from the audio inputs in `metadata`. If the
    /// channel array cannot be allocated the module stays inert and the
    /// failure is reported by [`init`](SendModule::init).
    pub fn new(metadata: PluginMetadata) -> Self {
        let config = SendConfig::default();
        let caps = metadata.capabilities();
        let n_channels = metadata.audio_inputs();

        let channels = match allocate(n_channels) {
            Ok(channels) => channels,
            Err(e) => {
                tracing::warn!("Send module {} left inert: {}", metadata.id, e);
                Vec::new()
            }
        };

        Self {
            metadata,
            config,
            caps,
            n_channels,
            channels,
            gains: Gains::silent(),
            sample_rate: config.sample_rate,
            bypass: None,
            in_gain: None,
            out_gain: None,
            send_gain: None,
            send_name: None,
            initialized: false,
            settings_applied: false,
        }
    }

    pub fn with_config(metadata: PluginMetadata, config: SendConfig) -> Result<Self> {
        config.validate()?;
        let mut module = Self::new(metadata);
        module.config = config;
        module.sample_rate = config.sample_rate;
        Ok(module)
    }

    /// Bind host ports, in [`PluginMetadata::ports`] order, and prepare the
    /// bypass ramps for the configured sample rate.
    ///
    /// On failure the module is left inert: `update_settings` and `process`
    /// become no-ops until a later `init` succeeds.
    pub fn init(&mut self, ports: Vec<Port>) -> Result<()> {
        match self.try_init(ports) {
            Ok(()) => {
                tracing::debug!(
                    "Initialized {} ({} channel(s), {} Hz)",
                    self.metadata.id,
                    self.channels.len(),
                    self.sample_rate
                );
                Ok(())
            }
            Err(e) => {
                tracing::warn!("Failed to initialize {}: {}", self.metadata.id, e);
                self.release();
                Err(e)
            }
        }
    }

    fn try_init(&mut self, ports: Vec<Port>) -> Result<()> {
        if self.channels.len() != self.n_channels {
            self.channels = allocate(self.n_channels)?;
        }

        let descriptors = &self.metadata.ports;
        if ports.len() != descriptors.len() {
            return Err(PluginError::PortCount {
                expected: descriptors.len(),
                found: ports.len(),
            });
        }

        for channel in &mut self.channels {
            channel.unbind_meters();
        }

        let mut bound = Bound::default();
        for (index, (desc, port)) in descriptors.iter().zip(ports).enumerate() {
            match (desc.kind, port) {
                (_, Port::Unbound) if desc.optional => {
                    tracing::trace!("Port {} ({}) left unbound", index, desc.id);
                }
                (PortKind::AudioIn | PortKind::AudioOut | PortKind::AudioSend { .. }, Port::Audio) => {
                    tracing::trace!("Bound audio port {} ({})", index, desc.id);
                }
                (PortKind::Bypass, Port::Control(control)) => {
                    tracing::trace!("Bound bypass control {} ({})", index, desc.id);
                    bound.bypass = Some(control);
                }
                (PortKind::Gain(role), Port::Control(control)) => {
                    tracing::trace!("Bound {:?} gain control {} ({})", role, index, desc.id);
                    match role {
                        GainRole::Input => bound.in_gain = Some(control),
                        GainRole::Output => bound.out_gain = Some(control),
                        GainRole::Send => bound.send_gain = Some(control),
                    }
                }
                (PortKind::SendName, Port::SendName(name)) => {
                    tracing::trace!("Bound send name {} ({}): {:?}", index, desc.id, name);
                    bound.send_name = Some(name);
                }
                (PortKind::Meter { channel, role, .. }, Port::Meter(meter)) => {
                    tracing::trace!("Bound meter {} ({})", index, desc.id);
                    if let Some(ch) = self.channels.get_mut(channel) {
                        ch.bind_meter(role, Some(meter));
                    }
                }
                _ => {
                    return Err(PluginError::PortMismatch {
                        index,
                        id: desc.id,
                        expected: desc.kind.tag(),
                    })
                }
            }
        }

        self.bypass = bound.bypass;
        self.in_gain = bound.in_gain;
        self.out_gain = bound.out_gain;
        self.send_gain = bound.send_gain;
        self.send_name = bound.send_name;

        let ramp = self.config.bypass_ramp_secs;
        for channel in &mut self.channels {
            channel.bypass.init(self.sample_rate, ramp);
        }

        self.gains = Gains::silent();
        self.settings_applied = false;
        self.initialized = true;
        Ok(())
    }

    /// Recompute the bypass ramp lengths. Channel state is kept, and a fade
    /// in progress continues from its current position.
    pub fn set_sample_rate(&mut self, sample_rate: f64) -> Result<()> {
        validate_sample_rate(sample_rate)?;
        tracing::debug!(
            "Sample rate for {}: {} -> {} Hz",
            self.metadata.id,
            self.sample_rate,
            sample_rate
        );

        self.sample_rate = sample_rate;
        let ramp = self.config.bypass_ramp_secs;
        for channel in &mut self.channels {
            channel.bypass.init(sample_rate, ramp);
        }
        Ok(())
    }

    /// Read the control ports and recompute the gain coefficients.
    ///
    /// Out-of-range or NaN knob values are clamped to the gain range. The
    /// first refresh after `init` applies the bypass state without a fade.
    pub fn update_settings(&mut self) {
        if self.channels.is_empty() || !self.initialized {
            return;
        }

        let toggle = ParameterRange::toggle(false);
        let range = ParameterRange::gain_amp();
        let knob = |port: &Option<Arc<ControlPort>>, unbound: f32| {
            port.as_ref()
                .map_or(unbound, |port| range.sanitize(port.value()))
        };

        let bypass = self
            .bypass
            .as_ref()
            .is_some_and(|port| toggle.is_on(port.value()));
        let in_knob = knob(&self.in_gain, GAIN_AMP_0_DB);
        let out_knob = knob(&self.out_gain, GAIN_AMP_0_DB);
        let send_knob = knob(&self.send_gain, GAIN_AMP_0_DB);

        let send = if bypass && !self.caps.crossfade {
            0.0
        } else {
            send_knob
        };

        self.gains = Gains {
            input: in_knob,
            output: out_knob * in_knob,
            send: send * in_knob,
        };

        for channel in &mut self.channels {
            if self.settings_applied {
                channel.bypass.set_bypass(bypass);
            } else {
                channel.bypass.set_immediate(bypass);
            }
        }
        self.settings_applied = true;
    }

    /// Process one block. `buffers` holds one entry per channel, in channel
    /// order; extra entries are ignored.
    pub fn process(&mut self, buffers: &mut [ChannelBuffers<'_>], samples: usize) {
        if samples == 0 || self.channels.is_empty() || !self.initialized {
            return;
        }

        let gains = self.gains;
        let caps = self.caps;
        for (channel, io) in self.channels.iter_mut().zip(buffers.iter_mut()) {
            channel.process(io, samples, &gains, caps);
        }
    }

    /// Release the channels and every bound port. Safe to call repeatedly.
    pub fn destroy(&mut self) {
        if self.initialized || !self.channels.is_empty() {
            tracing::debug!("Destroying {}", self.metadata.id);
        }
        self.release();
    }

    fn release(&mut self) {
        self.channels = Vec::new();
        self.bypass = None;
        self.in_gain = None;
        self.out_gain = None;
        self.send_gain = None;
        self.send_name = None;
        self.gains = Gains::silent();
        self.initialized = false;
        self.settings_applied = false;
    }

    /// Number of live channels. Zero once destroyed.
    pub fn channels(&self) -> usize {
        self.channels.len()
    }

    pub fn gains(&self) -> Gains {
        self.gains
    }

    pub fn capabilities(&self) -> Capabilities {
        self.caps
    }

    pub fn metadata(&self) -> &PluginMetadata {
        &self.metadata
    }

    pub fn config(&self) -> &SendConfig {
        &self.config
    }

    pub fn send_name(&self) -> Option<&str> {
        self.send_name.as_deref()
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    /// Snapshot every field for diagnostics.
    pub fn dump(&self) -> StateDump {
        let value = |port: &Option<Arc<ControlPort>>| port.as_ref().map(|p| p.value());

        StateDump {
            plugin: self.metadata.id.clone(),
            variant: self.metadata.variant,
            capabilities: self.caps,
            n_channels: self.n_channels,
            channels: self.channels.iter().map(Channel::dump).collect(),
            gains: self.gains,
            sample_rate: self.sample_rate,
            config: self.config,
            initialized: self.initialized,
            settings_applied: self.settings_applied,
            bypass: value(&self.bypass),
            in_gain: value(&self.in_gain),
            out_gain: value(&self.out_gain),
            send_gain: value(&self.send_gain),
            send_name: self.send_name.clone(),
        }
    }

    pub fn dump_json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self.dump())?)
    }
}

fn allocate(n: usize) -> Result<Vec<Channel>> {
    let mut channels = Vec::new();
    channels
        .try_reserve_exact(n)
        .map_err(|_| PluginError::AllocationFailed { channels: n })?;
    channels.extend((0..n).map(|_| Channel::default()));
    Ok(channels)
}

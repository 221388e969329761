//! Plugin metadata and port tables.
//!
//! Port order is part of the binding contract: a host hands ports to
//! [`SendModule::init`](crate::SendModule::init) in exactly the order of
//! [`PluginMetadata::ports`].
//!
//! Port identifiers are kept to 7 characters or fewer so they fit VST2
//! parameter name buffers.

use sendfx_core::{ParameterRange, GAIN_AMP_P_24_DB};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Release version of the send plugins, independent of the crate version.
pub const SEND_VERSION: &str = "1.0.0";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChannelLayout {
    Mono,
    Stereo,
}

impl ChannelLayout {
    pub fn channels(self) -> usize {
        match self {
            ChannelLayout::Mono => 1,
            ChannelLayout::Stereo => 2,
        }
    }
}

/// Scope of a send plugin build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Variant {
    /// No audio channels. Every operation is a no-op.
    Stub,
    /// Send only: bypass mutes the send gain directly, no meters, no crossfade.
    Reduced,
    /// Metered, with a per-channel bypass crossfade on the send path.
    Full,
}

impl Variant {
    pub fn capabilities(self) -> Capabilities {
        match self {
            Variant::Stub | Variant::Reduced => Capabilities {
                metering: false,
                crossfade: false,
            },
            Variant::Full => Capabilities {
                metering: true,
                crossfade: true,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capabilities {
    pub metering: bool,
    pub crossfade: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GainRole {
    Input,
    Output,
    Send,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MeterRole {
    Input,
    Send,
    Output,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PortKind {
    AudioIn,
    AudioOut,
    /// Toggle; `>= 0.5` is bypassed.
    Bypass,
    /// Linear amplitude knob, see [`ParameterRange::gain_amp`].
    Gain(GainRole),
    /// Send connection point name. Read once at binding.
    SendName,
    AudioSend { channel: usize },
    /// Block peak level, scaled by the matching gain.
    Meter {
        channel: usize,
        role: MeterRole,
        max: f32,
    },
}

/// Kind without payload, for error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortKindTag {
    Audio,
    Control,
    SendName,
    Meter,
}

impl fmt::Display for PortKindTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PortKindTag::Audio => write!(f, "an audio port"),
            PortKindTag::Control => write!(f, "a control port"),
            PortKindTag::SendName => write!(f, "a send name"),
            PortKindTag::Meter => write!(f, "a meter port"),
        }
    }
}

impl PortKind {
    pub fn tag(&self) -> PortKindTag {
        match self {
            PortKind::AudioIn | PortKind::AudioOut | PortKind::AudioSend { .. } => {
                PortKindTag::Audio
            }
            PortKind::Bypass | PortKind::Gain(_) => PortKindTag::Control,
            PortKind::SendName => PortKindTag::SendName,
            PortKind::Meter { .. } => PortKindTag::Meter,
        }
    }

    /// Value range for control ports.
    pub fn range(&self) -> Option<ParameterRange> {
        match self {
            PortKind::Bypass => Some(ParameterRange::toggle(false)),
            PortKind::Gain(_) => Some(ParameterRange::gain_amp()),
            _ => None,
        }
    }

    /// Initial value for control ports.
    pub fn default_value(&self) -> f32 {
        self.range().map_or(0.0, |range| range.default)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortDescriptor {
    pub id: &'static str,
    pub name: &'static str,
    pub kind: PortKind,
    /// May be left unbound.
    pub optional: bool,
}

impl PortDescriptor {
    fn new(id: &'static str, name: &'static str, kind: PortKind) -> Self {
        Self {
            id,
            name,
            kind,
            optional: false,
        }
    }

    fn meter(id: &'static str, name: &'static str, channel: usize, role: MeterRole) -> Self {
        Self {
            id,
            name,
            kind: PortKind::Meter {
                channel,
                role,
                max: GAIN_AMP_P_24_DB,
            },
            optional: true,
        }
    }
}

/// Static description of a send plugin.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PluginMetadata {
    pub id: String,
    pub name: String,
    /// Short host-facing acronym, e.g. `S1M`.
    pub acronym: String,
    /// Four-character plugin UID.
    pub uid: String,
    pub version: String,
    pub layout: ChannelLayout,
    pub variant: Variant,
    pub ports: Vec<PortDescriptor>,
}

impl PluginMetadata {
    /// Build the metadata and port table for a layout and variant.
    pub fn send(layout: ChannelLayout, variant: Variant) -> Self {
        let (suffix, layout_name) = match layout {
            ChannelLayout::Mono => ("m", "Mono"),
            ChannelLayout::Stereo => ("s", "Stereo"),
        };
        let variant_id = match variant {
            Variant::Full => "",
            Variant::Reduced => "_lite",
            Variant::Stub => "_stub",
        };

        Self {
            id: format!("send_{}{}", layout_name.to_lowercase(), variant_id),
            name: format!("Send {}", layout_name),
            acronym: format!("S1{}", suffix.to_uppercase()),
            uid: format!("s01{}", suffix),
            version: SEND_VERSION.to_string(),
            layout,
            variant,
            ports: Self::port_table(layout, variant),
        }
    }

    fn port_table(layout: ChannelLayout, variant: Variant) -> Vec<PortDescriptor> {
        let caps = variant.capabilities();
        let channels = match variant {
            Variant::Stub => 0,
            Variant::Reduced | Variant::Full => layout.channels(),
        };

        let mut ports = Vec::new();

        for &(id, name) in names_for(&AUDIO_IN, channels) {
            ports.push(PortDescriptor::new(id, name, PortKind::AudioIn));
        }
        for &(id, name) in names_for(&AUDIO_OUT, channels) {
            ports.push(PortDescriptor::new(id, name, PortKind::AudioOut));
        }

        ports.push(PortDescriptor::new("bypass", "Bypass", PortKind::Bypass));
        ports.push(PortDescriptor::new(
            "g_in",
            "Input gain",
            PortKind::Gain(GainRole::Input),
        ));
        if caps.metering {
            ports.push(PortDescriptor::new(
                "g_out",
                "Output gain",
                PortKind::Gain(GainRole::Output),
            ));
        }
        ports.push(PortDescriptor::new(
            "g_send",
            "Send gain",
            PortKind::Gain(GainRole::Send),
        ));
        ports.push(PortDescriptor::new(
            "send",
            "Audio send connection point name",
            PortKind::SendName,
        ));

        for (channel, &(id, name)) in names_for(&AUDIO_SEND, channels).iter().enumerate() {
            ports.push(PortDescriptor::new(id, name, PortKind::AudioSend { channel }));
        }

        if caps.metering {
            for (channel, meters) in names_for(&METERS, channels).iter().enumerate() {
                for (&(id, name), role) in meters.iter().zip(METER_ROLES) {
                    ports.push(PortDescriptor::meter(id, name, channel, role));
                }
            }
        }

        ports
    }

    /// Number of audio channels, counted from the audio input ports.
    pub fn audio_inputs(&self) -> usize {
        self.ports
            .iter()
            .filter(|p| p.kind == PortKind::AudioIn)
            .count()
    }

    pub fn capabilities(&self) -> Capabilities {
        self.variant.capabilities()
    }

    pub fn port(&self, id: &str) -> Option<&PortDescriptor> {
        self.ports.iter().find(|p| p.id == id)
    }

    pub fn port_index(&self, id: &str) -> Option<usize> {
        self.ports.iter().position(|p| p.id == id)
    }
}

type Names = (&'static str, &'static str);

/// Per-channel names for 1 or 2 channels.
fn names_for<T>(table: &'static [&'static [T]; 2], channels: usize) -> &'static [T] {
    match channels {
        0 => &[],
        n => table[n.min(2) - 1],
    }
}

static AUDIO_IN: [&[Names]; 2] = [
    &[("in", "Input")],
    &[("in_l", "Input left"), ("in_r", "Input right")],
];

static AUDIO_OUT: [&[Names]; 2] = [
    &[("out", "Output")],
    &[("out_l", "Output left"), ("out_r", "Output right")],
];

static AUDIO_SEND: [&[Names]; 2] = [
    &[("sout", "Audio send output")],
    &[
        ("sout_l", "Audio send output left"),
        ("sout_r", "Audio send output right"),
    ],
];

const METER_ROLES: [MeterRole; 3] = [MeterRole::Input, MeterRole::Send, MeterRole::Output];

static METERS: [&[[Names; 3]]; 2] = [
    &[[
        ("ilm", "Input level meter"),
        ("slm", "Send level meter"),
        ("olm", "Output level meter"),
    ]],
    &[
        [
            ("ilm_l", "Input level meter Left"),
            ("slm_l", "Send level meter Left"),
            ("olm_l", "Output level meter Left"),
        ],
        [
            ("ilm_r", "Input level meter Right"),
            ("slm_r", "Send level meter Right"),
            ("olm_r", "Output level meter Right"),
        ],
    ],
];

/// Metered mono send.
pub fn send_mono() -> PluginMetadata {
    PluginMetadata::send(ChannelLayout::Mono, Variant::Full)
}

/// Metered stereo send.
pub fn send_stereo() -> PluginMetadata {
    PluginMetadata::send(ChannelLayout::Stereo, Variant::Full)
}

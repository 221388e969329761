//! Port values handed to a module at binding time.
//!
//! Audio ports carry no data at binding: their buffers arrive with every
//! block through [`ChannelBuffers`](crate::ChannelBuffers). Controls and
//! meters are lock-free values shared between host and module.

use crate::metadata::{PluginMetadata, PortKind, PortKindTag};
use sendfx_core::{ControlPort, MeterPort};
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub enum Port {
    /// Input, output or send audio port.
    Audio,
    Control(Arc<ControlPort>),
    SendName(String),
    Meter(Arc<MeterPort>),
    /// Left unconnected by the host. Only legal for optional ports.
    Unbound,
}

impl Port {
    pub fn tag(&self) -> Option<PortKindTag> {
        match self {
            Port::Audio => Some(PortKindTag::Audio),
            Port::Control(_) => Some(PortKindTag::Control),
            Port::SendName(_) => Some(PortKindTag::SendName),
            Port::Meter(_) => Some(PortKindTag::Meter),
            Port::Unbound => None,
        }
    }
}

/// Host-side port set for one plugin instance.
///
/// Creates a port for every descriptor (controls start at their default
/// value) and keeps them addressable by id so a host can drive controls and
/// read meters after handing [`ports`](PortMap::ports) to the module.
///
/// # Example
///
/// ```
/// use sendfx_plugin::{send_mono, PortMap, SendModule};
///
/// let meta = send_mono();
/// let ports = PortMap::new(&meta).with_send_name("reverb");
/// let mut module = SendModule::new(meta);
/// module.init(ports.ports()).unwrap();
///
/// ports.control("g_send").unwrap().set_value(0.5);
/// module.update_settings();
/// assert_eq!(module.gains().send, 0.5);
/// ```
#[derive(Debug, Clone)]
pub struct PortMap {
    ids: Vec<&'static str>,
    ports: HashMap<&'static str, Port>,
}

impl PortMap {
    pub fn new(metadata: &PluginMetadata) -> Self {
        let mut ids = Vec::with_capacity(metadata.ports.len());
        let mut ports = HashMap::with_capacity(metadata.ports.len());

        for desc in &metadata.ports {
            let port = match desc.kind {
                PortKind::AudioIn | PortKind::AudioOut | PortKind::AudioSend { .. } => Port::Audio,
                PortKind::Bypass | PortKind::Gain(_) => {
                    Port::Control(Arc::new(ControlPort::new(desc.kind.default_value())))
                }
                PortKind::SendName => Port::SendName(String::new()),
                PortKind::Meter { .. } => Port::Meter(Arc::new(MeterPort::new())),
            };
            ids.push(desc.id);
            ports.insert(desc.id, port);
        }

        Self { ids, ports }
    }

    pub fn with_send_name(mut self, name: impl Into<String>) -> Self {
        let slot = self
            .ids
            .iter()
            .copied()
            .find(|id| matches!(self.ports.get(id), Some(Port::SendName(_))));
        if let Some(id) = slot {
            self.ports.insert(id, Port::SendName(name.into()));
        }
        self
    }

    /// Disconnect an optional port (e.g. a meter the host does not display).
    pub fn unbind(&mut self, id: &str) -> bool {
        match self.ports.get_mut(id) {
            Some(port) => {
                *port = Port::Unbound;
                true
            }
            None => false,
        }
    }

    pub fn control(&self, id: &str) -> Option<Arc<ControlPort>> {
        match self.ports.get(id) {
            Some(Port::Control(port)) => Some(Arc::clone(port)),
            _ => None,
        }
    }

    pub fn meter(&self, id: &str) -> Option<Arc<MeterPort>> {
        match self.ports.get(id) {
            Some(Port::Meter(port)) => Some(Arc::clone(port)),
            _ => None,
        }
    }

    /// Ports in declaration order, ready for binding.
    pub fn ports(&self) -> Vec<Port> {
        self.ids
            .iter()
            .map(|id| self.ports.get(id).cloned().unwrap_or(Port::Unbound))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

//! Audio send plugin.
//!
//! A send passes each input channel to its output and writes an independently
//! scaled copy to a shared bus, typically feeding an effect return elsewhere
//! in the graph.
//!
//! - [`PluginMetadata`]: mono/stereo port tables, in binding order
//! - [`PortMap`]: host-side ports handed to [`SendModule::init`]
//! - [`SendModule`]: gain staging, click-free bypass and metering
//! - [`SharedSendBus`]: memory-mapped send destination
//!
//! ## Usage
//!
//! ```
//! use sendfx_plugin::{ChannelBuffers, PluginFactory, PortMap, SendBuffer};
//!
//! let factory = PluginFactory::new();
//! let mut module = factory.create("send_stereo")?;
//! let ports = PortMap::new(module.metadata()).with_send_name("reverb");
//! module.init(ports.ports())?;
//!
//! ports.control("g_send").unwrap().set_value(0.5);
//! module.update_settings();
//!
//! let (left, right) = ([0.5f32; 128], [-0.25f32; 128]);
//! let (mut out_l, mut out_r) = ([0.0f32; 128], [0.0f32; 128]);
//! let (mut send_l, mut send_r) = ([0.0f32; 128], [0.0f32; 128]);
//! let mut dst_l = SendBuffer::active(&mut send_l);
//! let mut dst_r = SendBuffer::active(&mut send_r);
//!
//! module.process(
//!     &mut [
//!         ChannelBuffers::new(&left, &mut out_l).with_send(&mut dst_l),
//!         ChannelBuffers::new(&right, &mut out_r).with_send(&mut dst_r),
//!     ],
//!     128,
//! );
//!
//! assert_eq!(send_l[0], 0.25);
//! assert_eq!(ports.meter("ilm_r").unwrap().value(), 0.25);
//! # Ok::<(), sendfx_plugin::PluginError>(())
//! ```

pub mod error;
pub use error::{PluginError, Result};

mod metadata;
pub use metadata::{
    send_mono, send_stereo, Capabilities, ChannelLayout, GainRole, MeterRole, PluginMetadata,
    PortDescriptor, PortKind, PortKindTag, Variant, SEND_VERSION,
};

mod port;
pub use port::{Port, PortMap};

mod destination;
pub use destination::{SendBuffer, SendDestination};

mod channel;
pub use channel::{ChannelBuffers, Gains};

mod dump;
pub use dump::{ChannelDump, StateDump};

mod module;
pub use module::SendModule;

mod factory;
pub use factory::PluginFactory;

mod shared_memory;
pub use shared_memory::SharedSendBus;

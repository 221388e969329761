//! Memory-mapped send bus.
//!
//! The producer (the send module's host) creates a named region; consumers in
//! the same or another process open it by name and `connect()`. The bus is
//! active while at least one consumer is connected.
//!
//! Layout: a 64-byte header followed by `channels * capacity` f32 samples,
//! one contiguous run per channel.
//!
//! | offset | field          |
//! |--------|----------------|
//! | 0      | magic          |
//! | 4      | version        |
//! | 8      | channels       |
//! | 12     | capacity       |
//! | 16     | consumer count |

use crate::destination::SendBuffer;
use crate::error::{PluginError, Result};
use memmap2::MmapMut;
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU32, Ordering};

const MAGIC: u32 = 0x5346_5842; // "SFXB"
const VERSION: u32 = 1;
const HEADER_SIZE: usize = 64;

const MAGIC_OFFSET: usize = 0;
const VERSION_OFFSET: usize = 4;
const CHANNELS_OFFSET: usize = 8;
const CAPACITY_OFFSET: usize = 12;
const CONSUMERS_OFFSET: usize = 16;

pub struct SharedSendBus {
    mmap: MmapMut,
    name: String,
    channels: usize,
    capacity: usize,
    /// Creator owns the backing file and removes it on drop.
    owns_memory: bool,
    connected: bool,
}

impl SharedSendBus {
    /// Create a bus for `channels` channels of up to `capacity` samples per block.
    pub fn create(name: impl Into<String>, channels: usize, capacity: usize) -> Result<Self> {
        let name = name.into();
        if u32::try_from(channels).is_err() || u32::try_from(capacity).is_err() {
            return Err(invalid_geometry(channels, capacity));
        }
        let size = bus_size(channels, capacity)?;
        let path = Self::shm_path(&name);

        let mut options = OpenOptions::new();
        options.read(true).write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }

        let file = options.open(&path).map_err(|e| {
            PluginError::SharedMemory(format!("Failed to create shared memory file: {}", e))
        })?;
        file.set_len(size as u64)?;

        // SAFETY: the file was just created with the right size and is only
        // mapped through this type.
        let mut mmap = unsafe { MmapMut::map_mut(&file) }.map_err(|e| {
            PluginError::SharedMemory(format!("Failed to create memory map: {}", e))
        })?;

        write_u32(&mut mmap, MAGIC_OFFSET, MAGIC);
        write_u32(&mut mmap, VERSION_OFFSET, VERSION);
        write_u32(&mut mmap, CHANNELS_OFFSET, channels as u32);
        write_u32(&mut mmap, CAPACITY_OFFSET, capacity as u32);
        write_u32(&mut mmap, CONSUMERS_OFFSET, 0);

        tracing::debug!(
            "Created send bus '{}' ({} channel(s), {} samples)",
            name,
            channels,
            capacity
        );

        Ok(Self {
            mmap,
            name,
            channels,
            capacity,
            owns_memory: true,
            connected: false,
        })
    }

    /// Open an existing bus. Geometry is read from its header.
    pub fn open(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        let path = Self::shm_path(&name);

        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(&path)
            .map_err(|e| {
                PluginError::SharedMemory(format!("Failed to open shared memory file: {}", e))
            })?;

        // SAFETY: the header is validated below before any sample access.
        let mmap = unsafe { MmapMut::map_mut(&file) }.map_err(|e| {
            PluginError::SharedMemory(format!("Failed to open memory map: {}", e))
        })?;

        if mmap.len() < HEADER_SIZE || read_u32(&mmap, MAGIC_OFFSET) != MAGIC {
            return Err(PluginError::SharedMemory(format!(
                "'{}' is not a send bus",
                name
            )));
        }
        let version = read_u32(&mmap, VERSION_OFFSET);
        if version != VERSION {
            return Err(PluginError::SharedMemory(format!(
                "Unsupported send bus version {}",
                version
            )));
        }

        let channels = read_u32(&mmap, CHANNELS_OFFSET) as usize;
        let capacity = read_u32(&mmap, CAPACITY_OFFSET) as usize;
        if mmap.len() < bus_size(channels, capacity)? {
            return Err(PluginError::SharedMemory(format!(
                "Send bus '{}' is truncated",
                name
            )));
        }

        Ok(Self {
            mmap,
            name,
            channels,
            capacity,
            owns_memory: false,
            connected: false,
        })
    }

    fn shm_path(name: &str) -> PathBuf {
        #[cfg(target_os = "linux")]
        let base = PathBuf::from("/dev/shm");

        #[cfg(not(target_os = "linux"))]
        let base = std::env::temp_dir();

        base.join(format!("sendfx_{}", name))
    }

    fn consumers(&self) -> &AtomicU32 {
        // SAFETY: the mapping is page aligned, the offset is 4-byte aligned and
        // inside the header, and the count is only accessed atomically.
        unsafe { &*(self.mmap.as_ptr().add(CONSUMERS_OFFSET) as *const AtomicU32) }
    }

    /// Register this handle as a consumer. Idempotent per handle.
    pub fn connect(&mut self) {
        if !self.connected {
            self.consumers().fetch_add(1, Ordering::AcqRel);
            self.connected = true;
        }
    }

    pub fn disconnect(&mut self) {
        if self.connected {
            let _ = self
                .consumers()
                .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| n.checked_sub(1));
            self.connected = false;
        }
    }

    /// Some consumer is connected.
    pub fn is_active(&self) -> bool {
        self.consumers().load(Ordering::Acquire) > 0
    }

    fn samples_mut(&mut self) -> &mut [f32] {
        let len = self.channels * self.capacity;
        let bytes = &mut self.mmap[HEADER_SIZE..HEADER_SIZE + len * std::mem::size_of::<f32>()];
        // SAFETY: the region is inside the mapping, f32-aligned (page aligned
        // base + 64-byte header) and every bit pattern is a valid f32.
        unsafe { std::slice::from_raw_parts_mut(bytes.as_mut_ptr() as *mut f32, len) }
    }

    fn samples(&self) -> &[f32] {
        let len = self.channels * self.capacity;
        let bytes = &self.mmap[HEADER_SIZE..HEADER_SIZE + len * std::mem::size_of::<f32>()];
        // SAFETY: see samples_mut.
        unsafe { std::slice::from_raw_parts(bytes.as_ptr() as *const f32, len) }
    }

    /// One destination per channel for the current block.
    ///
    /// The activity flag is sampled once here, so a consumer connecting
    /// mid-block takes effect on the next block.
    pub fn channel_buffers(&mut self) -> impl Iterator<Item = SendBuffer<'_>> {
        let active = self.is_active();
        let capacity = self.capacity;
        self.samples_mut()
            .chunks_exact_mut(capacity)
            .map(move |chunk| SendBuffer::new(chunk, active))
    }

    /// Consumer side: copy a channel into `output`. Returns samples copied.
    pub fn read_channel_into(&self, channel: usize, output: &mut [f32]) -> Result<usize> {
        if channel >= self.channels {
            return Err(PluginError::SharedMemory(
                "Channel index out of bounds".to_string(),
            ));
        }
        let start = channel * self.capacity;
        let n = self.capacity.min(output.len());
        output[..n].copy_from_slice(&self.samples()[start..start + n]);
        Ok(n)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl std::fmt::Debug for SharedSendBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedSendBus")
            .field("name", &self.name)
            .field("channels", &self.channels)
            .field("capacity", &self.capacity)
            .field("owns_memory", &self.owns_memory)
            .field("connected", &self.connected)
            .finish()
    }
}

impl Drop for SharedSendBus {
    fn drop(&mut self) {
        self.disconnect();
        if self.owns_memory {
            let _ = std::fs::remove_file(Self::shm_path(&self.name));
        }
    }
}

/// Mapping size for a geometry. Rejects empty and overflowing geometries.
fn bus_size(channels: usize, capacity: usize) -> Result<usize> {
    if channels == 0 || capacity == 0 {
        return Err(invalid_geometry(channels, capacity));
    }
    channels
        .checked_mul(capacity)
        .and_then(|samples| samples.checked_mul(std::mem::size_of::<f32>()))
        .and_then(|bytes| bytes.checked_add(HEADER_SIZE))
        .ok_or_else(|| invalid_geometry(channels, capacity))
}

fn invalid_geometry(channels: usize, capacity: usize) -> PluginError {
    PluginError::SharedMemory(format!(
        "Invalid bus geometry: {} channel(s) x {} sample(s)",
        channels, capacity
    ))
}

fn write_u32(mmap: &mut MmapMut, offset: usize, value: u32) {
    mmap[offset..offset + 4].copy_from_slice(&value.to_ne_bytes());
}

fn read_u32(mmap: &MmapMut, offset: usize) -> u32 {
    let mut bytes = [0u8; 4];
    bytes.copy_from_slice(&mmap[offset..offset + 4]);
    u32::from_ne_bytes(bytes)
}

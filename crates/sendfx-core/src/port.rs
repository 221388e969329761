//! Lock-free control and meter ports.
//!
//! The host owns the values and shares them with a module as `Arc`s. Controls
//! flow host → module and are read once per settings refresh; meters flow
//! module → host and are overwritten every block ("last value wins").

use atomic_float::AtomicF32;
use core::sync::atomic::Ordering;

/// Host-written control value. Cache-line aligned.
#[derive(Debug)]
#[repr(align(64))]
pub struct ControlPort {
    value: AtomicF32,
}

impl ControlPort {
    pub fn new(value: f32) -> Self {
        Self {
            value: AtomicF32::new(value),
        }
    }

    #[inline]
    pub fn value(&self) -> f32 {
        self.value.load(Ordering::Acquire)
    }

    #[inline]
    pub fn set_value(&self, value: f32) {
        self.value.store(value, Ordering::Release);
    }
}

impl Default for ControlPort {
    fn default() -> Self {
        Self::new(0.0)
    }
}

/// Module-written level meter. Cache-line aligned.
#[derive(Debug)]
#[repr(align(64))]
pub struct MeterPort {
    level: AtomicF32,
}

impl MeterPort {
    pub fn new() -> Self {
        Self {
            level: AtomicF32::new(0.0),
        }
    }

    /// Called from the audio thread.
    #[inline]
    pub fn set_value(&self, level: f32) {
        self.level.store(level, Ordering::Relaxed);
    }

    #[inline]
    pub fn value(&self) -> f32 {
        self.level.load(Ordering::Relaxed)
    }
}

impl Default for MeterPort {
    fn default() -> Self {
        Self::new()
    }
}

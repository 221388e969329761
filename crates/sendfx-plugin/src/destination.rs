//! Send destinations.
//!
//! A destination is a shared audio bus owned outside the module. It may lose
//! or gain its consumer between any two blocks, so the module asks
//! [`is_active`](SendDestination::is_active) on every block and never writes
//! to an inactive destination.

pub trait SendDestination {
    /// A live consumer is connected.
    fn is_active(&self) -> bool;

    /// Writable buffer for the current block.
    fn buffer_mut(&mut self) -> &mut [f32];
}

/// Host-supplied destination: a borrowed block buffer plus its activity flag.
#[derive(Debug)]
pub struct SendBuffer<'a> {
    data: &'a mut [f32],
    active: bool,
}

impl<'a> SendBuffer<'a> {
    pub fn new(data: &'a mut [f32], active: bool) -> Self {
        Self { data, active }
    }

    pub fn active(data: &'a mut [f32]) -> Self {
        Self::new(data, true)
    }

    pub fn inactive(data: &'a mut [f32]) -> Self {
        Self::new(data, false)
    }

    pub fn as_slice(&self) -> &[f32] {
        self.data
    }
}

impl SendDestination for SendBuffer<'_> {
    #[inline]
    fn is_active(&self) -> bool {
        self.active
    }

    #[inline]
    fn buffer_mut(&mut self) -> &mut [f32] {
        self.data
    }
}

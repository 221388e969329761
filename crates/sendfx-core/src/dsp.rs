//! Block DSP helpers used on the audio thread.
//!
//! All functions are allocation-free and operate on the shorter of the slices
//! they are given.

/// Peak magnitude of a block. `0.0` for an empty block.
#[inline]
pub fn abs_max(src: &[f32]) -> f32 {
    src.iter().fold(0.0f32, |peak, &s| peak.max(s.abs()))
}

/// `dst[i] = src[i] * k`
#[inline]
pub fn mul_k3(dst: &mut [f32], src: &[f32], k: f32) {
    for (d, &s) in dst.iter_mut().zip(src) {
        *d = s * k;
    }
}

#[inline]
pub fn fill_zero(dst: &mut [f32]) {
    dst.fill(0.0);
}

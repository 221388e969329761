//! Gain constants and decibel conversion.
//!
//! Silence is represented by [`GAIN_AMP_M_INF_DB`], a -150 dB floor, so that
//! gain coefficients stay out of the log domain's singularity and never
//! produce `-inf`/NaN when converted back to decibels.

/// "-inf dB" amplitude floor (-150 dB).
pub const GAIN_AMP_M_INF_DB: f32 = 3.162_277_7e-8;

/// Unity gain.
pub const GAIN_AMP_0_DB: f32 = 1.0;

/// +24 dB amplitude.
pub const GAIN_AMP_P_24_DB: f32 = 15.848_932;

/// Decibel value of [`GAIN_AMP_M_INF_DB`].
pub const GAIN_DB_FLOOR: f32 = -150.0;

/// Send gain control bounds.
pub const SEND_GAIN_MIN: f32 = GAIN_AMP_M_INF_DB;
pub const SEND_GAIN_MAX: f32 = GAIN_AMP_P_24_DB;
pub const SEND_GAIN_DFL: f32 = GAIN_AMP_0_DB;
pub const SEND_GAIN_STEP: f32 = 0.01;

#[inline]
pub fn db_to_gain(db: f32) -> f32 {
    if db <= GAIN_DB_FLOOR {
        return GAIN_AMP_M_INF_DB;
    }
    10.0f32.powf(db / 20.0)
}

/// Clamps at [`GAIN_DB_FLOOR`] for zero, negative and NaN input.
#[inline]
pub fn gain_to_db(gain: f32) -> f32 {
    if gain.is_nan() || gain <= GAIN_AMP_M_INF_DB {
        return GAIN_DB_FLOOR;
    }
    20.0 * gain.log10()
}

//! Test helpers and fixtures for sendfx integration tests
//!
//! ## Tolerance Levels
//!
//! Use the appropriate tolerance from [`tolerances`] module:
//! - `FLOAT_EPSILON` (1e-6): Exact operations (passthrough, unity gain)
//! - `DSP_EPSILON` (1e-4): Gain products and crossfades
//! - `SILENCE_THRESHOLD` (0.0001): Silence detection (-80dB)
#![allow(dead_code)]


use sendfx::prelude::*;

/// Default test sample rate (matches common hardware)
pub const TEST_SAMPLE_RATE: f64 = 48000.0;

/// Standard buffer size for deterministic testing
pub const TEST_BUFFER_SIZE: usize = 512;

/// Bypass ramp length at [`TEST_SAMPLE_RATE`] with the default 5 ms ramp.
pub const TEST_RAMP_SAMPLES: usize = 240;

/// Install a test-writer subscriber once per test binary.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing_subscriber::filter::LevelFilter::TRACE)
        .try_init();
}

/// A module bound to a fresh [`PortMap`], ready to process.
pub struct Fixture {
    pub module: SendModule,
    pub ports: PortMap,
}

impl Fixture {
    pub fn new(metadata: PluginMetadata) -> Self {
        init_tracing();
        let ports = PortMap::new(&metadata).with_send_name("test_bus");
        let mut module = SendModule::new(metadata);
        module
            .init(ports.ports())
            .expect("Failed to initialize test module");
        Self { module, ports }
    }

    pub fn mono() -> Self {
        Self::new(send_mono())
    }

    pub fn stereo() -> Self {
        Self::new(send_stereo())
    }

    pub fn variant(layout: ChannelLayout, variant: Variant) -> Self {
        Self::new(PluginMetadata::send(layout, variant))
    }

    /// Set a control port by id.
    pub fn set(&self, id: &str, value: f32) {
        self.ports
            .control(id)
            .unwrap_or_else(|| panic!("No control port {}", id))
            .set_value(value);
    }

    pub fn meter(&self, id: &str) -> f32 {
        self.ports
            .meter(id)
            .unwrap_or_else(|| panic!("No meter port {}", id))
            .value()
    }

    /// Run one mono block, returning (output, send).
    pub fn run_mono(&mut self, input: &[f32]) -> (Vec<f32>, Vec<f32>) {
        let mut output = vec![0.0; input.len()];
        let mut send = vec![0.0; input.len()];
        let mut dst = SendBuffer::active(&mut send);
        self.module.process(
            &mut [ChannelBuffers::new(input, &mut output).with_send(&mut dst)],
            input.len(),
        );
        (output, send)
    }
}

/// Generate a test signal: sine wave at given frequency for specified samples.
pub fn generate_sine(frequency: f64, sample_rate: f64, num_samples: usize) -> Vec<f32> {
    (0..num_samples)
        .map(|i| {
            let t = i as f64 / sample_rate;
            (2.0 * std::f64::consts::PI * frequency * t).sin() as f32
        })
        .collect()
}

/// Generate a constant (DC) block.
pub fn constant(value: f32, num_samples: usize) -> Vec<f32> {
    vec![value; num_samples]
}

/// Calculate RMS of a signal.
pub fn rms(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum_sq: f32 = samples.iter().map(|s| s * s).sum();
    (sum_sq / samples.len() as f32).sqrt()
}

/// Calculate peak amplitude of a signal.
pub fn peak(samples: &[f32]) -> f32 {
    samples.iter().fold(0.0f32, |max, &s| max.max(s.abs()))
}

/// Largest absolute difference between consecutive samples.
pub fn max_step(samples: &[f32]) -> f32 {
    samples
        .windows(2)
        .map(|w| (w[1] - w[0]).abs())
        .fold(0.0, f32::max)
}

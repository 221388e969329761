//! Bypass crossfade integration tests
//!
//! The send path fades over exactly the ramp length and never steps by more
//! than one ramp increment per sample.

use crate::helpers::tolerances::*;
use crate::helpers::*;
use proptest::prelude::*;
use sendfx::prelude::BypassState;

const STEP: f32 = 1.0 / TEST_RAMP_SAMPLES as f32;

fn settled() -> Fixture {
    let mut fx = Fixture::mono();
    fx.module.update_settings();
    fx
}

#[test]
fn test_fade_out_takes_ramp_length() {
    let mut fx = settled();
    fx.set("bypass", 1.0);
    fx.module.update_settings();

    let (output, send) = fx.run_mono(&constant(1.0, TEST_BUFFER_SIZE));

    assert!(send[TEST_RAMP_SAMPLES - 2] > 0.0, "faded out too soon");
    assert_eq!(send[TEST_RAMP_SAMPLES - 1], 0.0);
    assert!(send[TEST_RAMP_SAMPLES..].iter().all(|&s| s == 0.0));
    assert!(max_step(&send) <= STEP + FLOAT_EPSILON);
    assert!(output.iter().all(|&s| s == 1.0));
}

#[test]
fn test_fade_in_takes_ramp_length() {
    let mut fx = settled();
    fx.set("bypass", 1.0);
    fx.module.update_settings();
    fx.run_mono(&constant(1.0, TEST_BUFFER_SIZE));

    fx.set("bypass", 0.0);
    fx.module.update_settings();
    let (_, send) = fx.run_mono(&constant(1.0, TEST_BUFFER_SIZE));

    assert!(send[TEST_RAMP_SAMPLES - 2] < 1.0, "faded in too soon");
    assert_eq!(send[TEST_RAMP_SAMPLES - 1], 1.0);
    assert!(max_step(&send) <= STEP + FLOAT_EPSILON);
}

#[test]
fn test_fade_spans_blocks() {
    let mut fx = settled();
    fx.set("bypass", 1.0);
    fx.module.update_settings();

    let mut send = Vec::new();
    for _ in 0..8 {
        send.extend(fx.run_mono(&constant(1.0, 64)).1);
    }
    assert_eq!(send[TEST_RAMP_SAMPLES - 1], 0.0);
    assert!(send[TEST_RAMP_SAMPLES - 2] > 0.0);
    assert!(max_step(&send) <= STEP + FLOAT_EPSILON);
}

#[test]
fn test_reversal_mid_fade() {
    let mut fx = settled();
    fx.set("bypass", 1.0);
    fx.module.update_settings();
    let (_, first) = fx.run_mono(&constant(1.0, 100));

    fx.set("bypass", 0.0);
    fx.module.update_settings();
    let (_, second) = fx.run_mono(&constant(1.0, TEST_BUFFER_SIZE));

    let send: Vec<f32> = first.into_iter().chain(second).collect();
    assert!(max_step(&send) <= STEP + FLOAT_EPSILON);
    assert_eq!(*send.last().unwrap(), 1.0);
}

#[test]
fn test_first_update_does_not_fade() {
    let mut fx = Fixture::mono();
    fx.set("bypass", 1.0);
    fx.module.update_settings();
    assert_eq!(fx.module.dump().channels[0].bypass_state, BypassState::Bypassed);

    let (output, send) = fx.run_mono(&constant(1.0, 16));
    assert!(send.iter().all(|&s| s == 0.0));
    assert!(output.iter().all(|&s| s == 1.0));
}

proptest! {
    #[test]
    fn toggling_never_clicks(
        blocks in prop::collection::vec((1usize..300, any::<bool>()), 1..24),
        g_send in 0.1f32..2.0,
    ) {
        let mut fx = settled();
        fx.set("g_send", g_send);
        fx.module.update_settings();

        let mut send = Vec::new();
        for (len, bypass) in blocks {
            fx.set("bypass", if bypass { 1.0 } else { 0.0 });
            fx.module.update_settings();
            send.extend(fx.run_mono(&constant(1.0, len)).1);
        }

        prop_assert!(max_step(&send) <= g_send * STEP + DSP_EPSILON);
        prop_assert!(send.iter().all(|&s| (0.0..=g_send + FLOAT_EPSILON).contains(&s)));
    }
}

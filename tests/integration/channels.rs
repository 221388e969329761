//! Stereo channel independence tests

use crate::helpers::tolerances::*;
use crate::helpers::*;
use approx::assert_abs_diff_eq;
use sendfx::prelude::*;

fn run_stereo(
    fx: &mut Fixture,
    left: &[f32],
    right: &[f32],
    left_active: bool,
) -> [Vec<f32>; 4] {
    let n = left.len();
    let (mut out_l, mut out_r) = (vec![0.0; n], vec![0.0; n]);
    let (mut send_l, mut send_r) = (vec![-1.0; n], vec![-1.0; n]);
    let mut dst_l = SendBuffer::new(&mut send_l, left_active);
    let mut dst_r = SendBuffer::active(&mut send_r);

    fx.module.process(
        &mut [
            ChannelBuffers::new(left, &mut out_l).with_send(&mut dst_l),
            ChannelBuffers::new(right, &mut out_r).with_send(&mut dst_r),
        ],
        n,
    );
    [out_l, out_r, send_l, send_r]
}

#[test]
fn test_left_input_does_not_reach_right() {
    let mut fx = Fixture::stereo();
    fx.module.update_settings();

    let right = generate_sine(440.0, TEST_SAMPLE_RATE, TEST_BUFFER_SIZE);
    let quiet = run_stereo(&mut fx, &constant(0.0, TEST_BUFFER_SIZE), &right, true);
    let loud = run_stereo(&mut fx, &constant(1.0, TEST_BUFFER_SIZE), &right, true);

    assert_eq!(quiet[1], loud[1]);
    assert_eq!(quiet[3], loud[3]);
    assert_ne!(quiet[0], loud[0]);
}

#[test]
fn test_inactive_left_send_leaves_right_alone() {
    let mut fx = Fixture::stereo();
    fx.module.update_settings();

    let input = constant(0.5, 64);
    let [out_l, out_r, send_l, send_r] = run_stereo(&mut fx, &input, &input, false);

    assert!(send_l.iter().all(|&s| s == -1.0));
    assert!(send_r.iter().all(|&s| s == 0.5));
    assert_eq!(out_l, out_r);
}

#[test]
fn test_per_channel_meters() {
    let mut fx = Fixture::stereo();
    fx.module.update_settings();

    run_stereo(&mut fx, &constant(0.8, 32), &constant(-0.2, 32), true);

    assert_abs_diff_eq!(fx.meter("ilm_l"), 0.8, epsilon = FLOAT_EPSILON);
    assert_abs_diff_eq!(fx.meter("ilm_r"), 0.2, epsilon = FLOAT_EPSILON);
    assert_abs_diff_eq!(fx.meter("olm_r"), 0.2, epsilon = FLOAT_EPSILON);
}

#[test]
fn test_missing_right_buffers_are_skipped() {
    let mut fx = Fixture::stereo();
    fx.module.update_settings();

    let input = constant(0.5, 16);
    let mut output = vec![0.0; 16];
    fx.module
        .process(&mut [ChannelBuffers::new(&input, &mut output)], 16);

    assert!(output.iter().all(|&s| s == 0.5));
    assert_eq!(fx.meter("ilm_r"), 0.0);
}

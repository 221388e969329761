//! Metering integration tests
//!
//! Block peak levels published to the meter ports.

use crate::helpers::tolerances::*;
use crate::helpers::*;
use approx::assert_abs_diff_eq;
use sendfx::prelude::*;

const BLOCK: [f32; 3] = [0.1, -0.9, 0.3];

#[test]
fn test_input_meter_peak() {
    let mut fx = Fixture::mono();
    fx.module.update_settings();
    fx.run_mono(&BLOCK);

    assert_abs_diff_eq!(fx.meter("ilm"), 0.9, epsilon = FLOAT_EPSILON);
}

#[test]
fn test_input_gain_halves_meters() {
    let mut fx = Fixture::mono();
    fx.set("g_in", 0.5);
    fx.module.update_settings();
    fx.run_mono(&BLOCK);

    assert_abs_diff_eq!(fx.meter("ilm"), 0.45, epsilon = FLOAT_EPSILON);
    assert_abs_diff_eq!(fx.meter("slm"), 0.45, epsilon = FLOAT_EPSILON);
    assert_abs_diff_eq!(fx.meter("olm"), 0.45, epsilon = FLOAT_EPSILON);
}

#[test]
fn test_meters_follow_their_gains() {
    let mut fx = Fixture::mono();
    fx.set("g_out", 2.0);
    fx.set("g_send", 0.25);
    fx.module.update_settings();
    fx.run_mono(&BLOCK);

    assert_abs_diff_eq!(fx.meter("ilm"), 0.9, epsilon = FLOAT_EPSILON);
    assert_abs_diff_eq!(fx.meter("slm"), 0.225, epsilon = FLOAT_EPSILON);
    assert_abs_diff_eq!(fx.meter("olm"), 1.8, epsilon = FLOAT_EPSILON);
}

#[test]
fn test_last_block_wins() {
    let mut fx = Fixture::mono();
    fx.module.update_settings();
    fx.run_mono(&BLOCK);
    fx.run_mono(&constant(0.2, 16));

    assert_abs_diff_eq!(fx.meter("ilm"), 0.2, epsilon = FLOAT_EPSILON);
}

#[test]
fn test_meters_without_send_destination() {
    let mut fx = Fixture::mono();
    fx.module.update_settings();

    let input = generate_sine(100.0, TEST_SAMPLE_RATE, TEST_BUFFER_SIZE);
    let mut output = vec![0.0; TEST_BUFFER_SIZE];
    fx.module
        .process(&mut [ChannelBuffers::new(&input, &mut output)], TEST_BUFFER_SIZE);

    assert_abs_diff_eq!(fx.meter("ilm"), peak(&input), epsilon = FLOAT_EPSILON);
    assert_abs_diff_eq!(fx.meter("slm"), peak(&input), epsilon = FLOAT_EPSILON);
}

#[test]
fn test_unbound_meters_are_skipped() {
    init_tracing();
    let meta = send_mono();
    let mut ports = PortMap::new(&meta);
    for id in ["ilm", "slm", "olm"] {
        assert!(ports.unbind(id));
    }
    let mut module = SendModule::new(meta);
    module.init(ports.ports()).unwrap();
    module.update_settings();

    let input = constant(0.5, 32);
    let mut output = vec![0.0; 32];
    module.process(&mut [ChannelBuffers::new(&input, &mut output)], 32);

    let dump = module.dump();
    assert_eq!(dump.channels[0].in_meter, None);
    assert_eq!(dump.channels[0].out_meter, None);
    assert!(output.iter().all(|&s| s == 0.5));
}

#[test]
fn test_reduced_variant_has_no_meters() {
    let mut fx = Fixture::variant(ChannelLayout::Mono, Variant::Reduced);
    assert!(fx.ports.meter("ilm").is_none());
    assert!(fx.ports.control("g_out").is_none());

    fx.module.update_settings();
    let (output, send) = fx.run_mono(&BLOCK);
    assert_eq!(output, BLOCK);
    assert_eq!(send, BLOCK);
}

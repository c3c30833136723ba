use super::*;
use proptest::prelude::*;

#[test]
fn forward_scenario() {
    let output = fake_quantize_per_tensor_affine(
        &[0.2_f32, 0.6, -0.4, 300.0],
        1.0,
        0,
        0,
        255,
        0,
        0,
    )
    .unwrap();
    assert_eq!(output, vec![0.0, 1.0, 0.0, 255.0]);
}

#[test]
fn backward_scenario() {
    let output = fake_quantize_per_tensor_affine_backward(
        &[1.0_f32, 1.0, 1.0, 1.0],
        &[0.2, 0.6, -0.4, 300.0],
        1.0,
        0,
        0,
        255,
        0,
        0,
    )
    .unwrap();
    assert_eq!(output, vec![1.0, 1.0, 1.0, 0.0]);
}

#[test]
fn forward_empty() {
    let config = QuantizationConfig::new(1.0, 0);
    let output = forward::<f32>(&[], &config, &DelayState::new()).unwrap();
    assert!(output.is_empty());
}

#[test]
fn backward_shapes() {
    let config = QuantizationConfig::new(1.0, 0);
    let delay = DelayState::new();

    assert_eq!(
        backward::<f32>(&[], &[], &config, &delay),
        Err(Error::EmptyInput)
    );
    assert_eq!(
        backward(&[1.0, 2.0], &[1.0], &config, &delay),
        Err(Error::SizeMismatch { input: 1, grad: 2 })
    );

    // The shapes are checked even if the gate is suppressed
    let delay = DelayState::new().with_quant_delay(3).with_iter(1);
    assert_eq!(
        backward(&[1.0, 2.0], &[1.0], &config, &delay),
        Err(Error::SizeMismatch { input: 1, grad: 2 })
    );
}

#[test]
fn scalar_errors_before_shape_errors() {
    let config = QuantizationConfig::new(1.0, -2);
    let delay = DelayState::new();

    assert_eq!(
        backward::<f64>(&[], &[], &config, &delay),
        Err(Error::InvalidZeroPoint(-2))
    );
    assert_eq!(
        backward::<f64>(
            &[],
            &[],
            &QuantizationConfig::new(1.0, 0),
            &delay.with_quant_delay(1).with_iter(-1)
        ),
        Err(Error::InvalidIteration {
            iter: -1,
            quant_delay: 1
        })
    );
}

#[test]
fn delay_pass_through() {
    let config = QuantizationConfig::new(0.0, 7).with_quant_max(8);
    let delay = DelayState::new().with_quant_delay(5).with_iter(5);
    let input = [0.3_f32, -1.7, 1e9, f32::NAN];

    let output = forward(&input, &config, &delay).unwrap();
    assert_eq!(output[..3], [0.3_f32 as f64, -1.7_f32 as f64, 1e9]);
    assert!(output[3].is_nan());

    let grad = [0.5_f32, -0.25, 4.0, 1.0];
    let output = backward(&grad, &input, &config, &delay).unwrap();
    assert_eq!(output, vec![0.5, -0.25, 4.0, 1.0]);

    let output = forward(&input, &config, &delay.with_iter(6)).unwrap();
    assert_ne!(output[0], 0.3_f32 as f64);
}

#[test]
fn zero_point_outside_range() {
    // z = 300 lies above q_max, every value saturates at q_max
    let config = QuantizationConfig::new(1.0, 300);
    let delay = DelayState::new();
    let output = forward(&[-1.0, 0.0, 1.0], &config, &delay).unwrap();
    assert_eq!(output, vec![-45.0, -45.0, -45.0]);

    let input = [-45.0, -44.4, -46.0];
    let output = backward(&[1.0; 3], &input, &config, &delay).unwrap();
    assert_eq!(output, vec![1.0, 0.0, 1.0]);
}

fn expected_error(
    config: &QuantizationConfig,
    delay: &DelayState,
) -> Option<Error> {
    if config.quant_min > config.quant_max {
        Some(Error::InvalidRange {
            quant_min: config.quant_min,
            quant_max: config.quant_max,
        })
    } else if config.zero_point < 0 {
        Some(Error::InvalidZeroPoint(config.zero_point))
    } else if delay.quant_delay < 0 {
        Some(Error::InvalidDelay(delay.quant_delay))
    } else if delay.quant_delay != 0 && delay.iter < 0 {
        Some(Error::InvalidIteration {
            iter: delay.iter,
            quant_delay: delay.quant_delay,
        })
    } else {
        None
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_validation(
        zero_point in -4_i64..4,
        quant_min in -4_i64..4,
        quant_max in -4_i64..4,
        quant_delay in -4_i64..4,
        iter in -4_i64..4,
    ) {
        let config = QuantizationConfig {
            scale: 1.0,
            zero_point,
            quant_min,
            quant_max,
        };
        let delay = DelayState { quant_delay, iter };
        let input = [0.5_f64, -0.5];

        let target = expected_error(&config, &delay);
        prop_assert_eq!(
            forward(&input, &config, &delay).err(),
            target.to_owned()
        );
        prop_assert_eq!(
            backward(&input, &input, &config, &delay).err(),
            target
        );
    }

    #[test]
    fn prop_delay_pass_through(
        (quant_delay, iter) in
            (1_i64..1000).prop_flat_map(|d| (Just(d), 0..=d)),
        scale in -10.0_f64..10.0,
        zero_point in 0_i64..300,
        values in prop::collection::vec(-1e3_f32..1e3, 1..64),
    ) {
        let config = QuantizationConfig::new(scale, zero_point);
        let delay = DelayState { quant_delay, iter };
        let values_f64 = values.iter().map(|&v| v as f64).collect::<Vec<_>>();

        let output = forward(&values, &config, &delay).unwrap();
        prop_assert_eq!(output, values_f64.to_owned());

        let grad = values.iter().rev().copied().collect::<Vec<_>>();
        let grad_f64 = values_f64.into_iter().rev().collect::<Vec<_>>();
        let output = backward(&grad, &values, &config, &delay).unwrap();
        prop_assert_eq!(output, grad_f64);
    }

    #[test]
    fn prop_forward_idempotent(
        scale in 1e-2_f64..10.0,
        zero_point in 0_i64..256,
        quant_min in -128_i64..=0,
        quant_max in 0_i64..=300,
        values in prop::collection::vec(-1e3_f64..1e3, 1..64),
    ) {
        let config = QuantizationConfig {
            scale,
            zero_point,
            quant_min,
            quant_max,
        };
        let delay = DelayState::new();

        let once = forward(&values, &config, &delay).unwrap();
        let twice = forward(&once, &config, &delay).unwrap();
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn prop_forward_bounded(
        scale in 1e-2_f64..10.0,
        zero_point in 0_i64..16,
        values in prop::collection::vec(-1e3_f64..1e3, 1..64),
    ) {
        let config =
            QuantizationConfig::new(scale, zero_point).with_quant_max(15);
        let output = forward(&values, &config, &DelayState::new()).unwrap();

        let lower = (0 - zero_point) as f64 * scale;
        let upper = (15 - zero_point) as f64 * scale;
        prop_assert_eq!(output.len(), values.len());
        for value in output {
            prop_assert!(
                value >= lower && value <= upper,
                "{} not in [{}, {}]",
                value,
                lower,
                upper
            );
        }
    }

    #[test]
    fn prop_gradient_mask(
        scale_exp in -2_i32..=2,
        zero_point in 0_i64..8,
        quant_min in -8_i64..=0,
        quant_max in 0_i64..=8,
        levels in prop::collection::vec((-20_i64..20, -8_i64..8), 1..64),
    ) {
        // x = (m + r) * s with r in [-0.5, 0.5) rounds to m exactly
        let scale = 2.0_f64.powi(scale_exp);
        let config = QuantizationConfig {
            scale,
            zero_point,
            quant_min,
            quant_max,
        };
        let input = levels
            .iter()
            .map(|&(m, r)| (m as f64 + r as f64 / 16.0) * scale)
            .collect::<Vec<_>>();
        let grad = (1..=levels.len()).map(|g| g as f64).collect::<Vec<_>>();

        let delay = DelayState::new();
        let output = backward(&grad, &input, &config, &delay).unwrap();
        for ((&(m, _), g), dx) in levels.iter().zip(grad).zip(output) {
            let q = m + zero_point;
            if q >= quant_min && q <= quant_max {
                prop_assert_eq!(dx, g);
            } else {
                prop_assert_eq!(dx, 0.0);
            }
        }
    }
}

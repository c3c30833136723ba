pub use super::*;

use rayon::prelude::*;

/// Mask the upstream gradient with the straight-through estimator.
///
/// `dX = dY` where `q_min <= floor(X / s + 0.5) + z <= q_max`, otherwise `0`.
///
/// The parameters and shapes are not validated
/// and the delay gate is not consulted.
/// The output has the length of the shorter slice.
pub fn backward_active<E: ToElement + Sync>(
    grad: &[E],
    input: &[E],
    config: &QuantizationConfig,
) -> Vec<f64> {
    let kernel = AffineKernel::new(config);

    grad.par_iter()
        .zip(input.par_iter())
        .map(|(grad, input)| {
            // The saturation is decided before clamping
            let input_quantized = kernel.quantize_unclamped(input.to_f64());
            if kernel.is_unsaturated(input_quantized) {
                grad.to_f64()
            } else {
                0.0
            }
        })
        .collect()
}

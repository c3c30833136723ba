//! Fake quantization with the per-tensor affine scheme.
//!
//! The forward pass simulates the rounding and clamping of integer quantization
//! on real values. The backward pass propagates gradients with the
//! straight-through estimator.

pub mod backward;
pub mod config;
pub mod forward;
pub mod gate;
pub mod validate;

pub use crate::error::Error;
pub use backward::backward_active;
pub use burn::tensor::cast::ToElement;
pub use config::*;
pub use forward::{forward_active, AffineKernel};
pub use gate::DelayGate;
pub use validate::{validate, validate_shapes};

/// Fake-quantize the input values.
///
/// `Y = (clamp(floor(X / s + 0.5) + z, q_min, q_max) - z) * s`
///
/// If the delay gate is suppressed, `Y` is a copy of `X`.
///
/// ## Example
///
/// ```rust
/// use fake_quantize::quantize::{forward, DelayState, QuantizationConfig};
///
/// let config = QuantizationConfig::new(1.0, 0);
/// let delay = DelayState::new();
///
/// let output = forward(&[0.2, 0.6, -0.4, 300.0], &config, &delay).unwrap();
/// assert_eq!(output, vec![0.0, 1.0, 0.0, 255.0]);
/// ```
pub fn forward<E: ToElement + Sync>(
    input: &[E],
    config: &QuantizationConfig,
    delay: &DelayState,
) -> Result<Vec<f64>, Error> {
    #[cfg(debug_assertions)]
    log::debug!(
        target: "fake_quantize::quantize::forward",
        "start ({} elements)",
        input.len(),
    );

    validate(config, delay)?;

    let output = if DelayGate::new(delay).is_active() {
        forward_active(input, config)
    } else {
        input.iter().map(ToElement::to_f64).collect()
    };

    Ok(output)
}

/// Compute the gradient of the input values.
///
/// `dX = dY` where `q_min <= floor(X / s + 0.5) + z <= q_max`, otherwise `0`.
///
/// If the delay gate is suppressed, `dX` is a copy of `dY`.
///
/// ## Example
///
/// ```rust
/// use fake_quantize::quantize::{backward, DelayState, QuantizationConfig};
///
/// let config = QuantizationConfig::new(1.0, 0);
/// let delay = DelayState::new();
///
/// let grad = [1.0; 4];
/// let input = [0.2, 0.6, -0.4, 300.0];
/// let output = backward(&grad, &input, &config, &delay).unwrap();
/// assert_eq!(output, vec![1.0, 1.0, 1.0, 0.0]);
/// ```
pub fn backward<E: ToElement + Sync>(
    grad: &[E],
    input: &[E],
    config: &QuantizationConfig,
    delay: &DelayState,
) -> Result<Vec<f64>, Error> {
    #[cfg(debug_assertions)]
    log::debug!(
        target: "fake_quantize::quantize::backward",
        "start ({} elements)",
        input.len(),
    );

    validate(config, delay)?;
    validate_shapes(input.len(), grad.len())?;

    let output = if DelayGate::new(delay).is_active() {
        backward_active(grad, input, config)
    } else {
        grad.iter().map(ToElement::to_f64).collect()
    };

    Ok(output)
}

/// [`forward`] with scalar arguments.
pub fn fake_quantize_per_tensor_affine<E: ToElement + Sync>(
    input: &[E],
    scale: f64,
    zero_point: i64,
    quant_min: i64,
    quant_max: i64,
    quant_delay: i64,
    iter: i64,
) -> Result<Vec<f64>, Error> {
    let config = QuantizationConfig {
        scale,
        zero_point,
        quant_min,
        quant_max,
    };
    let delay = DelayState { quant_delay, iter };
    forward(input, &config, &delay)
}

/// [`backward`] with scalar arguments.
#[allow(clippy::too_many_arguments)]
pub fn fake_quantize_per_tensor_affine_backward<E: ToElement + Sync>(
    grad: &[E],
    input: &[E],
    scale: f64,
    zero_point: i64,
    quant_min: i64,
    quant_max: i64,
    quant_delay: i64,
    iter: i64,
) -> Result<Vec<f64>, Error> {
    let config = QuantizationConfig {
        scale,
        zero_point,
        quant_min,
        quant_max,
    };
    let delay = DelayState { quant_delay, iter };
    backward(grad, input, &config, &delay)
}

#[cfg(test)]
mod tests;

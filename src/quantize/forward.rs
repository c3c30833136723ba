pub use super::*;

use rayon::prelude::*;

/// The elementwise arithmetic of per-tensor affine quantization in `f64`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AffineKernel {
    /// `s`
    pub scale: f64,
    /// `1 / s`
    pub scale_inv: f64,
    /// `z`
    pub zero_point: f64,
    /// `q_min`
    pub quant_min: f64,
    /// `q_max`
    pub quant_max: f64,
}

impl AffineKernel {
    pub fn new(config: &QuantizationConfig) -> Self {
        Self {
            scale: config.scale,
            scale_inv: 1.0 / config.scale,
            zero_point: config.zero_point as f64,
            quant_min: config.quant_min as f64,
            quant_max: config.quant_max as f64,
        }
    }

    /// `floor(x / s + 0.5) + z`
    ///
    /// Ties round up, e.g. `-0.5` goes to `0` and `2.5` goes to `3`.
    #[inline]
    pub fn quantize_unclamped(
        &self,
        x: f64,
    ) -> f64 {
        (x * self.scale_inv + 0.5).floor() + self.zero_point
    }

    /// Clamp `q` to `[q_min, q_max]`, lower bound first.
    ///
    /// `NaN` passes through.
    #[inline]
    pub fn clamp(
        &self,
        q: f64,
    ) -> f64 {
        if q < self.quant_min {
            self.quant_min
        } else if q > self.quant_max {
            self.quant_max
        } else {
            q
        }
    }

    /// `(clamp(floor(x / s + 0.5) + z) - z) * s`
    #[inline]
    pub fn fake_quantize(
        &self,
        x: f64,
    ) -> f64 {
        (self.clamp(self.quantize_unclamped(x)) - self.zero_point) * self.scale
    }

    /// `q_min <= q <= q_max`
    #[inline]
    pub fn is_unsaturated(
        &self,
        q: f64,
    ) -> bool {
        q >= self.quant_min && q <= self.quant_max
    }
}

/// Fake-quantize every element of `input`.
///
/// The parameters are not validated and the delay gate is not consulted.
pub fn forward_active<E: ToElement + Sync>(
    input: &[E],
    config: &QuantizationConfig,
) -> Vec<f64> {
    let kernel = AffineKernel::new(config);

    input
        .par_iter()
        .map(|x| kernel.fake_quantize(x.to_f64()))
        .collect()
}

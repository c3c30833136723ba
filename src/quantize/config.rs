pub use crate::preset::range::QuantRange;
pub use burn::config::Config;

/// The parameters of per-tensor affine quantization.
///
/// `q = round(x / scale) + zero_point`, `x' = (q - zero_point) * scale`
#[derive(Config, Copy, Debug, PartialEq)]
pub struct QuantizationConfig {
    /// Real-valued step size per integer unit.
    pub scale: f64,
    /// Integer offset corresponding to the real value `0`.
    ///
    /// It should be non-negative.
    pub zero_point: i64,
    /// Inclusive lower bound of the quantized range.
    #[config(default = 0)]
    pub quant_min: i64,
    /// Inclusive upper bound of the quantized range.
    #[config(default = 255)]
    pub quant_max: i64,
}

/// The state for delaying quantization at the beginning of training.
#[derive(Config, Copy, Debug, PartialEq)]
pub struct DelayState {
    /// Count of iterations for which quantization is suppressed.
    #[config(default = 0)]
    pub quant_delay: i64,
    /// Current iteration.
    #[config(default = 0)]
    pub iter: i64,
}

impl QuantizationConfig {
    /// Replace both bounds with the preset `range`.
    ///
    /// ## Example
    ///
    /// ```rust
    /// use fake_quantize::{preset::range::QINT8, quantize::QuantizationConfig};
    ///
    /// let config = QuantizationConfig::new(0.5, 0).with_range(QINT8);
    /// assert_eq!(config.quant_min, -128);
    /// assert_eq!(config.quant_max, 127);
    /// ```
    #[inline]
    pub fn with_range(
        mut self,
        range: QuantRange,
    ) -> Self {
        self.quant_min = range.min;
        self.quant_max = range.max;
        self
    }
}

impl Default for DelayState {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

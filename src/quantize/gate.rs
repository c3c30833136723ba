pub use super::*;

/// Whether quantization applies at the current iteration.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum DelayGate {
    Active,
    /// The values and gradients pass through unchanged.
    Suppressed,
}

impl DelayGate {
    /// `Suppressed` if `quant_delay > 0` and `iter <= quant_delay`.
    ///
    /// ## Example
    ///
    /// ```rust
    /// use fake_quantize::quantize::{DelayGate, DelayState};
    ///
    /// let delay = DelayState::new().with_quant_delay(2);
    /// assert_eq!(DelayGate::new(&delay.with_iter(2)), DelayGate::Suppressed);
    /// assert_eq!(DelayGate::new(&delay.with_iter(3)), DelayGate::Active);
    /// ```
    pub fn new(delay: &DelayState) -> Self {
        if delay.quant_delay > 0 && delay.iter <= delay.quant_delay {
            #[cfg(debug_assertions)]
            log::debug!(
                target: "fake_quantize::quantize::gate",
                "suppressed ({} / {})",
                delay.iter,
                delay.quant_delay,
            );

            return Self::Suppressed;
        }

        Self::Active
    }

    #[inline]
    pub const fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }
}

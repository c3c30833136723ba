/// Inclusive bounds of a quantized integer range.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct QuantRange {
    pub min: i64,
    pub max: i64,
}

/// Unsigned 8-bit, `[0, 255]`.
pub const QUINT8: QuantRange = QuantRange { min: 0, max: 255 };

/// Signed 8-bit, `[-128, 127]`.
pub const QINT8: QuantRange = QuantRange {
    min: i8::MIN as i64,
    max: i8::MAX as i64,
};

/// Signed 32-bit.
pub const QINT32: QuantRange = QuantRange {
    min: i32::MIN as i64,
    max: i32::MAX as i64,
};

/// The maximum bit width of the derived ranges.
pub const BITS_MAX: u32 = 32;

impl QuantRange {
    /// `[0, 2^bits - 1]`
    ///
    /// ## Example
    ///
    /// ```rust
    /// use fake_quantize::preset::range::{QuantRange, QUINT8};
    ///
    /// assert_eq!(QuantRange::unsigned(8), Some(QUINT8));
    /// assert_eq!(
    ///     QuantRange::unsigned(4),
    ///     Some(QuantRange { min: 0, max: 15 })
    /// );
    /// assert_eq!(QuantRange::unsigned(0), None);
    /// ```
    pub const fn unsigned(bits: u32) -> Option<Self> {
        if bits == 0 || bits > BITS_MAX {
            return None;
        }
        Some(Self {
            min: 0,
            max: (1 << bits) - 1,
        })
    }

    /// `[-2^(bits - 1), 2^(bits - 1) - 1]`
    ///
    /// ## Example
    ///
    /// ```rust
    /// use fake_quantize::preset::range::{QuantRange, QINT32, QINT8};
    ///
    /// assert_eq!(QuantRange::signed(8), Some(QINT8));
    /// assert_eq!(QuantRange::signed(32), Some(QINT32));
    /// assert_eq!(QuantRange::signed(33), None);
    /// ```
    pub const fn signed(bits: u32) -> Option<Self> {
        if bits == 0 || bits > BITS_MAX {
            return None;
        }
        let half = 1_i64 << (bits - 1);
        Some(Self {
            min: -half,
            max: half - 1,
        })
    }
}

use super::{DelayState, Error, QuantizationConfig};

/// Check the consistency of the parameters.
///
/// The checks run in a fixed order and the first failure is returned.
///
/// `scale` is not checked. A zero `scale` propagates `inf` and `NaN`
/// through the arithmetic.
pub fn validate(
    config: &QuantizationConfig,
    delay: &DelayState,
) -> Result<(), Error> {
    if config.quant_min > config.quant_max {
        return Err(Error::InvalidRange {
            quant_min: config.quant_min,
            quant_max: config.quant_max,
        });
    }
    if config.zero_point < 0 {
        return Err(Error::InvalidZeroPoint(config.zero_point));
    }
    if delay.quant_delay < 0 {
        return Err(Error::InvalidDelay(delay.quant_delay));
    }
    if delay.quant_delay != 0 && delay.iter < 0 {
        return Err(Error::InvalidIteration {
            iter: delay.iter,
            quant_delay: delay.quant_delay,
        });
    }

    Ok(())
}

/// Check the element counts for the backward path.
pub fn validate_shapes(
    input_len: usize,
    grad_len: usize,
) -> Result<(), Error> {
    if input_len == 0 {
        return Err(Error::EmptyInput);
    }
    if input_len != grad_len {
        return Err(Error::SizeMismatch {
            input: input_len,
            grad: grad_len,
        });
    }

    Ok(())
}

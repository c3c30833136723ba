#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error(
        "Validation Error: `quant_min` should be less than or equal to \
        `quant_max`, but got quant_min = {quant_min} \
        and quant_max = {quant_max}"
    )]
    InvalidRange { quant_min: i64, quant_max: i64 },

    #[error(
        "Validation Error: `zero_point` should be non-negative, but got {0}"
    )]
    InvalidZeroPoint(i64),

    #[error(
        "Validation Error: `quant_delay` should be non-negative, but got {0}"
    )]
    InvalidDelay(i64),

    #[error(
        "Validation Error: `iter` should be non-negative for non-zero \
        `quant_delay`, but got iter = {iter} \
        and quant_delay = {quant_delay}"
    )]
    InvalidIteration { iter: i64, quant_delay: i64 },

    #[error("Validation Error: `input` should not be empty")]
    EmptyInput,

    #[error(
        "Validation Error: `input` and `grad` should have the same size, \
        but got input.len() = {input} and grad.len() = {grad}"
    )]
    SizeMismatch { input: usize, grad: usize },
}

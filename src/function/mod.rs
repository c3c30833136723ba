//! Fake quantization on `burn` tensors.
//!
//! [`fake_quantize`] and [`fake_quantize_backward`] work on any backend.
//! [`fake_quantize_autodiff`] registers the straight-through gradient in the
//! autodiff graph.

pub use crate::{
    error::Error,
    preset::backend::{Autodiff, Backend},
    quantize::{self, DelayState, QuantizationConfig},
};
pub use burn::tensor::{Shape, Tensor, TensorData, TensorPrimitive};

use burn::backend::autodiff::{
    checkpoint::{base::Checkpointer, strategy::NoCheckpointing},
    grads::Gradients,
    ops::{Backward, Ops, OpsKind},
};
use std::marker;

#[derive(Clone, Copy, Debug, Default)]
struct FakeQuantizeBackward<B: Backend, const D: usize> {
    __: marker::PhantomData<B>,
}

#[derive(Clone, Debug)]
struct FakeQuantizeBackwardState<B: Backend> {
    pub config: QuantizationConfig,
    pub delay: DelayState,
    /// The forward input.
    pub input: B::FloatTensorPrimitive,
}

/// Fake-quantize the input tensor.
///
/// The output has the shape and device of the input.
///
/// ## Example
///
/// ```rust
/// use burn::backend::NdArray;
/// use fake_quantize::{
///     function::{fake_quantize, Tensor},
///     quantize::{DelayState, QuantizationConfig},
/// };
///
/// let device = Default::default();
/// let config = QuantizationConfig::new(0.5, 0).with_quant_max(4);
///
/// let input =
///     Tensor::<NdArray, 2>::from_data([[0.2, 0.3], [1.0, 9.0]], &device);
/// let output = fake_quantize(input, &config, &DelayState::new()).unwrap();
/// let target =
///     Tensor::<NdArray, 2>::from_data([[0.0, 0.5], [1.0, 2.0]], &device);
/// output.into_data().assert_eq(&target.into_data(), true);
/// ```
pub fn fake_quantize<B: Backend, const D: usize>(
    input: Tensor<B, D>,
    config: &QuantizationConfig,
    delay: &DelayState,
) -> Result<Tensor<B, D>, Error> {
    let device = input.device();
    let shape = input.shape();

    let output = quantize::forward(&read_values(input), config, delay)?;

    Ok(write_values(output, shape, &device))
}

/// Compute the gradient of the input tensor
/// with the straight-through estimator.
///
/// `grad` is the gradient of the output.
pub fn fake_quantize_backward<B: Backend, const D: usize>(
    grad: Tensor<B, D>,
    input: Tensor<B, D>,
    config: &QuantizationConfig,
    delay: &DelayState,
) -> Result<Tensor<B, D>, Error> {
    let device = grad.device();
    let shape = grad.shape();

    let output = quantize::backward(
        &read_values(grad),
        &read_values(input),
        config,
        delay,
    )?;

    Ok(write_values(output, shape, &device))
}

/// Fake-quantize the input tensor with gradient tracking.
///
/// The gradient of the input is computed by [`fake_quantize_backward`].
/// There is no gradient for `scale` or `zero_point`.
pub fn fake_quantize_autodiff<B: Backend, const D: usize>(
    input: Tensor<Autodiff<B>, D>,
    config: &QuantizationConfig,
    delay: &DelayState,
) -> Result<Tensor<Autodiff<B>, D>, Error> {
    let input = input.into_primitive().tensor();

    let output = fake_quantize::<B, D>(
        Tensor::from_primitive(TensorPrimitive::Float(
            input.primitive.to_owned(),
        )),
        config,
        delay,
    )?
    .into_primitive()
    .tensor();

    let output = match FakeQuantizeBackward::<B, D>::default()
        .prepare::<NoCheckpointing>([input.node])
        .compute_bound()
        .stateful()
    {
        OpsKind::Tracked(prep) => prep.finish(
            FakeQuantizeBackwardState {
                config: *config,
                delay: *delay,
                input: input.primitive,
            },
            output,
        ),
        OpsKind::UnTracked(prep) => prep.finish(output),
    };

    Ok(Tensor::from_primitive(TensorPrimitive::Float(output)))
}

impl<B: Backend, const D: usize> Backward<B, 1> for FakeQuantizeBackward<B, D> {
    type State = FakeQuantizeBackwardState<B>;

    fn backward(
        self,
        ops: Ops<Self::State, 1>,
        grads: &mut Gradients,
        _checkpointer: &mut Checkpointer,
    ) {
        #[cfg(debug_assertions)]
        log::debug!(
            target: "fake_quantize::function",
            "FakeQuantizeBackward::backward",
        );

        let output_grad = grads.consume::<B>(&ops.node);

        let input_node_id = match &ops.parents[0] {
            Some(node) => node.id,
            None => return,
        };
        let state = ops.state;

        let output_grad =
            Tensor::<B, D>::from_primitive(TensorPrimitive::Float(output_grad));
        let input =
            Tensor::<B, D>::from_primitive(TensorPrimitive::Float(state.input));

        // Only an empty input fails here, and its gradient is empty as well.
        let input_grad = match fake_quantize_backward(
            output_grad.to_owned(),
            input,
            &state.config,
            &state.delay,
        ) {
            Ok(input_grad) => input_grad,
            Err(error) => {
                log::warn!(target: "fake_quantize::function", "{error}");
                output_grad
            },
        };

        grads.register::<B>(
            input_node_id,
            input_grad.into_primitive().tensor(),
        );
    }
}

fn read_values<B: Backend, const D: usize>(tensor: Tensor<B, D>) -> Vec<f64> {
    tensor.into_data().iter::<f64>().collect()
}

fn write_values<B: Backend, const D: usize>(
    values: Vec<f64>,
    shape: Shape,
    device: &B::Device,
) -> Tensor<B, D> {
    Tensor::from_data(
        TensorData::new(values, shape.dims).convert::<B::FloatElem>(),
        device,
    )
}

pub use burn::tensor::backend::Backend;

use burn::backend::autodiff;

pub type Autodiff<B> = autodiff::Autodiff<B>;

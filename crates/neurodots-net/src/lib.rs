//! From-scratch feed-forward network stack for the neurodots simulation.
//!
//! Tensors are flat `f32` buffers with a declared 1D/2D/3D shape, layers are
//! dense sigmoid layers with per-neuron gradient accumulators, and training
//! is plain mini-batch stochastic gradient descent with backpropagation.

mod activation;
mod dataset;
mod dense;
mod network;
mod tensor;

pub use activation::Activation;
pub use dataset::{Dataset, Sample};
pub use dense::{Dense, Layer};
pub use network::{NetworkError, NeuralNetwork};
pub use tensor::{Tensor, TensorShape, one_hot};

//! Layer stack orchestration: mini-batch training and inference.

use std::fmt::Write as _;

use rand::RngCore;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::dataset::Dataset;
use crate::dense::Layer;
use crate::tensor::Tensor;

/// Construction-time validation failures for a network.
#[derive(Debug, Error, PartialEq)]
pub enum NetworkError {
    /// A network needs at least one layer.
    #[error("network requires at least one layer")]
    EmptyLayers,
    /// A layer with no neurons cannot carry a signal.
    #[error("layer {index} has no neurons")]
    ZeroSizedLayer { index: usize },
    /// Consecutive layer sizes must chain.
    #[error("layer {index} expects {expected} inputs but upstream produces {actual}")]
    MismatchedTopology {
        index: usize,
        expected: usize,
        actual: usize,
    },
    /// Gradient steps need a positive learning rate.
    #[error("learning rate must be positive, got {0}")]
    InvalidLearningRate(f32),
    /// Zero epochs would make training vacuous.
    #[error("epoch count must be non-zero")]
    ZeroEpochs,
    /// Zero-sized batches can never drain the working set.
    #[error("batch size must be non-zero")]
    ZeroBatchSize,
}

/// An ordered stack of layers plus the training hyperparameters.
///
/// Training walks the state machine described by the design: per epoch a
/// shuffled working copy of the dataset is drained in mini-batches; each
/// example runs forward, accumulates squared error, runs backward seeded
/// with its expected output, and stages gradient contributions; weights
/// commit once per batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NeuralNetwork {
    layers: Vec<Layer>,
    learning_rate: f32,
    epochs: usize,
    batch_size: usize,
}

impl NeuralNetwork {
    /// Validate and assemble a network.
    pub fn new(
        layers: Vec<Layer>,
        learning_rate: f32,
        epochs: usize,
        batch_size: usize,
    ) -> Result<Self, NetworkError> {
        if layers.is_empty() {
            return Err(NetworkError::EmptyLayers);
        }
        for (index, layer) in layers.iter().enumerate() {
            if layer.is_empty() {
                return Err(NetworkError::ZeroSizedLayer { index });
            }
        }
        for index in 1..layers.len() {
            let expected = layers[index].input_size();
            let actual = layers[index - 1].len();
            if expected != actual {
                return Err(NetworkError::MismatchedTopology {
                    index,
                    expected,
                    actual,
                });
            }
        }
        if !learning_rate.is_finite() || learning_rate <= 0.0 {
            return Err(NetworkError::InvalidLearningRate(learning_rate));
        }
        if epochs == 0 {
            return Err(NetworkError::ZeroEpochs);
        }
        if batch_size == 0 {
            return Err(NetworkError::ZeroBatchSize);
        }
        Ok(Self {
            layers,
            learning_rate,
            epochs,
            batch_size,
        })
    }

    /// Train on the dataset, returning the final epoch's total squared
    /// error (`Σ(expected - actual)²/2` over every output component of
    /// every item). The value is diagnostic only. An empty dataset trains
    /// as a no-op and reports zero error.
    pub fn train(&mut self, set: &Dataset, rng: &mut dyn RngCore) -> f32 {
        let mut error = 0.0_f32;
        for _ in 0..self.epochs {
            let mut working = set.items().to_vec();
            working.shuffle(rng);
            error = 0.0;
            let mut cursor = 0;
            while cursor < working.len() {
                let end = (cursor + self.batch_size).min(working.len());
                for item in &working[cursor..end] {
                    let prediction = self.forward_pass(item.input());
                    for (expected, actual) in
                        item.target().body().iter().zip(prediction.body())
                    {
                        error += (expected - actual).powi(2) / 2.0;
                    }
                    self.backward_pass(item.target());
                    self.accumulate_deltas(item.input());
                }
                for layer in &mut self.layers {
                    layer.commit_weights();
                }
                cursor = end;
            }
        }
        error
    }

    /// Single forward pass with no learning side effects; returns the flat
    /// body of the output tensor.
    pub fn predict(&mut self, input: &Tensor) -> Vec<f32> {
        self.forward_pass(input).body().to_vec()
    }

    /// Diagnostic listing of the layer stack, one line per layer.
    #[must_use]
    pub fn summary(&self) -> String {
        let mut text = String::new();
        for layer in &self.layers {
            match layer {
                Layer::Dense(dense) => {
                    let _ = writeln!(text, "Dense layer: {} neurons", dense.len());
                }
            }
        }
        text
    }

    /// Sequentially threads each layer's cached output into the next layer.
    fn forward_pass(&mut self, input: &Tensor) -> &Tensor {
        for index in 0..self.layers.len() {
            let (upstream, rest) = self.layers.split_at_mut(index);
            let layer_input = match upstream.last() {
                Some(previous) => previous.output(),
                None => input,
            };
            rest[0].forward(layer_input);
        }
        self.layers[self.layers.len() - 1].output()
    }

    /// Reverse sweep, handing each layer a read-only reference to the layer
    /// processed just before it (the one nearer the output).
    fn backward_pass(&mut self, expected: &Tensor) {
        for index in (0..self.layers.len()).rev() {
            let (current, downstream) = self.layers.split_at_mut(index + 1);
            current[index].backward(expected, downstream.first());
        }
    }

    fn accumulate_deltas(&mut self, input: &Tensor) {
        for index in 0..self.layers.len() {
            let (upstream, rest) = self.layers.split_at_mut(index);
            let layer_input = match upstream.last() {
                Some(previous) => previous.output(),
                None => input,
            };
            rest[0].accumulate_deltas(layer_input, self.learning_rate);
        }
    }
}

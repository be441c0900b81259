//! Fully-connected layers and the closed layer variant set.

use rand::{Rng, RngCore};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::activation::Activation;
use crate::tensor::{Tensor, TensorShape};

/// One unit of a dense layer: a weight per upstream output, a parallel
/// accumulator for pending weight changes, a bias, and the backprop delta
/// computed for the current training step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Neuron {
    pub(crate) weights: Vec<f32>,
    pub(crate) weight_deltas: Vec<f32>,
    pub(crate) bias: f32,
    pub(crate) delta: f32,
}

impl Neuron {
    fn random(input_size: usize, rng: &mut dyn RngCore) -> Self {
        let weights = (0..input_size)
            .map(|_| rng.random_range(-1.0..=1.0))
            .collect::<Vec<f32>>();
        Self {
            weight_deltas: vec![0.0; weights.len()],
            weights,
            bias: 0.0,
            delta: 0.0,
        }
    }
}

/// Fully-connected layer: every neuron consumes the entire upstream output.
///
/// The layer retains its output tensor between the forward, backward, and
/// delta-accumulation phases of a training step; the phases are sequential
/// and the cached values are what backpropagation differentiates against.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dense {
    neurons: Vec<Neuron>,
    activation: Activation,
    output: Tensor,
}

impl Dense {
    /// Construct a dense layer with weights drawn uniformly from `[-1, 1]`
    /// and zeroed biases.
    #[must_use]
    pub fn new(
        input_size: usize,
        neuron_count: usize,
        activation: Activation,
        rng: &mut dyn RngCore,
    ) -> Self {
        let neurons = (0..neuron_count)
            .map(|_| Neuron::random(input_size, rng))
            .collect();
        Self {
            neurons,
            activation,
            output: Tensor::zeros(TensorShape::one_d(neuron_count)),
        }
    }

    /// Number of neurons in the layer.
    #[must_use]
    pub fn len(&self) -> usize {
        self.neurons.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.neurons.is_empty()
    }

    /// Number of upstream outputs each neuron consumes.
    #[must_use]
    pub fn input_size(&self) -> usize {
        self.neurons.first().map_or(0, |neuron| neuron.weights.len())
    }

    /// The output tensor cached by the most recent forward pass.
    #[must_use]
    pub const fn output(&self) -> &Tensor {
        &self.output
    }

    /// Evaluate `σ(bias + Σ wᵢ·xᵢ)` for every neuron into the cached output.
    ///
    /// Neurons are independent within the pass, so they run in parallel;
    /// summation order inside a neuron is not load-bearing.
    pub fn forward(&mut self, input: &Tensor) -> &Tensor {
        let activation = self.activation;
        self.neurons
            .par_iter()
            .map(|neuron| {
                let mut sum = neuron.bias;
                for (weight, value) in neuron.weights.iter().zip(input.body()) {
                    sum += weight * value;
                }
                activation.activate(sum)
            })
            .collect_into_vec(self.output.body_mut());
        &self.output
    }

    /// Compute per-neuron deltas for the current step.
    ///
    /// `downstream` is the layer already processed in this backward sweep
    /// (the one closer to the network output), supplied read-only by the
    /// orchestrating network and never stored here. With a downstream layer
    /// the error is pulled through its weights and deltas; without one this
    /// is the output layer and the error is `expected - actual`.
    pub fn backward(&mut self, expected: &Tensor, downstream: Option<&Layer>) {
        let mut errors = vec![0.0_f32; self.neurons.len()];
        match downstream {
            Some(Layer::Dense(down)) => {
                for (j, error) in errors.iter_mut().enumerate() {
                    for neuron in &down.neurons {
                        *error += neuron.weights[j] * neuron.delta;
                    }
                }
            }
            None => {
                for (j, error) in errors.iter_mut().enumerate() {
                    *error = expected.body()[j] - self.output.body()[j];
                }
            }
        }
        let activation = self.activation;
        for (neuron, (error, output)) in self
            .neurons
            .iter_mut()
            .zip(errors.iter().zip(self.output.body()))
        {
            neuron.delta = error * activation.derivative(*output);
        }
    }

    /// Accumulate gradient contributions for one training example.
    ///
    /// Weight changes are deferred into the per-neuron accumulators and
    /// committed once per mini-batch; the bias commits immediately per
    /// example. The asymmetry is part of the training dynamics and must not
    /// be "fixed".
    pub fn accumulate_deltas(&mut self, input: &Tensor, learning_rate: f32) {
        self.neurons.par_iter_mut().for_each(|neuron| {
            for (pending, value) in neuron.weight_deltas.iter_mut().zip(input.body()) {
                *pending += learning_rate * neuron.delta * value;
            }
            neuron.bias += learning_rate * neuron.delta;
        });
    }

    /// Fold the accumulated weight deltas into the weights and reset them.
    ///
    /// Called once per mini-batch; calling again without new accumulation
    /// is a no-op since the deltas are zero after a commit.
    pub fn commit_weights(&mut self) {
        self.neurons.par_iter_mut().for_each(|neuron| {
            for (weight, pending) in
                neuron.weights.iter_mut().zip(neuron.weight_deltas.iter_mut())
            {
                *weight += *pending;
                *pending = 0.0;
            }
        });
    }
}

/// Closed set of layer variants.
///
/// Only dense layers exist in this design; keeping the set closed makes
/// every phase an exhaustive match instead of open-ended dispatch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Layer {
    Dense(Dense),
}

impl Layer {
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Dense(dense) => dense.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Dense(dense) => dense.is_empty(),
        }
    }

    #[must_use]
    pub fn input_size(&self) -> usize {
        match self {
            Self::Dense(dense) => dense.input_size(),
        }
    }

    #[must_use]
    pub const fn output(&self) -> &Tensor {
        match self {
            Self::Dense(dense) => dense.output(),
        }
    }

    pub fn forward(&mut self, input: &Tensor) -> &Tensor {
        match self {
            Self::Dense(dense) => dense.forward(input),
        }
    }

    pub fn backward(&mut self, expected: &Tensor, downstream: Option<&Layer>) {
        match self {
            Self::Dense(dense) => dense.backward(expected, downstream),
        }
    }

    pub fn accumulate_deltas(&mut self, input: &Tensor, learning_rate: f32) {
        match self {
            Self::Dense(dense) => dense.accumulate_deltas(input, learning_rate),
        }
    }

    pub fn commit_weights(&mut self) {
        match self {
            Self::Dense(dense) => dense.commit_weights(),
        }
    }
}

//! Supervised training examples and their ordered collections.

use serde::{Deserialize, Serialize};

use crate::tensor::{Tensor, TensorShape};

/// One supervised training example: an input tensor paired with the output
/// the network should learn to produce. Immutable once built.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Sample {
    input: Tensor,
    target: Tensor,
}

impl Sample {
    #[must_use]
    pub const fn new(input: Tensor, target: Tensor) -> Self {
        Self { input, target }
    }

    /// Build both tensors from raw bodies and shapes.
    #[must_use]
    pub fn from_raw(
        input: Vec<f32>,
        input_shape: TensorShape,
        target: Vec<f32>,
        target_shape: TensorShape,
    ) -> Self {
        Self {
            input: Tensor::new(input_shape, input),
            target: Tensor::new(target_shape, target),
        }
    }

    #[must_use]
    pub const fn input(&self) -> &Tensor {
        &self.input
    }

    #[must_use]
    pub const fn target(&self) -> &Tensor {
        &self.target
    }
}

/// Ordered collection of samples. Items are appended over an agent's
/// lifetime and filtered or replaced between generations; ordering only
/// matters insofar as training shuffles a working copy every epoch.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Dataset {
    items: Vec<Sample>,
}

impl Dataset {
    #[must_use]
    pub const fn new(items: Vec<Sample>) -> Self {
        Self { items }
    }

    pub fn push(&mut self, sample: Sample) {
        self.items.push(sample);
    }

    #[must_use]
    pub fn items(&self) -> &[Sample] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

//! Flat numeric buffers with a declared logical shape.

use serde::{Deserialize, Serialize};

/// Logical shape of a [`Tensor`]: the tag decides which extents exist.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TensorShape {
    OneD { width: usize },
    TwoD { width: usize, height: usize },
    ThreeD { width: usize, height: usize, depth: usize },
}

impl TensorShape {
    /// 1D shape of `width` elements.
    #[must_use]
    pub const fn one_d(width: usize) -> Self {
        Self::OneD { width }
    }

    /// 2D shape laid out row-major as `x + y * width`.
    #[must_use]
    pub const fn two_d(width: usize, height: usize) -> Self {
        Self::TwoD { width, height }
    }

    /// 3D shape laid out as `z + (x + y * width) * depth`.
    #[must_use]
    pub const fn three_d(width: usize, height: usize, depth: usize) -> Self {
        Self::ThreeD {
            width,
            height,
            depth,
        }
    }

    /// Number of elements a conforming body must hold.
    #[must_use]
    pub const fn flat_len(&self) -> usize {
        match *self {
            Self::OneD { width } => width,
            Self::TwoD { width, height } => width * height,
            Self::ThreeD {
                width,
                height,
                depth,
            } => width * height * depth,
        }
    }

    const fn width(&self) -> usize {
        match *self {
            Self::OneD { width }
            | Self::TwoD { width, .. }
            | Self::ThreeD { width, .. } => width,
        }
    }
}

/// A flat buffer of `f32` values indexed through its [`TensorShape`].
///
/// Equality is structural on the body only; two tensors with the same values
/// but different shapes compare equal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tensor {
    shape: TensorShape,
    body: Vec<f32>,
}

impl PartialEq for Tensor {
    fn eq(&self, other: &Self) -> bool {
        self.body == other.body
    }
}

impl Tensor {
    /// Build a tensor from a shape and a conforming body.
    ///
    /// # Panics
    ///
    /// Panics when `body.len()` disagrees with the shape's flattened size;
    /// a mismatch is a logic error, and every fixed-stride index below
    /// depends on the lengths agreeing.
    #[must_use]
    pub fn new(shape: TensorShape, body: Vec<f32>) -> Self {
        assert_eq!(
            body.len(),
            shape.flat_len(),
            "tensor body does not conform to its shape",
        );
        Self { shape, body }
    }

    /// A zero-filled tensor of the given shape.
    #[must_use]
    pub fn zeros(shape: TensorShape) -> Self {
        Self {
            body: vec![0.0; shape.flat_len()],
            shape,
        }
    }

    #[must_use]
    pub const fn shape(&self) -> TensorShape {
        self.shape
    }

    #[must_use]
    pub fn body(&self) -> &[f32] {
        &self.body
    }

    pub(crate) fn body_mut(&mut self) -> &mut Vec<f32> {
        &mut self.body
    }

    /// 1D accessor.
    #[must_use]
    pub fn get1(&self, x: usize) -> f32 {
        self.body[x]
    }

    /// 2D accessor: `x + y * width`.
    #[must_use]
    pub fn get2(&self, x: usize, y: usize) -> f32 {
        self.body[x + y * self.shape.width()]
    }

    /// 3D accessor: `z + (x + y * width) * depth`.
    #[must_use]
    pub fn get3(&self, x: usize, y: usize, z: usize) -> f32 {
        match self.shape {
            TensorShape::ThreeD { width, depth, .. } => {
                self.body[z + (x + y * width) * depth]
            }
            TensorShape::OneD { .. } | TensorShape::TwoD { .. } => {
                panic!("3D access on a tensor without depth")
            }
        }
    }
}

/// One-hot 1D classification target.
///
/// # Panics
///
/// Panics when `correct >= classes`; the caller asked for a class the
/// tensor cannot represent.
#[must_use]
pub fn one_hot(classes: usize, correct: usize) -> Tensor {
    assert!(
        correct < classes,
        "correct class must be less than the class count",
    );
    let mut body = vec![0.0; classes];
    body[correct] = 1.0;
    Tensor::new(TensorShape::one_d(classes), body)
}

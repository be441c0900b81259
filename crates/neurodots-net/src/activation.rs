//! Scalar nonlinearities applied by dense layers.

use serde::{Deserialize, Serialize};

/// Closed set of supported activation functions.
///
/// The derivative is deliberately computed from the activation's own output
/// rather than its input; for the logistic sigmoid `σ'(y) = y(1 - y)`, which
/// lets backpropagation reuse the cached forward outputs.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum Activation {
    #[default]
    Sigmoid,
}

impl Activation {
    /// Map a raw layer-construction identifier to an activation.
    ///
    /// Unrecognized identifiers fall back to [`Activation::Sigmoid`]; the
    /// fallback is a defined policy, not an error path.
    #[must_use]
    pub const fn from_raw(raw: u32) -> Self {
        match raw {
            0 => Self::Sigmoid,
            // Default-fallback policy: anything unrecognized is sigmoid.
            _ => Self::Sigmoid,
        }
    }

    /// Apply the nonlinearity to a weighted-sum-plus-bias value.
    #[must_use]
    pub fn activate(self, input: f32) -> f32 {
        match self {
            Self::Sigmoid => 1.0 / (1.0 + (-input).exp()),
        }
    }

    /// Local gradient, computed from the activation's own output.
    #[must_use]
    pub fn derivative(self, output: f32) -> f32 {
        match self {
            Self::Sigmoid => output * (1.0 - output),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sigmoid_is_centred_at_half() {
        assert!((Activation::Sigmoid.activate(0.0) - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn sigmoid_is_strictly_increasing() {
        let mut previous = Activation::Sigmoid.activate(-8.0);
        let mut x = -7.5_f32;
        while x <= 8.0 {
            let value = Activation::Sigmoid.activate(x);
            assert!(value > previous, "not increasing at x = {x}");
            previous = value;
            x += 0.5;
        }
    }

    #[test]
    fn derivative_follows_output_and_peaks_at_half() {
        for output in [0.1_f32, 0.25, 0.5, 0.75, 0.9] {
            let slope = Activation::Sigmoid.derivative(output);
            assert!((slope - output * (1.0 - output)).abs() < f32::EPSILON);
            assert!(slope <= Activation::Sigmoid.derivative(0.5));
        }
    }

    #[test]
    fn unknown_identifiers_fall_back_to_sigmoid() {
        assert_eq!(Activation::from_raw(0), Activation::Sigmoid);
        assert_eq!(Activation::from_raw(17), Activation::Sigmoid);
        assert_eq!(Activation::from_raw(u32::MAX), Activation::Sigmoid);
    }
}

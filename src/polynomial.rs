use serde::{Deserialize, Serialize};

/// Polynomial in power basis, coefficients in ascending order:
/// `coefficients[k]` multiplies `x^k`. Never empty.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Polynomial {
    coefficients: Vec<f64>,
}

impl Polynomial {
    /// An empty coefficient list is taken as the zero polynomial.
    pub fn new(coefficients: Vec<f64>) -> Self {
        if coefficients.is_empty() {
            return Self::zero(0);
        }
        Self { coefficients }
    }

    /// All-zero polynomial carrying `degree + 1` coefficients.
    pub fn zero(degree: usize) -> Self {
        Self {
            coefficients: vec![0.0; degree + 1],
        }
    }

    pub fn degree(&self) -> usize {
        self.coefficients.len() - 1
    }

    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    /// Horner evaluation.
    pub fn eval(&self, x: f64) -> f64 {
        self.coefficients
            .iter()
            .rev()
            .fold(0.0, |acc, &a| acc * x + a)
    }

    /// One degree lower; the derivative of a constant is `[0.0]`.
    pub fn derivative(&self) -> Self {
        if self.coefficients.len() == 1 {
            return Self::zero(0);
        }
        Self {
            coefficients: self
                .coefficients
                .iter()
                .enumerate()
                .skip(1)
                .map(|(k, &a)| k as f64 * a)
                .collect(),
        }
    }
}

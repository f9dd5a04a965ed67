use serde::{Deserialize, Serialize};

use crate::complex::C;

/// Outcome of the escape-time iteration for one point.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Escape {
    Bounded,
    Unbounded { iterations: u32 },
}

impl Escape {
    pub fn is_bounded(&self) -> bool {
        matches!(self, Escape::Bounded)
    }

    /// Integer view used for colour mapping: 0 for bounded points.
    pub fn iteration_count(&self) -> u32 {
        match self {
            Escape::Bounded => 0,
            Escape::Unbounded { iterations } => *iterations,
        }
    }
}

/// Escape-time test for `z -> z^2 + c`, starting from `z = 0`.
///
/// Results for non-finite points are undefined.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EscapeOracle {
    pub max_iter: u32,
    pub radius: f64,
}

impl EscapeOracle {
    pub fn new(max_iter: u32, radius: f64) -> Self {
        Self { max_iter, radius }
    }

    pub fn classify(&self, c: C<f64>) -> Escape {
        let mut z = C::new(0.0, 0.0);
        for n in 0..self.max_iter {
            if z.norm() > self.radius {
                return Escape::Unbounded { iterations: n };
            }
            z = (z * z) + c;
        }
        Escape::Bounded
    }
}

impl Default for EscapeOracle {
    fn default() -> Self {
        Self::new(100, 2.0)
    }
}

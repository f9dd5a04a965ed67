use nalgebra::{DMatrix, DVector};
use tracing::debug;

use crate::coord::Axis;
use crate::error::{Error, Result};
use crate::locator::Sample;
use crate::polynomial::Polynomial;

/// Least-squares polynomial of fixed `degree` through the defined samples
/// whose probe lies in `domain`.
///
/// Columns of the Vandermonde matrix are scaled to unit norm before the SVD
/// solve; singular values below `len * EPSILON` relative to the largest are
/// discarded.
pub fn fit(samples: &[Sample], domain: &Axis<f64>, degree: usize) -> Result<Polynomial> {
    let (xs, ys): (Vec<f64>, Vec<f64>) = samples
        .iter()
        .filter(|s| domain.contains(s.probe))
        .filter_map(|s| s.located.map(|y| (s.probe, y)))
        .unzip();

    let required = degree + 1;
    if xs.len() < required {
        return Err(Error::InsufficientData {
            valid: xs.len(),
            required,
        });
    }

    let rows = xs.len();
    let mut vander = DMatrix::from_fn(rows, required, |i, k| xs[i].powi(k as i32));
    let scale: Vec<f64> = vander
        .column_iter()
        .map(|col| {
            let norm = col.norm();
            if norm > 0.0 {
                norm
            } else {
                1.0
            }
        })
        .collect();
    for (k, mut col) in vander.column_iter_mut().enumerate() {
        col /= scale[k];
    }

    let rhs = DVector::from_vec(ys);
    let svd = vander.svd(true, true);
    let cutoff = rows as f64 * f64::EPSILON * svd.singular_values.max();
    let solution = svd.solve(&rhs, cutoff).map_err(Error::LeastSquares)?;

    let coefficients: Vec<f64> = solution
        .iter()
        .zip(&scale)
        .map(|(a, s)| a / s)
        .collect();
    debug!(samples = rows, degree, "fitted boundary polynomial");
    Ok(Polynomial::new(coefficients))
}

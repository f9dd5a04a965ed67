use crate::error::{Error, Result};
use crate::polynomial::Polynomial;
use crate::quadrature::{Estimate, Quadrature};

/// Quadrature estimate of the arc length of `model` over `[lower, upper]`,
/// integrating `sqrt(1 + p'(x)^2)`.
pub fn arc_length_estimate(
    model: &Polynomial,
    lower: f64,
    upper: f64,
    quadrature: &Quadrature,
) -> Result<Estimate> {
    if !(lower.is_finite() && upper.is_finite()) || lower > upper {
        return Err(Error::MalformedInterval { lower, upper });
    }
    if lower == upper {
        return Ok(Estimate {
            value: 0.0,
            error: 0.0,
            intervals: 0,
        });
    }
    let slope = model.derivative();
    if slope.coefficients().iter().all(|&a| a == 0.0) {
        return Ok(Estimate {
            value: upper - lower,
            error: 0.0,
            intervals: 0,
        });
    }
    Ok(quadrature.integrate(
        |x| {
            let d = slope.eval(x);
            (1.0 + d * d).sqrt()
        },
        lower,
        upper,
    ))
}

pub fn arc_length(
    model: &Polynomial,
    lower: f64,
    upper: f64,
    quadrature: &Quadrature,
) -> Result<f64> {
    arc_length_estimate(model, lower, upper, quadrature).map(|e| e.value)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_flat_line_length() {
        let q = Quadrature::default();
        let zero = Polynomial::zero(15);
        for (a, b) in [(-2.0, 0.25), (0.0, 1.0), (-1.0, 3.0), (-2.0, 1.0)] {
            assert_eq!(arc_length(&zero, a, b, &q).unwrap(), b - a);
        }
        let constant = Polynomial::new(vec![0.7, 0.0, 0.0]);
        assert_eq!(arc_length(&constant, 1.0, 4.0, &q).unwrap(), 3.0);
    }

    #[test]
    fn test_straight_line_length() {
        // y = 1 + 2x has slope 2, so length is sqrt(5) per unit of x
        let line = Polynomial::new(vec![1.0, 2.0]);
        let len = arc_length(&line, 0.0, 3.0, &Quadrature::default()).unwrap();
        assert!((len - 3.0 * 5f64.sqrt()).abs() < 1e-10);
    }

    #[test]
    fn test_parabola_length() {
        // y = x^2 over [0, 1]: (2 sqrt(5) + asinh(2)) / 4
        let p = Polynomial::new(vec![0.0, 0.0, 1.0]);
        let len = arc_length(&p, 0.0, 1.0, &Quadrature::default()).unwrap();
        let expected = (2.0 * 5f64.sqrt() + 2f64.asinh()) / 4.0;
        assert!((len - expected).abs() < 1e-9);
    }

    #[test]
    fn test_monotone_in_upper_bound() {
        let p = Polynomial::new(vec![0.3, -0.5, 0.2, 0.9, -0.1]);
        let q = Quadrature::default();
        let mut previous = 0.0;
        for i in 0..=20 {
            let b = -2.0 + 0.15 * i as f64;
            let len = arc_length(&p, -2.0, b, &q).unwrap();
            assert!(len >= previous);
            previous = len;
        }
    }

    #[test]
    fn test_malformed_interval() {
        let p = Polynomial::zero(2);
        let q = Quadrature::default();
        assert!(matches!(
            arc_length(&p, 1.0, 0.0, &q),
            Err(Error::MalformedInterval { .. })
        ));
        assert!(arc_length(&p, 0.0, f64::INFINITY, &q).is_err());
        assert_eq!(arc_length(&p, 0.5, 0.5, &q).unwrap(), 0.0);
    }
}

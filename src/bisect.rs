use serde::{Deserialize, Serialize};

/// Bracketing root finder for any scalar function with a sign change.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Bisection {
    pub tolerance: f64,
    pub max_iter: u32,
}

impl Bisection {
    pub fn new(tolerance: f64, max_iter: u32) -> Self {
        Self {
            tolerance,
            max_iter,
        }
    }

    /// Root of `f` in `[lo, hi]`, or `None` when the endpoints do not
    /// bracket a sign change or any evaluation is NaN.
    ///
    /// Stops early if `|f(mid)|` drops below the tolerance; for step
    /// functions that never happens and the interval width or the
    /// iteration cap ends the search. Returns the last midpoint.
    pub fn find_root<F>(&self, f: F, mut lo: f64, mut hi: f64) -> Option<f64>
    where
        F: Fn(f64) -> f64,
    {
        let f_lo = f(lo);
        let f_hi = f(hi);
        if f_lo.is_nan() || f_hi.is_nan() || f_lo.signum() == f_hi.signum() {
            return None;
        }

        let lo_sign = f_lo.signum();
        let mut mid = (lo + hi) / 2.0;
        for _ in 0..self.max_iter {
            mid = (lo + hi) / 2.0;
            let f_mid = f(mid);
            if f_mid.is_nan() {
                return None;
            }
            if f_mid.abs() < self.tolerance {
                return Some(mid);
            }
            if f_mid.signum() == lo_sign {
                lo = mid;
            } else {
                hi = mid;
            }
            if (hi - lo).abs() < self.tolerance {
                break;
            }
        }
        Some(mid)
    }
}

impl Default for Bisection {
    fn default() -> Self {
        Self::new(1e-6, 100)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_smooth_root() {
        let root = Bisection::default()
            .find_root(|x| x * x - 2.0, 0.0, 2.0)
            .unwrap();
        assert!((root - 2f64.sqrt()).abs() < 1e-6);
    }

    #[test]
    fn test_decreasing_function() {
        let root = Bisection::default()
            .find_root(|x| 1.0 - x, -3.0, 4.0)
            .unwrap();
        assert!((root - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_step_function() {
        let step = |x: f64| if x > 0.3 { 1.0 } else { -1.0 };
        let root = Bisection::default().find_root(step, 0.0, 1.5).unwrap();
        assert!((root - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_no_sign_change() {
        assert_eq!(Bisection::default().find_root(|_| 1.0, 0.0, 1.0), None);
        assert_eq!(Bisection::default().find_root(|x| x * x + 1.0, -1.0, 1.0), None);
    }

    #[test]
    fn test_nan_is_undefined() {
        assert_eq!(Bisection::default().find_root(|_| f64::NAN, 0.0, 1.0), None);
        let nan_inside = |x: f64| if (x - 0.5).abs() < 1e-12 { f64::NAN } else { x - 0.75 };
        assert_eq!(Bisection::default().find_root(nan_inside, 0.0, 1.0), None);
    }

    #[test]
    fn test_iteration_cap() {
        let coarse = Bisection::new(0.0, 3);
        let root = coarse.find_root(|x| x - 0.1, 0.0, 1.0).unwrap();
        // midpoints 0.5, 0.25, 0.125
        assert_eq!(root, 0.125);
    }
}

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::bisect::Bisection;
use crate::complex::on_probe;
use crate::coord::Axis;
use crate::oracle::EscapeOracle;
use crate::solver::Solver;

/// One probe line and where, if anywhere, it crosses the set boundary.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub probe: f64,
    pub located: Option<f64>,
}

impl Sample {
    pub fn is_defined(&self) -> bool {
        self.located.is_some()
    }
}

#[derive(Clone, Debug)]
pub struct BoundaryLocator {
    oracle: EscapeOracle,
    search: Axis<f64>,
    bisection: Bisection,
}

impl BoundaryLocator {
    pub fn new(oracle: EscapeOracle, search: Axis<f64>, bisection: Bisection) -> Self {
        Self {
            oracle,
            search,
            bisection,
        }
    }

    /// +1 outside the set, -1 inside.
    pub fn indicator(&self, probe: f64, located: f64) -> f64 {
        if self.oracle.classify(on_probe(probe, located)).is_bounded() {
            -1.0
        } else {
            1.0
        }
    }

    pub fn locate(&self, probe: f64) -> Option<f64> {
        self.bisection.find_root(
            |q| self.indicator(probe, q),
            self.search.min,
            self.search.max,
        )
    }

    pub fn sample(&self, probe: f64) -> Sample {
        let located = self.locate(probe);
        if located.is_none() {
            debug!(probe, "no boundary crossing in search interval");
        }
        Sample { probe, located }
    }
}

impl Solver<Vec<f64>, Vec<Sample>> for BoundaryLocator {
    fn solve(&self, probes: Vec<f64>) -> Vec<Sample> {
        probes.into_iter().map(|probe| self.sample(probe)).collect()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::threads::Call;

    fn locator(tolerance: f64) -> BoundaryLocator {
        BoundaryLocator::new(
            EscapeOracle::default(),
            Axis::new(0.0, 1.5),
            Bisection::new(tolerance, 100),
        )
    }

    #[test]
    fn test_outside_probe_is_undefined() {
        assert_eq!(locator(1e-6).locate(1.0), None);
        assert_eq!(locator(1e-6).locate(2.5), None);
    }

    #[test]
    fn test_crossing_probe_is_located() {
        let q = locator(1e-6).locate(-1.0).unwrap();
        assert!(q.is_finite());
        assert!((0.0..=1.5).contains(&q));
    }

    #[test]
    fn test_tighter_tolerance_converges() {
        let loose = locator(1e-6).locate(-1.0).unwrap();
        let tight = locator(1e-9).locate(-1.0).unwrap();
        assert!((loose - tight).abs() < 1e-6);
    }

    #[test]
    fn test_indicator_signs() {
        let l = locator(1e-6);
        assert_eq!(l.indicator(-1.0, 0.0), -1.0);
        assert_eq!(l.indicator(-1.0, 1.5), 1.0);
    }

    #[test]
    fn test_sweep_keeps_probe_order() {
        let probes = Axis::new(-2.0, 1.0).linspace(31);
        let l = locator(1e-6);
        let inline = l.solve(probes.clone());
        let threaded = l.clone().threaded(4).call(probes.clone()).unwrap();
        assert_eq!(inline, threaded);
        let order: Vec<f64> = threaded.iter().map(|s| s.probe).collect();
        assert_eq!(order, probes);
        assert!(!inline.last().unwrap().is_defined());
    }
}

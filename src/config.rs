use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::bisect::Bisection;
use crate::coord::{Axis, Frame};
use crate::error::{Error, Result};
use crate::oracle::EscapeOracle;
use crate::quadrature::Quadrature;

pub const MIN_PROBE_COUNT: usize = 103;

/// Every tunable of the pipeline. Missing fields in a config file fall back
/// to the defaults below.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Region rendered by the grid evaluation.
    pub frame: Frame<f64>,
    pub width: usize,
    pub height: usize,
    /// Real parts of the vertical probe lines.
    pub probes: Axis<f64>,
    pub probe_count: usize,
    /// Imaginary range searched on every probe line.
    pub search: Axis<f64>,
    /// Probe range kept for the fit; also the arc-length bounds.
    pub fit_domain: Axis<f64>,
    pub degree: usize,
    pub oracle: EscapeOracle,
    pub bisection: Bisection,
    pub quadrature: Quadrature,
    /// 0 runs everything on the calling thread.
    pub threads: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            frame: Frame::default(),
            width: 600,
            height: 600,
            probes: Axis::new(-2.0, 1.0),
            probe_count: MIN_PROBE_COUNT,
            search: Axis::new(0.0, 1.5),
            fit_domain: Axis::new(-2.0, 0.25),
            degree: 15,
            oracle: EscapeOracle::default(),
            bisection: Bisection::default(),
            quadrature: Quadrature::default(),
            threads: 0,
        }
    }
}

fn invalid<T>(msg: &str) -> Result<T> {
    Err(Error::Config(msg.to_string()))
}

impl PipelineConfig {
    pub fn from_json(s: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_json(&fs::read_to_string(path)?)
    }

    pub fn validate(&self) -> Result<()> {
        self.frame.x.check("frame.x")?;
        self.frame.y.check("frame.y")?;
        self.probes.check("probes")?;
        self.search.check("search")?;
        self.fit_domain.check("fit_domain")?;
        if self.probe_count < MIN_PROBE_COUNT {
            return Err(Error::Config(format!(
                "probe_count must be at least {}",
                MIN_PROBE_COUNT
            )));
        }
        if self.probe_count < self.degree + 1 {
            return invalid("probe_count must exceed the polynomial degree");
        }
        if self.oracle.max_iter == 0 || self.bisection.max_iter == 0 {
            return invalid("iteration caps must be positive");
        }
        if !(self.oracle.radius > 0.0) {
            return invalid("oracle.radius must be positive");
        }
        if !(self.bisection.tolerance > 0.0) {
            return invalid("bisection.tolerance must be positive");
        }
        if !(self.quadrature.abs_tol >= 0.0 && self.quadrature.rel_tol >= 0.0)
            || self.quadrature.abs_tol + self.quadrature.rel_tol == 0.0
        {
            return invalid("quadrature tolerances must be non-negative and not both zero");
        }
        if self.quadrature.limit == 0 {
            return invalid("quadrature.limit must be positive");
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = PipelineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.degree, 15);
        assert_eq!(config.probe_count, 103);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config =
            PipelineConfig::from_json(r#"{"degree": 9, "bisection": {"tolerance": 1e-8}}"#)
                .unwrap();
        assert_eq!(config.degree, 9);
        assert_eq!(config.bisection.tolerance, 1e-8);
        assert_eq!(config.bisection.max_iter, 100);
        assert_eq!(config.search, Axis::new(0.0, 1.5));
    }

    #[test]
    fn test_rejects_bad_fields() {
        let bad = [
            r#"{"probe_count": 50}"#,
            r#"{"search": {"min": 1.5, "max": 0.0}}"#,
            r#"{"fit_domain": {"min": 0.25, "max": -2.0}}"#,
            r#"{"degree": 200}"#,
            r#"{"oracle": {"max_iter": 0}}"#,
            r#"{"bisection": {"tolerance": 0.0}}"#,
            r#"{"quadrature": {"abs_tol": 0.0, "rel_tol": 0.0}}"#,
            r#"{"quadrature": {"limit": 0}}"#,
            r#"{"frame": {"x": {"min": 1.0, "max": -2.0}, "y": {"min": -1.5, "max": 1.5}}}"#,
            r#"{"frame": {"x": {"min": -2.0, "max": 1.0}, "y": {"min": 1.5, "max": -1.5}}}"#,
            r#"{"oracle": {"radius": 0.0}}"#,
            r#"{"oracle": {"radius": -2.0}}"#,
            r#"{"bisection": {"max_iter": 0}}"#,
        ];
        for json in bad {
            assert!(
                matches!(PipelineConfig::from_json(json), Err(Error::Config(_))),
                "{}",
                json
            );
        }
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            PipelineConfig::from_json("{degree: }"),
            Err(Error::Json(_))
        ));
    }
}

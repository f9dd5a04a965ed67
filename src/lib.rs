use tracing::info;

use crate::config::PipelineConfig;
use crate::locator::{BoundaryLocator, Sample};
use crate::polynomial::Polynomial;
use crate::solver::{make_solver, ComplexGrid, EscapeGrid, GridSolver};
use crate::threads::Call;

pub mod bench;
pub mod bisect;
mod complex;
pub mod config;
pub mod coord;
pub mod error;
pub mod fit;
pub mod length;
pub mod locator;
pub mod oracle;
pub mod painter;
pub mod persist;
pub mod polynomial;
pub mod quadrature;
pub mod solver;
pub mod threads;

pub use error::{Error, Result};

/// Terminal output of a run.
#[derive(Clone, Debug, PartialEq)]
pub struct Report {
    pub samples: Vec<Sample>,
    pub model: Polynomial,
    pub arc_length: f64,
}

impl Report {
    pub fn valid_samples(&self) -> usize {
        self.samples.iter().filter(|s| s.is_defined()).count()
    }
}

/// Oracle → boundary locator → polynomial fit → arc length, driven by a
/// validated `PipelineConfig`.
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn locator(&self) -> BoundaryLocator {
        BoundaryLocator::new(self.config.oracle, self.config.search, self.config.bisection)
    }

    /// Probe sweep, in probe order.
    pub fn samples(&self) -> Result<Vec<Sample>> {
        let probes = self.config.probes.linspace(self.config.probe_count);
        let solver = make_solver(self.locator(), self.config.threads);
        let samples = solver.call(probes)?;
        info!(
            probes = samples.len(),
            located = samples.iter().filter(|s| s.is_defined()).count(),
            "boundary sweep done"
        );
        Ok(samples)
    }

    pub fn fit(&self, samples: &[Sample]) -> Result<Polynomial> {
        fit::fit(samples, &self.config.fit_domain, self.config.degree)
    }

    pub fn arc_length(&self, model: &Polynomial) -> Result<f64> {
        length::arc_length(
            model,
            self.config.fit_domain.min,
            self.config.fit_domain.max,
            &self.config.quadrature,
        )
    }

    pub fn run(&self) -> Result<Report> {
        let samples = self.samples()?;
        let model = self.fit(&samples)?;
        let arc_length = self.arc_length(&model)?;
        info!(degree = model.degree(), arc_length, "boundary curve measured");
        Ok(Report {
            samples,
            model,
            arc_length,
        })
    }

    /// Oracle over the configured frame, for rendering.
    pub fn escape_grid(&self) -> Result<EscapeGrid> {
        let grid = ComplexGrid::new(&self.config.frame, self.config.width, self.config.height);
        let solver = make_solver(GridSolver::new(self.config.oracle), self.config.threads);
        let escapes = solver.call(grid)?;
        info!(
            width = escapes.width(),
            height = escapes.height(),
            bounded = escapes.bounded_count(),
            "escape grid evaluated"
        );
        Ok(escapes)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn run_with_threads(threads: usize) -> Report {
        let config = PipelineConfig {
            threads,
            ..PipelineConfig::default()
        };
        Pipeline::new(config).unwrap().run().unwrap()
    }

    #[test]
    fn test_pipeline_defaults() {
        let report = run_with_threads(0);
        assert_eq!(report.samples.len(), 103);
        assert_eq!(report.model.coefficients().len(), 16);
        assert!(report.arc_length.is_finite());
        assert!(report.arc_length > 2.25);
        assert!(report.valid_samples() >= 16);
        // probe at x = 1 lies right of the set
        assert!(!report.samples.last().unwrap().is_defined());
    }

    #[test]
    fn test_pipeline_is_deterministic() {
        let a = run_with_threads(0);
        let b = run_with_threads(0);
        let c = run_with_threads(3);
        assert_eq!(a, b);
        assert_eq!(a.samples, c.samples);
        assert_eq!(a.model, c.model);
        assert_eq!(a.arc_length.to_bits(), c.arc_length.to_bits());
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = PipelineConfig {
            probe_count: 10,
            ..PipelineConfig::default()
        };
        assert!(matches!(Pipeline::new(config), Err(Error::Config(_))));
    }

    #[test]
    fn test_escape_grid_dimensions() {
        let config = PipelineConfig {
            width: 40,
            height: 30,
            threads: 2,
            ..PipelineConfig::default()
        };
        let grid = Pipeline::new(config).unwrap().escape_grid().unwrap();
        assert_eq!((grid.width(), grid.height()), (40, 30));
    }
}

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::polynomial::Polynomial;

/// Stored outcome of a run: fitted coefficients (ascending powers) and the
/// measured arc length.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FitRecord {
    pub degree: usize,
    pub coefficients: Vec<f64>,
    pub arc_length: f64,
}

impl FitRecord {
    pub fn new(model: &Polynomial, arc_length: f64) -> Self {
        Self {
            degree: model.degree(),
            coefficients: model.coefficients().to_vec(),
            arc_length,
        }
    }

    pub fn model(&self) -> Polynomial {
        Polynomial::new(self.coefficients.clone())
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_json(&fs::read_to_string(path)?)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn record() -> FitRecord {
        let model = Polynomial::new(vec![0.1, -1.0 / 3.0, std::f64::consts::PI, 1e-300, -7.25e12]);
        FitRecord::new(&model, 3.000_000_000_000_000_4)
    }

    #[test]
    fn test_json_is_lossless() {
        let original = record();
        let restored = FitRecord::from_json(&original.to_json().unwrap()).unwrap();
        assert_eq!(restored, original);
        for (a, b) in restored.coefficients.iter().zip(&original.coefficients) {
            assert_eq!(a.to_bits(), b.to_bits());
        }
        assert_eq!(restored.model().degree(), 4);
    }

    #[test]
    fn test_file_round_trip() {
        let path = std::env::temp_dir().join(format!("mandelarc-record-{}.json", std::process::id()));
        let original = record();
        original.save(&path).unwrap();
        let restored = FitRecord::load(&path).unwrap();
        let _ = fs::remove_file(&path);
        assert_eq!(restored, original);
    }
}

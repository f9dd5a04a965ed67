use num::{Float, Num};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Axis<T> {
    pub min: T,
    pub max: T,
}

impl<T> Axis<T>
where
    T: Num + PartialOrd + Copy,
{
    pub fn new(min: T, max: T) -> Self {
        Self { min, max }
    }

    pub fn length(&self) -> T {
        self.max - self.min
    }

    /// Closed-interval membership.
    pub fn contains(&self, v: T) -> bool {
        self.min <= v && v <= self.max
    }
}

impl<T> Axis<T>
where
    T: Float,
{
    /// `n` evenly spaced values from `min` to `max`, both ends included.
    pub fn linspace(&self, n: usize) -> Vec<T> {
        match n {
            0 => vec![],
            1 => vec![self.min],
            _ => {
                let last = T::from(n - 1).unwrap_or_else(T::one);
                let step = self.length() / last;
                (0..n)
                    .map(|i| {
                        if i == n - 1 {
                            self.max
                        } else {
                            self.min + step * T::from(i).unwrap_or_else(T::zero)
                        }
                    })
                    .collect()
            }
        }
    }

    /// Fails unless both bounds are finite and `min <= max`.
    pub fn check(&self, name: &str) -> Result<()> {
        if !(self.min.is_finite() && self.max.is_finite()) || self.min > self.max {
            return Err(Error::Config(format!(
                "{} must be a finite interval with min <= max",
                name
            )));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Frame<T> {
    pub x: Axis<T>,
    pub y: Axis<T>,
}

impl<T> Frame<T>
where
    T: Num + PartialOrd + Copy,
{
    pub fn new(x: Axis<T>, y: Axis<T>) -> Self {
        Self { x, y }
    }
}

impl Frame<f64> {
    /// Pixel holding `(x, y)` on a `width` x `height` raster, row 0 at `y.min`.
    pub fn to_pixel(&self, x: f64, y: f64, width: usize, height: usize) -> Option<(usize, usize)> {
        if width < 2 || height < 2 || !self.x.contains(x) || !self.y.contains(y) {
            return None;
        }
        let px = ((x - self.x.min) / self.x.length() * (width - 1) as f64).round();
        let py = ((y - self.y.min) / self.y.length() * (height - 1) as f64).round();
        Some((px as usize, py as usize))
    }
}

impl Default for Frame<f64> {
    fn default() -> Self {
        Self::new(Axis::new(-2.0, 1.0), Axis::new(-1.5, 1.5))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_linspace_endpoints() {
        let probes = Axis::new(-2.0, 1.0).linspace(103);
        assert_eq!(probes.len(), 103);
        assert_eq!(probes[0], -2.0);
        assert_eq!(probes[102], 1.0);
        assert!(probes.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_linspace_degenerate() {
        let axis = Axis::new(0.5, 0.5);
        assert!(axis.linspace(0).is_empty());
        assert_eq!(axis.linspace(1), vec![0.5]);
    }

    #[test]
    fn test_axis_check() {
        assert!(Axis::new(0.0, 1.5).check("search").is_ok());
        assert!(Axis::new(1.5, 0.0).check("search").is_err());
        assert!(Axis::new(f64::NAN, 0.0).check("search").is_err());
    }

    #[test]
    fn test_to_pixel() {
        let frame = Frame::default();
        assert_eq!(frame.to_pixel(-2.0, -1.5, 11, 11), Some((0, 0)));
        assert_eq!(frame.to_pixel(1.0, 1.5, 11, 11), Some((10, 10)));
        assert_eq!(frame.to_pixel(1.1, 0.0, 11, 11), None);
    }
}

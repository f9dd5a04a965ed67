use image::{Rgb, RgbImage};

use crate::coord::{Axis, Frame};
use crate::locator::Sample;
use crate::oracle::Escape;
use crate::polynomial::Polynomial;
use crate::solver::EscapeGrid;

pub trait ColorScale {
    /// `frac` in `[0, 1]`, 0 for the fastest escapes.
    fn color(&self, frac: f64) -> Rgb<u8>;
}

pub struct Greyscale;

impl ColorScale for Greyscale {
    fn color(&self, frac: f64) -> Rgb<u8> {
        let v: u8 = 255 - (frac.clamp(0.0, 1.0) * 255.0).round() as u8;
        Rgb([v, v, v])
    }
}

/// Dark red through orange to pale yellow.
pub struct Fire;

fn channel(frac: f64) -> u8 {
    (frac.clamp(0.0, 1.0) * 255.0).round() as u8
}

impl ColorScale for Fire {
    fn color(&self, frac: f64) -> Rgb<u8> {
        let t = frac.clamp(0.0, 1.0).sqrt();
        Rgb([channel(0.2 + 2.0 * t), channel(2.0 * t - 0.5), channel(3.0 * t - 2.0)])
    }
}

pub trait Painter {
    fn paint(&self, grid: &EscapeGrid) -> RgbImage;
}

/// Maps escape counts onto a colour scale; bounded points are black.
pub struct EscapePainter<C> {
    scale: C,
    max_iterations: u32,
}

impl<C: ColorScale> EscapePainter<C> {
    pub fn new(scale: C, max_iterations: u32) -> Self {
        Self {
            scale,
            max_iterations: max_iterations.max(1),
        }
    }

    fn escape_color(&self, escape: Escape) -> Rgb<u8> {
        match escape {
            Escape::Bounded => Rgb([0, 0, 0]),
            Escape::Unbounded { iterations } => self
                .scale
                .color(iterations as f64 / self.max_iterations as f64),
        }
    }
}

/// Raster row for a grid row; images put the largest imaginary part on top.
fn flip(row: usize, height: usize) -> u32 {
    (height - 1 - row) as u32
}

impl<C: ColorScale> Painter for EscapePainter<C> {
    fn paint(&self, grid: &EscapeGrid) -> RgbImage {
        let (width, height) = (grid.width(), grid.height());
        let mut img = RgbImage::new(width as u32, height as u32);
        for ((row, col), &escape) in grid.0.indexed_iter() {
            img.put_pixel(col as u32, flip(row, height), self.escape_color(escape));
        }
        img
    }
}

fn plot(img: &mut RgbImage, frame: &Frame<f64>, x: f64, y: f64, color: Rgb<u8>) {
    let (w, h) = (img.width() as usize, img.height() as usize);
    if let Some((px, py)) = frame.to_pixel(x, y, w, h) {
        img.put_pixel(px as u32, flip(py, h), color);
    }
}

/// Marks every located boundary point with a small cross.
pub fn overlay_samples(img: &mut RgbImage, frame: &Frame<f64>, samples: &[Sample], color: Rgb<u8>) {
    let dx = frame.x.length() / img.width().max(1) as f64;
    let dy = frame.y.length() / img.height().max(1) as f64;
    for sample in samples {
        if let Some(y) = sample.located {
            for k in -2..=2 {
                let k = k as f64;
                plot(img, frame, sample.probe + k * dx, y, color);
                plot(img, frame, sample.probe, y + k * dy, color);
            }
        }
    }
}

/// Traces the fitted polynomial across `domain`, one point per column.
pub fn overlay_curve(
    img: &mut RgbImage,
    frame: &Frame<f64>,
    model: &Polynomial,
    domain: &Axis<f64>,
    color: Rgb<u8>,
) {
    let steps = 4 * img.width() as usize;
    for x in domain.linspace(steps) {
        plot(img, frame, x, model.eval(x), color);
    }
}

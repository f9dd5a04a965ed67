use ndarray::{s, Array2};

use crate::complex::{c, C};
use crate::coord::Frame;
use crate::oracle::{Escape, EscapeOracle};
use crate::solver::Solver;
use crate::threads::{split_ranges, Join, Split};

fn split_rows<T: Clone>(a: Array2<T>, n: usize) -> Vec<Array2<T>> {
    split_ranges(a.nrows(), n)
        .into_iter()
        .map(|(start, end)| a.slice(s![start..end, ..]).to_owned())
        .collect()
}

fn join_rows<T: Clone>(parts: Vec<Array2<T>>, fill: T) -> Array2<T> {
    let width = parts.iter().map(|p| p.ncols()).max().unwrap_or(0);
    let height = parts.iter().map(|p| p.nrows()).sum();
    let mut joined = Array2::from_elem((height, width), fill);
    let mut row = 0;
    for part in parts {
        let rows = part.nrows();
        if rows > 0 {
            joined.slice_mut(s![row..row + rows, ..]).assign(&part);
        }
        row += rows;
    }
    joined
}

/// Complex sample points of a raster, row 0 at `frame.y.min`.
#[derive(Clone, Debug)]
pub struct ComplexGrid(pub Array2<C<f64>>);

impl ComplexGrid {
    pub fn new(frame: &Frame<f64>, width: usize, height: usize) -> Self {
        let xs = frame.x.linspace(width);
        let ys = frame.y.linspace(height);
        Self(Array2::from_shape_fn((height, width), |(row, col)| {
            c(xs[col], ys[row])
        }))
    }

    pub fn width(&self) -> usize {
        self.0.ncols()
    }

    pub fn height(&self) -> usize {
        self.0.nrows()
    }
}

impl Split for ComplexGrid {
    fn split_parts(self, n: usize) -> Vec<Self> {
        split_rows(self.0, n).into_iter().map(ComplexGrid).collect()
    }
}

impl Join for ComplexGrid {
    fn join_parts(parts: Vec<Self>) -> Self {
        Self(join_rows(
            parts.into_iter().map(|p| p.0).collect(),
            c(0.0, 0.0),
        ))
    }
}

/// Oracle output over a raster.
#[derive(Clone, Debug, PartialEq)]
pub struct EscapeGrid(pub Array2<Escape>);

impl EscapeGrid {
    pub fn width(&self) -> usize {
        self.0.ncols()
    }

    pub fn height(&self) -> usize {
        self.0.nrows()
    }

    pub fn escape(&self, x: usize, y: usize) -> Escape {
        self.0[[y, x]]
    }

    pub fn bounded_count(&self) -> usize {
        self.0.iter().filter(|e| e.is_bounded()).count()
    }
}

impl Split for EscapeGrid {
    fn split_parts(self, n: usize) -> Vec<Self> {
        split_rows(self.0, n).into_iter().map(EscapeGrid).collect()
    }
}

impl Join for EscapeGrid {
    fn join_parts(parts: Vec<Self>) -> Self {
        Self(join_rows(
            parts.into_iter().map(|p| p.0).collect(),
            Escape::Bounded,
        ))
    }
}

#[derive(Clone, Debug, Default)]
pub struct GridSolver {
    oracle: EscapeOracle,
}

impl GridSolver {
    pub fn new(oracle: EscapeOracle) -> Self {
        Self { oracle }
    }
}

impl Solver<ComplexGrid, EscapeGrid> for GridSolver {
    fn solve(&self, grid: ComplexGrid) -> EscapeGrid {
        EscapeGrid(grid.0.map(|&point| self.oracle.classify(point)))
    }
}

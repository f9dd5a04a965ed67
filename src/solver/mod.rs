use crate::error::Result;
use crate::threads::{Call, Join, Split, WorkerPool};

pub mod grid;

pub use grid::{ComplexGrid, EscapeGrid, GridSolver};

/// A pure mapping from a splittable input to a joinable output. Any solver
/// can run inline or be fanned out over a `WorkerPool`.
pub trait Solver<I, O> {
    fn solve(&self, input: I) -> O;

    fn threaded(self, n: usize) -> WorkerPool<I, O>
    where
        Self: Sized + Clone + Send + 'static,
        I: Split + Send + 'static,
        O: Join + Send + 'static,
    {
        WorkerPool::with(n, || {
            let solver = self.clone();
            move |input| solver.solve(input)
        })
    }
}

/// Runs the wrapped solver on the calling thread.
#[derive(Clone, Debug)]
pub struct Inline<S>(pub S);

impl<S, I, O> Call<I, O> for Inline<S>
where
    S: Solver<I, O>,
{
    fn call(&self, input: I) -> Result<O> {
        Ok(self.0.solve(input))
    }
}

/// `threads == 0` runs inline, anything else spawns a pool of that size.
pub fn make_solver<S, I, O>(solver: S, threads: usize) -> Box<dyn Call<I, O>>
where
    S: Solver<I, O> + Clone + Send + 'static,
    I: Split + Send + 'static,
    O: Join + Send + 'static,
{
    if threads == 0 {
        Box::new(Inline(solver))
    } else {
        Box::new(solver.threaded(threads))
    }
}

pub fn default_threads() -> usize {
    num_cpus::get_physical()
}

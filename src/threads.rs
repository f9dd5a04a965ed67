use std::iter::zip;
use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc;
use std::thread;

use crate::error::{Error, Result};

pub trait Split: Sized {
    /// Splits into exactly `n` ordered parts, some possibly empty.
    fn split_parts(self, n: usize) -> Vec<Self>;
}

pub trait Join: Sized {
    fn join_parts(parts: Vec<Self>) -> Self;
}

/// Half-open index ranges cutting `len` items into `n` contiguous runs.
/// Leftover items go to the leading runs.
pub fn split_ranges(len: usize, n: usize) -> Vec<(usize, usize)> {
    let n = n.max(1);
    let size = len / n;
    let extra = len % n;
    let mut ranges = Vec::with_capacity(n);
    let mut start = 0;
    for i in 0..n {
        let end = start + size + usize::from(i < extra);
        ranges.push((start, end));
        start = end;
    }
    ranges
}

impl<T> Split for Vec<T> {
    fn split_parts(self, n: usize) -> Vec<Self> {
        let ranges = split_ranges(self.len(), n);
        let mut items = self.into_iter();
        ranges
            .into_iter()
            .map(|(start, end)| items.by_ref().take(end - start).collect())
            .collect()
    }
}

impl<T> Join for Vec<T> {
    fn join_parts(parts: Vec<Self>) -> Self {
        parts.into_iter().flatten().collect()
    }
}

#[derive(Debug)]
pub struct SplitPart<T> {
    pub n: usize,
    pub part: T,
}

impl<T> SplitPart<T> {
    pub fn new(part: T, n: usize) -> Self {
        Self { part, n }
    }
}

impl<T: Join> SplitPart<T> {
    /// Reassembles parts received in any order.
    pub fn join(mut splits: Vec<SplitPart<T>>) -> Result<T> {
        if splits.is_empty() {
            return Err(Error::Join);
        }
        splits.sort_by_key(|s| s.n);
        if splits.iter().enumerate().any(|(i, s)| s.n != i) {
            return Err(Error::Join);
        }
        Ok(T::join_parts(splits.into_iter().map(|s| s.part).collect()))
    }
}

pub trait Call<I, O> {
    fn call(&self, input: I) -> Result<O>;
}

struct Worker<I> {
    tx: mpsc::Sender<SplitPart<I>>,
}

impl<I> Worker<I>
where
    I: Send + 'static,
{
    /// A panic in `f` is reported as a `None` part; the worker keeps serving.
    fn new<F, O>(f: F, out: mpsc::Sender<SplitPart<Option<O>>>) -> Self
    where
        F: Fn(I) -> O + Send + 'static,
        O: Send + 'static,
    {
        let (tx, rx) = mpsc::channel::<SplitPart<I>>();
        thread::spawn(move || {
            while let Ok(SplitPart { n, part }) = rx.recv() {
                let result = panic::catch_unwind(AssertUnwindSafe(|| f(part))).ok();
                if out.send(SplitPart::new(result, n)).is_err() {
                    return;
                }
            }
        });
        Self { tx }
    }
}

/// Fixed set of worker threads. Each call splits the input into one part
/// per worker and joins the results back in input order. A part whose
/// solver panics fails the call with `Error::WorkerDisconnected`.
pub struct WorkerPool<I, O> {
    workers: Vec<Worker<I>>,
    rx: mpsc::Receiver<SplitPart<Option<O>>>,
    tx: mpsc::Sender<SplitPart<Option<O>>>,
}

impl<I, O> WorkerPool<I, O>
where
    I: Send + 'static,
    O: Send + 'static,
{
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            workers: vec![],
            rx,
            tx,
        }
    }

    pub fn add_worker<F>(&mut self, f: F)
    where
        F: Fn(I) -> O + Send + 'static,
    {
        self.workers.push(Worker::new(f, self.tx.clone()));
    }

    /// Pool of `n` workers (at least one), each built by `make`.
    pub fn with<G, F>(n: usize, make: G) -> Self
    where
        G: Fn() -> F,
        F: Fn(I) -> O + Send + 'static,
    {
        let mut this = Self::new();
        for _ in 0..n.max(1) {
            this.add_worker(make());
        }
        this
    }

    pub fn size(&self) -> usize {
        self.workers.len()
    }
}

impl<I, O> Default for WorkerPool<I, O>
where
    I: Send + 'static,
    O: Send + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<I, O> Call<I, O> for WorkerPool<I, O>
where
    I: Split,
    O: Join,
{
    fn call(&self, input: I) -> Result<O> {
        let sn = self.workers.len();
        if sn == 0 {
            return Err(Error::WorkerDisconnected);
        }
        let parts = input.split_parts(sn);
        let sent = parts.len();
        for (worker, (n, part)) in zip(&self.workers, parts.into_iter().enumerate()) {
            worker
                .tx
                .send(SplitPart::new(part, n))
                .map_err(|_| Error::WorkerDisconnected)?;
        }
        // Drain every part before failing so nothing stale is left queued.
        let mut results = Vec::with_capacity(sent);
        let mut lost = false;
        for _ in 0..sent {
            let SplitPart { n, part } = self.rx.recv().map_err(|_| Error::WorkerDisconnected)?;
            match part {
                Some(part) => results.push(SplitPart::new(part, n)),
                None => lost = true,
            }
        }
        if lost {
            return Err(Error::WorkerDisconnected);
        }
        SplitPart::join(results)
    }
}

use std::fs;
use std::io::{stdout, Write};
use std::time::{Duration, Instant};

use crate::error::Result;

/// A named closure timed over a fixed number of repetitions.
pub struct Benchmark {
    name: String,
    iterations: usize,
    f: Box<dyn Fn()>,
}

impl Benchmark {
    pub fn iter<F: Fn() + 'static>(name: &str, iterations: usize, f: F) -> Self {
        Self {
            name: name.to_string(),
            iterations: iterations.max(1),
            f: Box::new(f),
        }
    }

    pub fn once<F: Fn() + 'static>(name: &str, f: F) -> Self {
        Self::iter(name, 1, f)
    }

    fn run(&self) -> Duration {
        let start = Instant::now();
        for _ in 0..self.iterations {
            (self.f)();
        }
        start.elapsed()
    }
}

#[derive(Clone, Debug)]
pub struct Timing {
    pub name: String,
    pub iterations: usize,
    pub total: Duration,
}

impl Timing {
    pub fn per_call(&self) -> Duration {
        self.total / self.iterations as u32
    }
}

#[derive(Default)]
pub struct BenchmarkReport {
    benches: Vec<Benchmark>,
    timings: Vec<Timing>,
}

impl BenchmarkReport {
    pub fn with_benches(benches: Vec<Benchmark>) -> Self {
        Self {
            benches,
            timings: vec![],
        }
    }

    pub fn timings(&self) -> &[Timing] {
        &self.timings
    }

    pub fn run(&mut self) {
        for bench in &self.benches {
            let total = bench.run();
            self.timings.push(Timing {
                name: bench.name.clone(),
                iterations: bench.iterations,
                total,
            });
            print!(".");
            let _ = stdout().flush();
        }
        println!();
    }

    pub fn show(&self) {
        println!("  {: <36} {: >12}   {: >12}", "benchmark", "total", "per_call");
        for t in &self.timings {
            println!(
                "  {: <36} {: >12}   {: >12}",
                t.name,
                format!("{:.3?}", t.total),
                format!("{:.3?}", t.per_call()),
            );
        }
    }

    pub fn to_csv(&self) -> String {
        let mut lines = vec!["benchmark,total_us,iterations,per_call_us".to_string()];
        for t in &self.timings {
            lines.push(format!(
                "{},{},{},{}",
                t.name,
                t.total.as_micros(),
                t.iterations,
                t.per_call().as_micros(),
            ));
        }
        lines.push(String::new());
        lines.join("\n")
    }

    pub fn report(&mut self, name: &str) -> Result<()> {
        print!("Benchmark: {}", name);
        self.run();
        self.show();
        fs::write(format!("benchmark_{}.csv", name), self.to_csv())?;
        Ok(())
    }
}

use std::path::PathBuf;

use image::Rgb;
use structopt::StructOpt;
use tracing::info;
use tracing_subscriber::EnvFilter;

use mandelarc::config::PipelineConfig;
use mandelarc::painter::{overlay_curve, overlay_samples, EscapePainter, Fire, Painter};
use mandelarc::persist::FitRecord;
use mandelarc::solver::default_threads;
use mandelarc::{Pipeline, Result};

#[derive(Debug, StructOpt)]
#[structopt(
    name = "mandelarc",
    about = "Locate the upper Mandelbrot boundary, fit it, and measure its length"
)]
struct Opt {
    /// JSON pipeline configuration; unset fields use defaults
    #[structopt(short, long, parse(from_os_str))]
    config: Option<PathBuf>,

    /// Worker threads, 0 to run inline [default: physical cores]
    #[structopt(short, long)]
    threads: Option<usize>,

    /// Number of probe lines
    #[structopt(long)]
    probes: Option<usize>,

    /// Polynomial degree
    #[structopt(long)]
    degree: Option<usize>,

    /// Where to write coefficients and arc length
    #[structopt(short, long, parse(from_os_str), default_value = "boundary.json")]
    output: PathBuf,

    /// Also render the escape grid with the boundary overlaid
    #[structopt(short, long, parse(from_os_str))]
    image: Option<PathBuf>,

    #[structopt(long)]
    width: Option<usize>,

    #[structopt(long)]
    height: Option<usize>,
}

impl Opt {
    fn config(&self) -> Result<PipelineConfig> {
        let mut config = match &self.config {
            Some(path) => PipelineConfig::load(path)?,
            None => PipelineConfig::default(),
        };
        config.threads = self.threads.unwrap_or_else(default_threads);
        if let Some(n) = self.probes {
            config.probe_count = n;
        }
        if let Some(d) = self.degree {
            config.degree = d;
        }
        if let Some(w) = self.width {
            config.width = w;
        }
        if let Some(h) = self.height {
            config.height = h;
        }
        Ok(config)
    }
}

fn run(opt: Opt) -> Result<()> {
    let pipeline = Pipeline::new(opt.config()?)?;
    let report = pipeline.run()?;

    let record = FitRecord::new(&report.model, report.arc_length);
    record.save(&opt.output)?;
    info!(path = %opt.output.display(), "fit record written");
    println!("arc length: {}", report.arc_length);

    if let Some(path) = &opt.image {
        let config = pipeline.config();
        let grid = pipeline.escape_grid()?;
        let mut img = EscapePainter::new(Fire, config.oracle.max_iter).paint(&grid);
        overlay_curve(&mut img, &config.frame, &report.model, &config.fit_domain, Rgb([0, 200, 255]));
        overlay_samples(&mut img, &config.frame, &report.samples, Rgb([255, 255, 255]));
        img.save(path)?;
        info!(path = %path.display(), "image written");
    }
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(e) = run(Opt::from_args()) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

// Kronrod abscissae on [0, 1]; odd indices are the 7-point Gauss nodes.
const XGK: [f64; 8] = [
    0.991_455_371_120_812_6,
    0.949_107_912_342_758_5,
    0.864_864_423_359_769_1,
    0.741_531_185_599_394_4,
    0.586_087_235_467_691_1,
    0.405_845_151_377_397_2,
    0.207_784_955_007_898_5,
    0.0,
];

const WGK: [f64; 8] = [
    0.022_935_322_010_529_22,
    0.063_092_092_629_978_55,
    0.104_790_010_322_250_18,
    0.140_653_259_715_525_92,
    0.169_004_726_639_267_9,
    0.190_350_578_064_785_4,
    0.204_432_940_075_298_9,
    0.209_482_141_084_727_83,
];

const WG: [f64; 4] = [
    0.129_484_966_168_869_7,
    0.279_705_391_489_276_7,
    0.381_830_050_505_118_9,
    0.417_959_183_673_469_4,
];

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Estimate {
    pub value: f64,
    pub error: f64,
    pub intervals: usize,
}

#[derive(Copy, Clone, Debug)]
struct Segment {
    a: f64,
    b: f64,
    value: f64,
    error: f64,
}

/// 15-point Kronrod rule with the embedded 7-point Gauss rule as error
/// estimate, scaled the way QUADPACK's qk15 does.
fn kronrod15<F: Fn(f64) -> f64>(f: &F, a: f64, b: f64) -> Segment {
    let center = 0.5 * (a + b);
    let half = 0.5 * (b - a);

    let fc = f(center);
    let mut res_k = WGK[7] * fc;
    let mut res_g = WG[3] * fc;
    let mut res_abs = res_k.abs();
    let mut fv1 = [0.0; 7];
    let mut fv2 = [0.0; 7];
    for j in 0..7 {
        let dx = half * XGK[j];
        let f1 = f(center - dx);
        let f2 = f(center + dx);
        fv1[j] = f1;
        fv2[j] = f2;
        res_k += WGK[j] * (f1 + f2);
        res_abs += WGK[j] * (f1.abs() + f2.abs());
        if j % 2 == 1 {
            res_g += WG[j / 2] * (f1 + f2);
        }
    }

    let mean = 0.5 * res_k;
    let mut res_asc = WGK[7] * (fc - mean).abs();
    for j in 0..7 {
        res_asc += WGK[j] * ((fv1[j] - mean).abs() + (fv2[j] - mean).abs());
    }

    let value = res_k * half;
    res_abs *= half.abs();
    res_asc *= half.abs();
    let mut error = ((res_k - res_g) * half).abs();
    if res_asc != 0.0 && error != 0.0 {
        error = res_asc * (200.0 * error / res_asc).powf(1.5).min(1.0);
    }
    if res_abs > f64::MIN_POSITIVE / (50.0 * f64::EPSILON) {
        error = error.max(50.0 * f64::EPSILON * res_abs);
    }
    Segment { a, b, value, error }
}

/// Globally adaptive Gauss-Kronrod integration.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Quadrature {
    pub abs_tol: f64,
    pub rel_tol: f64,
    pub limit: usize,
}

impl Quadrature {
    pub fn new(abs_tol: f64, rel_tol: f64, limit: usize) -> Self {
        Self {
            abs_tol,
            rel_tol,
            limit,
        }
    }

    /// Integrates `f` over the finite interval `[a, b]`.
    ///
    /// Keeps bisecting the segment with the largest error until the summed
    /// error meets `max(abs_tol, rel_tol * |value|)`. If `limit` segments are
    /// reached first, the current estimate is returned with a warning.
    pub fn integrate<F>(&self, f: F, a: f64, b: f64) -> Estimate
    where
        F: Fn(f64) -> f64,
    {
        let mut segments = vec![kronrod15(&f, a, b)];
        loop {
            let value: f64 = segments.iter().map(|s| s.value).sum();
            let error: f64 = segments.iter().map(|s| s.error).sum();
            let estimate = Estimate {
                value,
                error,
                intervals: segments.len(),
            };
            if error <= self.abs_tol.max(self.rel_tol * value.abs()) {
                debug!(value, error, intervals = segments.len(), "quadrature converged");
                return estimate;
            }
            if segments.len() >= self.limit.max(1) {
                warn!(value, error, limit = self.limit, "quadrature hit its interval limit");
                return estimate;
            }

            let worst = segments
                .iter()
                .enumerate()
                .fold(0, |best, (i, s)| if s.error > segments[best].error { i } else { best });
            let Segment { a: lo, b: hi, .. } = segments[worst];
            let mid = 0.5 * (lo + hi);
            if mid <= lo || mid >= hi {
                warn!(value, error, lo, hi, "quadrature cannot subdivide further");
                return estimate;
            }
            segments[worst] = kronrod15(&f, lo, mid);
            segments.insert(worst + 1, kronrod15(&f, mid, hi));
        }
    }
}

impl Default for Quadrature {
    fn default() -> Self {
        Self::new(1.49e-8, 1.49e-8, 50)
    }
}

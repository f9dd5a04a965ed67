use num::complex::Complex;

pub type C<T> = Complex<T>;

pub fn c(re: f64, im: f64) -> C<f64> {
    Complex::new(re, im)
}

/// Point on a vertical probe line: the probe fixes the real part, the
/// located coordinate runs along the imaginary axis.
pub fn on_probe(probe: f64, located: f64) -> C<f64> {
    c(probe, located)
}

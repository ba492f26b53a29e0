//! Empirical correlations between the phase-field shape parameters.
//!
//! `y(g2)` relates the dimensionless `g²` to `1/γ`, and `f(y)` gives the
//! interface-energy integral for that `γ`. Both are polynomial fits and are only
//! meaningful for `g²` roughly in `(0.1, 0.8)`.

/// Quartic fit `y = 1/γ` as a function of `g²`.
#[inline]
pub fn inverse_gamma(g2: f64) -> f64 {
    let g4 = g2 * g2;
    -5.288 * g4 * g4 - 0.09364 * g4 * g2 + 9.965 * g4 - 8.183 * g2 + 2.007
}

/// Anisotropy exponent `γ` for a given `g²`.
#[inline]
pub fn gamma(g2: f64) -> f64 {
    1.0 / inverse_gamma(g2)
}

/// Octic fit of the interface-energy function `f(y)`.
#[inline]
pub fn interface_energy_function(y: f64) -> f64 {
    let y2 = y * y;
    let y3 = y2 * y;
    let y4 = y2 * y2;
    0.05676 * y3 * y3 * y2 - 0.2924 * y3 * y3 + 0.6367 * y4 * y - 0.7749 * y4 + 0.6107 * y2
        - 0.4324 * y
        + 0.2792
}

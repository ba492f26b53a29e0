use super::config::InclinationConfig;
use crate::core::models::pair::GrainPair;
use nalgebra::Vector3;
use std::f64::consts::PI;

/// Added to `|∇η_m - ∇η_n|²` so the direction stays defined where the
/// gradients cancel.
pub const GRADIENT_EPSILON: f64 = 1.0e-7;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InclinationFactors {
    pub f_sigma: f64,
    pub f_mob: f64,
}

impl InclinationFactors {
    pub const ISOTROPIC: Self = Self {
        f_sigma: 1.0,
        f_mob: 1.0,
    };
}

/// Four-fold in-plane inclination dependence of GB energy and mobility.
///
/// Each boundary `(m, n)` is given the reference orientation `φ = π n / (2N)`.
/// The boundary normal is taken from the in-plane difference of the two
/// order-parameter gradients, and both properties are scaled by
/// `1 + δ cos 4(θ - φ)`. Only valid for 2-D problems; the configuration
/// builder refuses anything else.
#[derive(Debug, Clone, PartialEq)]
pub struct InclinationModel {
    delta_sigma: f64,
    delta_mob: f64,
    /// `(cos 2φ, sin 2φ)` indexed by the higher grain of a pair.
    orientations: Vec<(f64, f64)>,
}

impl InclinationModel {
    pub fn new(config: &InclinationConfig, num_grains: usize) -> Self {
        let orientations = (0..num_grains)
            .map(|n| {
                let two_phi = 2.0 * Self::reference_angle(n, num_grains);
                (two_phi.cos(), two_phi.sin())
            })
            .collect();
        Self {
            delta_sigma: config.delta_sigma,
            delta_mob: config.delta_mob,
            orientations,
        }
    }

    /// Reference orientation `φ` of every boundary whose higher grain is `high`.
    pub fn reference_angle(high: usize, num_grains: usize) -> f64 {
        PI * high as f64 / (2.0 * num_grains as f64)
    }

    /// `cos 4(θ - φ)` for the boundary between the two gradients.
    #[inline]
    pub fn cos_4theta(&self, pair: GrainPair, grad_low: &Vector3<f64>, grad_high: &Vector3<f64>) -> f64 {
        let (cos_phi, sin_phi) = self.orientations[pair.high()];
        let a = grad_low.x - grad_high.x;
        let b = grad_low.y - grad_high.y;
        let ab = a * a + b * b + GRADIENT_EPSILON;

        let cos_2theta = cos_phi * (a * a - b * b) / ab + sin_phi * 2.0 * a * b / ab;
        2.0 * cos_2theta * cos_2theta - 1.0
    }

    #[inline]
    pub fn factors(
        &self,
        pair: GrainPair,
        grad_low: &Vector3<f64>,
        grad_high: &Vector3<f64>,
    ) -> InclinationFactors {
        let cos_4theta = self.cos_4theta(pair, grad_low, grad_high);
        InclinationFactors {
            f_sigma: 1.0 + self.delta_sigma * cos_4theta,
            f_mob: 1.0 + self.delta_mob * cos_4theta,
        }
    }
}

//! Per-pair calibration of the phase-field shape parameters.
//!
//! For every grain boundary the dimensionless parameter `a*` is the fixed point of
//!
//! ```text
//! a = sqrt( f(y(g2(a))) / g2(a) ),   g2(a) = σ² / (κ(a) μ0),   κ(a) = a w σ
//! ```
//!
//! where `w` is the diffuse interface width and `μ0` is shared by all pairs.
//! The solve is plain fixed-point iteration, bounded by an iteration cap.

use super::config::{CalibrationConfig, EngineConfig};
use super::progress::{Progress, ProgressReporter};
use crate::core::correlation::{interface_energy_function, inverse_gamma};
use crate::core::models::calibration::{CalibratedPairParams, PairCalibration};
use crate::core::models::pair::GrainPair;
use crate::core::models::table::GrainPairTable;
use thiserror::Error;
use tracing::{debug, info, instrument};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum CalibrationError {
    #[error(
        "Pair {pair}: fixed point did not converge after {iterations} iterations (last estimate a = {last_estimate})"
    )]
    NotConverged {
        pair: GrainPair,
        last_estimate: f64,
        iterations: usize,
    },

    #[error("Pair {pair}: iteration left the correlation domain (g2 = {g2}, y = {y})")]
    OutsideCorrelationDomain { pair: GrainPair, g2: f64, y: f64 },

    #[error("Pair {pair}: GB energy must be positive, got {sigma}")]
    NonPositiveEnergy { pair: GrainPair, sigma: f64 },

    #[error("Reference mobility constant mu0 = {0} is not a positive number")]
    InvalidReference(f64),
}

/// One application of the fixed-point map.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedPointStep {
    /// Input estimate.
    pub a: f64,
    pub kappa: f64,
    pub g2: f64,
    /// `1/γ` from the quartic correlation.
    pub y: f64,
    /// Output estimate `sqrt(f(y) / g2)`.
    pub next: f64,
}

impl FixedPointStep {
    #[inline]
    pub fn at(a: f64, sigma: f64, interface_width: f64, mu0: f64) -> Self {
        let kappa = a * interface_width * sigma;
        let g2 = sigma * sigma / (kappa * mu0);
        let y = inverse_gamma(g2);
        let next = (interface_energy_function(y) / g2).sqrt();
        Self {
            a,
            kappa,
            g2,
            y,
            next,
        }
    }

    /// Whether `γ = 1/y` and the next estimate are finite.
    #[inline]
    pub fn is_in_domain(&self) -> bool {
        self.g2.is_finite() && self.y.is_finite() && self.y != 0.0 && self.next.is_finite()
    }

    fn calibration(&self) -> PairCalibration {
        PairCalibration {
            kappa: self.kappa,
            gamma: 1.0 / self.y,
            a: self.next,
            g2: self.g2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FixedPointOutcome {
    /// `calibration.a` is the converged `a*`; the remaining fields come from
    /// the step that met the tolerance.
    Converged {
        calibration: PairCalibration,
        iterations: usize,
    },
    NotConverged {
        last_estimate: f64,
        iterations: usize,
    },
    OutsideDomain {
        g2: f64,
        y: f64,
        iterations: usize,
    },
}

/// Solves the fixed point for a single GB energy (in model units).
pub fn solve_pair(
    sigma: f64,
    interface_width: f64,
    mu0: f64,
    config: &CalibrationConfig,
) -> FixedPointOutcome {
    let mut a = config.initial_guess;
    for iteration in 1..=config.max_iterations {
        let step = FixedPointStep::at(a, sigma, interface_width, mu0);
        if !step.is_in_domain() {
            return FixedPointOutcome::OutsideDomain {
                g2: step.g2,
                y: step.y,
                iterations: iteration,
            };
        }
        if (step.next - a).abs() < config.tolerance {
            return FixedPointOutcome::Converged {
                calibration: step.calibration(),
                iterations: iteration,
            };
        }
        a = step.next;
    }
    FixedPointOutcome::NotConverged {
        last_estimate: a,
        iterations: config.max_iterations,
    }
}

/// `μ0 = 6 σ̄ / w` with `σ̄` the midpoint of the extreme pair energies.
pub fn reference_mu(table: &GrainPairTable, interface_width: f64) -> Result<f64, CalibrationError> {
    let extremes = table
        .energy_extremes()
        .ok_or(CalibrationError::InvalidReference(f64::NAN))?;
    let mu0 = 6.0 * extremes.mean() / interface_width;
    if mu0 > 0.0 && mu0.is_finite() {
        Ok(mu0)
    } else {
        Err(CalibrationError::InvalidReference(mu0))
    }
}

fn calibrate_pair(
    pair: GrainPair,
    sigma: f64,
    interface_width: f64,
    mu0: f64,
    config: &CalibrationConfig,
    reporter: &ProgressReporter,
) -> Result<PairCalibration, CalibrationError> {
    if sigma.is_nan() || sigma <= 0.0 {
        return Err(CalibrationError::NonPositiveEnergy { pair, sigma });
    }
    match solve_pair(sigma, interface_width, mu0, config) {
        FixedPointOutcome::Converged {
            calibration,
            iterations,
        } => {
            debug!(
                "Pair {} converged in {} iterations: kappa = {:.6e}, gamma = {:.6}, a = {:.9}, g2 = {:.6}",
                pair, iterations, calibration.kappa, calibration.gamma, calibration.a, calibration.g2
            );
            reporter.report(Progress::PairCalibrated { pair, iterations });
            Ok(calibration)
        }
        FixedPointOutcome::NotConverged {
            last_estimate,
            iterations,
        } => Err(CalibrationError::NotConverged {
            pair,
            last_estimate,
            iterations,
        }),
        FixedPointOutcome::OutsideDomain { g2, y, .. } => {
            Err(CalibrationError::OutsideCorrelationDomain { pair, g2, y })
        }
    }
}

/// Calibrates every grain pair of `table`.
///
/// Each pair starts from the configured initial guess, so pairs are independent
/// and are solved in parallel when the `parallel` feature is enabled. The first
/// failing pair in canonical order is reported.
#[instrument(skip_all, name = "pair_calibration")]
pub fn calibrate(
    table: &GrainPairTable,
    config: &EngineConfig,
    reporter: &ProgressReporter,
) -> Result<CalibratedPairParams, CalibrationError> {
    let width = config.interface_width;
    let mu0 = reference_mu(table, width)?;
    let num_pairs = table.pairs().len();
    info!(
        "Calibrating {} grain pair(s) with mu0 = {:.6e} and interface width {}.",
        num_pairs, mu0, width
    );

    reporter.report(Progress::TaskStart {
        total_steps: num_pairs as u64,
    });

    let entries: Vec<_> = table.iter().map(|(pair, p)| (pair, p.sigma)).collect();

    #[cfg(not(feature = "parallel"))]
    let iterator = entries.iter();

    #[cfg(feature = "parallel")]
    let iterator = entries.par_iter();

    let solved = iterator
        .map(|&(pair, sigma)| {
            calibrate_pair(pair, sigma, width, mu0, &config.calibration, reporter)
        })
        .collect::<Vec<_>>();

    reporter.report(Progress::TaskFinish);

    let calibrations = solved.into_iter().collect::<Result<Vec<_>, _>>()?;
    Ok(CalibratedPairParams::new(
        table.pairs().with_values(calibrations),
        mu0,
    ))
}

//! Per-point evaluation of effective GB properties.
//!
//! Each grain pair contributes its calibrated `κ*`, `γ*` and kinetic coefficient,
//! temperature-corrected and optionally inclination-corrected, weighted by how
//! strongly the point sits inside that pair's interface.

use super::error::EngineError;
use super::inclination::InclinationFactors;
use super::model::GbAnisotropyModel;
use crate::core::correlation;
use crate::core::models::point::{PointSample, ScalarFieldOutputs};
use crate::core::units::arrhenius;

const WEIGHT_SCALE: f64 = 1.0e5;
/// Keeps every pair weight, and hence their sum, strictly positive.
const WEIGHT_FLOOR: f64 = 0.01;

/// Interface indicator `(1e5 η_m² + 0.01)(1e5 η_n² + 0.01)`.
#[inline]
pub fn interface_weight(eta_m: f64, eta_n: f64) -> f64 {
    (WEIGHT_SCALE * eta_m * eta_m + WEIGHT_FLOOR) * (WEIGHT_SCALE * eta_n * eta_n + WEIGHT_FLOOR)
}

#[derive(Debug, Default, Clone, Copy)]
struct WeightedSums {
    weight: f64,
    kappa: f64,
    gamma: f64,
    kinetic: f64,
}

pub fn evaluate_point(
    model: &GbAnisotropyModel,
    sample: &PointSample,
) -> Result<ScalarFieldOutputs, EngineError> {
    let num_grains = model.num_grains();
    if sample.order_parameters.len() != num_grains || sample.gradients.len() != num_grains {
        return Err(EngineError::SampleShape {
            expected: num_grains,
            values: sample.order_parameters.len(),
            gradients: sample.gradients.len(),
        });
    }
    let temperature = sample.temperature;
    if temperature.is_nan() || temperature <= 0.0 || temperature.is_infinite() {
        return Err(EngineError::InvalidTemperature { temperature });
    }

    let eta = &sample.order_parameters;
    let width = model.config().interface_width;
    let inclination = model.inclination();
    let mut sums = WeightedSums::default();

    let pairs = model.table().iter().zip(model.calibration().pairs().values());
    for ((pair, props), cal) in pairs {
        let (m, n) = (pair.low(), pair.high());
        let mobility = props.mobility * arrhenius(props.activation_energy, temperature);

        let (factors, gamma) = match inclination {
            Some(incl) => {
                let f = incl.factors(pair, &sample.gradients[m], &sample.gradients[n]);
                (f, correlation::gamma(cal.g2 * f.f_sigma))
            }
            None => (InclinationFactors::ISOTROPIC, cal.gamma),
        };

        let weight = interface_weight(eta[m], eta[n]);
        sums.weight += weight;
        sums.kappa += cal.kappa * factors.f_sigma * weight;
        sums.gamma += gamma * weight;
        sums.kinetic += weight * mobility * factors.f_mob / (width * cal.a);
    }

    let constants = model.constants();
    Ok(ScalarFieldOutputs {
        kappa: sums.kappa / sums.weight,
        gamma: sums.gamma / sums.weight,
        kinetic_coefficient: sums.kinetic / sums.weight,
        mobility_constant: constants.mobility_constant,
        molar_volume: constants.molar_volume,
        entropy_difference: constants.entropy_difference,
        activation_width: constants.activation_width,
        gradient_correction_multiplier: constants.gradient_correction_multiplier,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::pair::GrainPair;
    use crate::core::models::table::RawPairMatrices;
    use crate::core::units::{BOLTZMANN_EV_PER_K, JOULE_TO_EV};
    use crate::engine::config::{EngineConfigBuilder, InclinationConfig};
    use crate::engine::progress::ProgressReporter;
    use nalgebra::Vector3;

    const TOLERANCE: f64 = 1e-9;

    fn rel_approx_equal(a: f64, b: f64) -> bool {
        (a - b).abs() <= TOLERANCE * a.abs().max(b.abs()).max(1e-300)
    }

    /// Length scale giving an energy conversion factor of one.
    fn unit_energy_length_scale() -> f64 {
        (1.0 / JOULE_TO_EV).sqrt()
    }

    fn raw(sigmas: &[&[f64]], mobility: f64, q: f64) -> RawPairMatrices {
        let n = sigmas.len();
        RawPairMatrices {
            sigma: sigmas.iter().map(|r| r.to_vec()).collect(),
            mobility: vec![vec![mobility; n]; n],
            activation_energy: vec![vec![q; n]; n],
        }
    }

    fn build(raw: &RawPairMatrices, inclination: Option<InclinationConfig>) -> GbAnisotropyModel {
        let config = EngineConfigBuilder::new()
            .num_grains(raw.num_grains())
            .interface_width(6.0)
            .length_scale(unit_energy_length_scale())
            .time_scale(1.0)
            .inclination(inclination)
            .build()
            .unwrap();
        GbAnisotropyModel::build(raw, config, &ProgressReporter::new()).unwrap()
    }

    fn two_grains() -> RawPairMatrices {
        raw(&[&[0.0, 1.0], &[0.0, 0.0]], 2.0e-13, 0.25)
    }

    fn three_grains() -> RawPairMatrices {
        raw(
            &[&[0.0, 0.9, 1.0], &[0.0, 0.0, 1.1], &[0.0, 0.0, 0.0]],
            2.0e-13,
            0.25,
        )
    }

    #[test]
    fn interface_weight_is_floored_in_bulk() {
        assert!((interface_weight(0.0, 0.0) - 1.0e-4).abs() < 1e-18);
        assert!(interface_weight(1.0, 0.0) > 999.0);
        assert!(interface_weight(0.5, 0.5) > interface_weight(1.0, 0.0));
    }

    #[test]
    fn single_pair_reproduces_calibrated_values() {
        let model = build(&two_grains(), None);
        let cal = *model.calibration().get(GrainPair::new(0, 1).unwrap()).unwrap();
        let out = model.evaluate(&PointSample::uniform(600.0, vec![1.0, 1.0])).unwrap();
        assert!(rel_approx_equal(out.kappa, cal.kappa));
        assert!(rel_approx_equal(out.gamma, cal.gamma));
    }

    #[test]
    fn mu0_is_one_for_unit_energy_and_width_six() {
        let model = build(&two_grains(), None);
        assert!((model.mu0() - 1.0).abs() < 1e-12);
        let out = model.evaluate(&PointSample::uniform(300.0, vec![0.5, 0.5])).unwrap();
        assert_eq!(out.mobility_constant, model.mu0());
        assert_eq!(out.gradient_correction_multiplier, model.mu0() * 9.0 / 8.0);
    }

    #[test]
    fn kinetic_coefficient_follows_arrhenius_law() {
        let model = build(&two_grains(), None);
        let cal = *model.calibration().get(GrainPair::new(0, 1).unwrap()).unwrap();
        let props = *model.table().get(GrainPair::new(0, 1).unwrap()).unwrap();
        let t = 750.0;
        let out = model.evaluate(&PointSample::uniform(t, vec![0.3, 0.7])).unwrap();
        let expected = props.mobility * (-0.25 / (BOLTZMANN_EV_PER_K * t)).exp() / (6.0 * cal.a);
        assert!(rel_approx_equal(out.kinetic_coefficient, expected));

        let hotter = model.evaluate(&PointSample::uniform(2.0 * t, vec![0.3, 0.7])).unwrap();
        assert!(hotter.kinetic_coefficient > out.kinetic_coefficient);
    }

    #[test]
    fn bulk_point_averages_all_pairs_equally() {
        let model = build(&three_grains(), None);
        let out = model
            .evaluate(&PointSample::uniform(500.0, vec![0.0, 0.0, 0.0]))
            .unwrap();
        let cals: Vec<_> = model.calibration().iter().map(|(_, c)| *c).collect();
        let mean_kappa = cals.iter().map(|c| c.kappa).sum::<f64>() / 3.0;
        let mean_gamma = cals.iter().map(|c| c.gamma).sum::<f64>() / 3.0;
        assert!(rel_approx_equal(out.kappa, mean_kappa));
        assert!(rel_approx_equal(out.gamma, mean_gamma));
        assert!(out.kinetic_coefficient.is_finite() && out.kinetic_coefficient > 0.0);
    }

    #[test]
    fn single_grain_point_is_weight_normalized_average() {
        let model = build(&three_grains(), None);
        let out = model
            .evaluate(&PointSample::uniform(500.0, vec![1.0, 0.0, 0.0]))
            .unwrap();

        let eta = [1.0, 0.0, 0.0];
        let (mut w_sum, mut k_sum, mut g_sum) = (0.0, 0.0, 0.0);
        for (pair, cal) in model.calibration().iter() {
            let w = interface_weight(eta[pair.low()], eta[pair.high()]);
            w_sum += w;
            k_sum += w * cal.kappa;
            g_sum += w * cal.gamma;
        }
        assert!(rel_approx_equal(out.kappa, k_sum / w_sum));
        assert!(rel_approx_equal(out.gamma, g_sum / w_sum));
        assert!(out.kappa.is_finite() && out.gamma.is_finite());
    }

    #[test]
    fn inclination_with_zero_deltas_matches_isotropic_path() {
        let isotropic = build(&three_grains(), None);
        let inclined = build(
            &three_grains(),
            Some(InclinationConfig {
                delta_sigma: 0.0,
                delta_mob: 0.0,
            }),
        );
        let sample = PointSample::new(
            650.0,
            vec![0.2, 0.7, 0.1],
            vec![
                Vector3::new(0.3, -1.0, 0.0),
                Vector3::new(-0.4, 0.2, 0.0),
                Vector3::new(1.5, 0.5, 0.0),
            ],
        );
        let a = isotropic.evaluate(&sample).unwrap();
        let b = inclined.evaluate(&sample).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn inclination_scales_kappa_by_energy_factor() {
        let inclined = build(
            &two_grains(),
            Some(InclinationConfig {
                delta_sigma: 0.1,
                delta_mob: 0.05,
            }),
        );
        let isotropic = build(&two_grains(), None);
        let cal = *isotropic
            .calibration()
            .get(GrainPair::new(0, 1).unwrap())
            .unwrap();

        // Normal along (1, 1) matches φ = π/4 for the (0, 1) boundary: cos 4θ ≈ 1.
        let sample = PointSample::new(
            500.0,
            vec![0.5, 0.5],
            vec![Vector3::new(0.5, 0.5, 0.0), Vector3::new(-0.5, -0.5, 0.0)],
        );
        let plain = isotropic.evaluate(&sample).unwrap();
        let out = inclined.evaluate(&sample).unwrap();

        assert!((out.kappa / plain.kappa - 1.1).abs() < 1e-6);
        assert!((out.kinetic_coefficient / plain.kinetic_coefficient - 1.05).abs() < 1e-6);
        let expected_gamma = correlation::gamma(cal.g2 * 1.1);
        assert!((out.gamma - expected_gamma).abs() < 1e-5);
    }

    #[test]
    fn non_positive_or_nan_temperature_is_rejected() {
        // Q = 0 would otherwise turn T = 0 into exp(-0/0) = NaN.
        let model = build(&raw(&[&[0.0, 1.0], &[0.0, 0.0]], 2.0e-13, 0.0), None);
        for t in [0.0, -300.0, f64::NAN, f64::INFINITY] {
            let result = model.evaluate(&PointSample::uniform(t, vec![0.5, 0.5]));
            match result {
                Err(EngineError::InvalidTemperature { temperature }) => {
                    assert!(temperature.to_bits() == t.to_bits());
                }
                other => panic!("unexpected result for T = {t}: {other:?}"),
            }
        }
        assert!(model
            .evaluate(&PointSample::uniform(1.0e-3, vec![0.5, 0.5]))
            .unwrap()
            .kinetic_coefficient
            .is_finite());
    }

    #[test]
    fn mismatched_sample_is_rejected() {
        let model = build(&three_grains(), None);
        let result = model.evaluate(&PointSample::uniform(500.0, vec![1.0, 0.0]));
        assert!(matches!(
            result,
            Err(EngineError::SampleShape {
                expected: 3,
                values: 2,
                gradients: 2
            })
        ));
    }
}

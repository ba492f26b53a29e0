use super::calibration::calibrate;
use super::config::EngineConfig;
use super::error::EngineError;
use super::evaluator;
use super::inclination::InclinationModel;
use super::progress::{Progress, ProgressReporter};
use crate::core::models::calibration::CalibratedPairParams;
use crate::core::models::point::{PointSample, ScalarFieldOutputs};
use crate::core::models::table::{GrainPairTable, RawPairMatrices};
use crate::core::units::{ACTIVATION_WIDTH_M, GB_ENTROPY_DIFFERENCE};
use tracing::{info, instrument};

/// Outputs that depend only on the configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ConstantOutputs {
    pub mobility_constant: f64,
    pub molar_volume: f64,
    pub entropy_difference: f64,
    pub activation_width: f64,
    pub gradient_correction_multiplier: f64,
}

impl ConstantOutputs {
    fn new(config: &EngineConfig, mu0: f64) -> Self {
        let units = &config.units;
        Self {
            mobility_constant: mu0,
            molar_volume: units.molar_volume(config.molar_volume),
            entropy_difference: units.entropy(GB_ENTROPY_DIFFERENCE),
            activation_width: units.length(ACTIVATION_WIDTH_M),
            gradient_correction_multiplier: mu0 * 9.0 / 8.0,
        }
    }
}

/// A calibrated grain-boundary property model.
///
/// Construction converts the raw data and calibrates every pair; afterwards the
/// model is immutable. It is `Send + Sync`, so a single instance wrapped in an
/// `Arc` can serve any number of concurrent evaluators.
#[derive(Debug, Clone)]
pub struct GbAnisotropyModel {
    config: EngineConfig,
    table: GrainPairTable,
    calibration: CalibratedPairParams,
    inclination: Option<InclinationModel>,
    constants: ConstantOutputs,
}

impl GbAnisotropyModel {
    #[instrument(skip_all, name = "model_build")]
    pub fn build(
        raw: &RawPairMatrices,
        config: EngineConfig,
        reporter: &ProgressReporter,
    ) -> Result<Self, EngineError> {
        config.validate()?;
        if raw.num_grains() != config.num_grains || !raw.is_consistent() {
            return Err(EngineError::TableShape {
                expected: config.num_grains,
            });
        }

        reporter.report(Progress::PhaseStart {
            name: "Calibration",
        });
        let table = GrainPairTable::from_raw(raw, &config.units);
        let calibration = calibrate(&table, &config, reporter)?;
        reporter.report(Progress::PhaseFinish);

        let inclination = config
            .inclination
            .as_ref()
            .map(|c| InclinationModel::new(c, config.num_grains));
        let constants = ConstantOutputs::new(&config, calibration.mu0());

        info!(
            "Calibrated {} grains (inclination anisotropy {}).",
            config.num_grains,
            if inclination.is_some() { "on" } else { "off" }
        );

        Ok(Self {
            config,
            table,
            calibration,
            inclination,
            constants,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn num_grains(&self) -> usize {
        self.config.num_grains
    }

    pub fn table(&self) -> &GrainPairTable {
        &self.table
    }

    pub fn calibration(&self) -> &CalibratedPairParams {
        &self.calibration
    }

    pub fn mu0(&self) -> f64 {
        self.calibration.mu0()
    }

    pub fn inclination(&self) -> Option<&InclinationModel> {
        self.inclination.as_ref()
    }

    pub(crate) fn constants(&self) -> &ConstantOutputs {
        &self.constants
    }

    /// Evaluates the effective properties at one sample point.
    #[inline]
    pub fn evaluate(&self, sample: &PointSample) -> Result<ScalarFieldOutputs, EngineError> {
        evaluator::evaluate_point(self, sample)
    }
}

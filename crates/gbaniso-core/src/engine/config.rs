use crate::core::units::UnitSystem;
use thiserror::Error;

pub const DEFAULT_LENGTH_SCALE: f64 = 1.0e-9;
pub const DEFAULT_TIME_SCALE: f64 = 1.0e-9;
/// Molar volume of copper in m³/mol.
pub const DEFAULT_MOLAR_VOLUME: f64 = 7.11e-6;
pub const DEFAULT_DIMENSION: usize = 2;
/// Temperature in K used for sample points that do not carry their own.
pub const DEFAULT_TEMPERATURE: f64 = 300.0;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("Parameter '{name}' must be positive, got {value}")]
    NonPositive { name: &'static str, value: f64 },

    #[error("At least two grains are required, got {0}")]
    TooFewGrains(usize),

    #[error("Problem dimension must be 1, 2 or 3, got {0}")]
    InvalidDimension(usize),

    #[error("Inclination anisotropy is only supported in 2-D, the problem is {0}-D")]
    InclinationRequires2D(usize),
}

/// Strength of the inclination dependence of GB energy and mobility.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InclinationConfig {
    pub delta_sigma: f64,
    pub delta_mob: f64,
}

impl Default for InclinationConfig {
    fn default() -> Self {
        Self {
            delta_sigma: 0.1,
            delta_mob: 0.1,
        }
    }
}

/// Controls for the per-pair fixed-point solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalibrationConfig {
    pub initial_guess: f64,
    pub tolerance: f64,
    pub max_iterations: usize,
}

impl Default for CalibrationConfig {
    fn default() -> Self {
        Self {
            initial_guess: 0.75,
            tolerance: 1.0e-9,
            max_iterations: 1000,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub num_grains: usize,
    pub dimension: usize,
    pub units: UnitSystem,
    /// Diffuse GB width in units of `length_scale`.
    pub interface_width: f64,
    /// Molar volume in m³/mol.
    pub molar_volume: f64,
    /// Temperature in K for points read without a temperature column.
    pub temperature: f64,
    /// `None` disables the inclination correction.
    pub inclination: Option<InclinationConfig>,
    pub calibration: CalibrationConfig,
}

#[derive(Default)]
pub struct EngineConfigBuilder {
    num_grains: Option<usize>,
    dimension: Option<usize>,
    length_scale: Option<f64>,
    time_scale: Option<f64>,
    interface_width: Option<f64>,
    molar_volume: Option<f64>,
    temperature: Option<f64>,
    inclination: Option<InclinationConfig>,
    calibration: Option<CalibrationConfig>,
}

impl EngineConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn num_grains(mut self, n: usize) -> Self {
        self.num_grains = Some(n);
        self
    }
    pub fn dimension(mut self, dim: usize) -> Self {
        self.dimension = Some(dim);
        self
    }
    pub fn length_scale(mut self, meters: f64) -> Self {
        self.length_scale = Some(meters);
        self
    }
    pub fn time_scale(mut self, seconds: f64) -> Self {
        self.time_scale = Some(seconds);
        self
    }
    pub fn interface_width(mut self, width: f64) -> Self {
        self.interface_width = Some(width);
        self
    }
    pub fn molar_volume(mut self, m3_per_mol: f64) -> Self {
        self.molar_volume = Some(m3_per_mol);
        self
    }
    pub fn temperature(mut self, kelvin: f64) -> Self {
        self.temperature = Some(kelvin);
        self
    }
    pub fn inclination(mut self, inclination: Option<InclinationConfig>) -> Self {
        self.inclination = inclination;
        self
    }
    pub fn calibration(mut self, calibration: CalibrationConfig) -> Self {
        self.calibration = Some(calibration);
        self
    }

    pub fn build(self) -> Result<EngineConfig, ConfigError> {
        let config = EngineConfig {
            num_grains: self
                .num_grains
                .ok_or(ConfigError::MissingParameter("num_grains"))?,
            dimension: self.dimension.unwrap_or(DEFAULT_DIMENSION),
            units: UnitSystem::new(
                self.length_scale.unwrap_or(DEFAULT_LENGTH_SCALE),
                self.time_scale.unwrap_or(DEFAULT_TIME_SCALE),
            ),
            interface_width: self
                .interface_width
                .ok_or(ConfigError::MissingParameter("interface_width"))?,
            molar_volume: self.molar_volume.unwrap_or(DEFAULT_MOLAR_VOLUME),
            temperature: self.temperature.unwrap_or(DEFAULT_TEMPERATURE),
            inclination: self.inclination,
            calibration: self.calibration.unwrap_or_default(),
        };
        config.validate()?;
        Ok(config)
    }
}

impl EngineConfig {
    /// Checks the combination of settings, independent of how the value was built.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_grains < 2 {
            return Err(ConfigError::TooFewGrains(self.num_grains));
        }
        if !(1..=3).contains(&self.dimension) {
            return Err(ConfigError::InvalidDimension(self.dimension));
        }
        if self.inclination.is_some() && self.dimension != 2 {
            return Err(ConfigError::InclinationRequires2D(self.dimension));
        }

        positive("interface_width", self.interface_width)?;
        positive("length_scale", self.units.length_scale)?;
        positive("time_scale", self.units.time_scale)?;
        positive("molar_volume", self.molar_volume)?;
        positive("temperature", self.temperature)?;
        positive("calibration.initial_guess", self.calibration.initial_guess)?;
        positive("calibration.tolerance", self.calibration.tolerance)?;
        if self.calibration.max_iterations == 0 {
            return Err(ConfigError::NonPositive {
                name: "calibration.max_iterations",
                value: 0.0,
            });
        }
        Ok(())
    }
}

fn positive(name: &'static str, value: f64) -> Result<f64, ConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(value)
    } else {
        Err(ConfigError::NonPositive { name, value })
    }
}

use thiserror::Error;

use super::calibration::CalibrationError;
use super::config::ConfigError;
use crate::core::io::gb_data::GbDataError;
use crate::core::io::points::PointsFileError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to load GB data: {0}")]
    Data(#[from] GbDataError),

    #[error("Calibration failed: {0}")]
    Calibration(#[from] CalibrationError),

    #[error("Sample point file error: {0}")]
    Points(#[from] PointsFileError),

    #[error("GB data must hold three {expected}x{expected} matrices")]
    TableShape { expected: usize },

    #[error(
        "Sample point describes {values} order parameter(s) and {gradients} gradient(s), expected {expected} of each"
    )]
    SampleShape {
        expected: usize,
        values: usize,
        gradients: usize,
    },

    #[error("Sample point temperature must be a positive number of kelvin, got {temperature}")]
    InvalidTemperature { temperature: f64 },

    #[error("Sample point {index} failed: {source}")]
    Point {
        index: usize,
        #[source]
        source: Box<EngineError>,
    },
}

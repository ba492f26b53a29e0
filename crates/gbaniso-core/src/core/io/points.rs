use crate::core::models::calibration::CalibratedPairParams;
use crate::core::models::point::{PointSample, ScalarFieldOutputs};
use crate::core::models::table::GrainPairTable;
use nalgebra::Vector3;
use serde::Serialize;
use std::io::{Read, Write};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PointsFileError {
    #[error("CSV error for '{path}': {source}")]
    Csv { path: String, source: csv::Error },
    #[error("CSV error: {0}")]
    Stream(#[from] csv::Error),
    #[error(
        "Record {record}: expected {expected} columns (or {} without temperature) for {num_grains} grains, found {found}",
        .expected - 1
    )]
    ColumnCount {
        record: usize,
        num_grains: usize,
        expected: usize,
        found: usize,
    },
    #[error("Record {record}, column {column}: invalid float '{value}'")]
    InvalidFloat {
        record: usize,
        column: usize,
        value: String,
    },
}

/// Number of CSV columns describing one point for `num_grains` grains.
///
/// Layout: `temperature, eta_0 … eta_{N-1}, gx_0, gy_0, gz_0, …`. The leading
/// temperature column may be omitted, see [`read_points`].
#[inline]
pub fn point_columns(num_grains: usize) -> usize {
    1 + 4 * num_grains
}

/// Header row matching [`point_columns`].
pub fn point_header(num_grains: usize) -> Vec<String> {
    let mut header = Vec::with_capacity(point_columns(num_grains));
    header.push("temperature".to_string());
    header.extend((0..num_grains).map(|i| format!("eta_{i}")));
    for i in 0..num_grains {
        for axis in ["x", "y", "z"] {
            header.push(format!("g{axis}_{i}"));
        }
    }
    header
}

/// Reads sample points, one per CSV record after the header.
///
/// A record with [`point_columns`] fields carries its own temperature. A
/// record one field shorter starts at `eta_0` and is assigned
/// `constant_temperature`. Both layouts may be mixed within one file.
pub fn read_points<R: Read>(
    reader: R,
    num_grains: usize,
    constant_temperature: f64,
) -> Result<Vec<PointSample>, PointsFileError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let expected = point_columns(num_grains);
    let mut points = Vec::new();

    for (idx, result) in reader.records().enumerate() {
        let record = result?;
        let record_num = idx + 1;
        let has_temperature = match record.len() {
            len if len == expected => true,
            len if len == expected - 1 => false,
            _ => {
                return Err(PointsFileError::ColumnCount {
                    record: record_num,
                    num_grains,
                    expected,
                    found: record.len(),
                });
            }
        };

        let values = record
            .iter()
            .enumerate()
            .map(|(col, field)| {
                field.parse::<f64>().map_err(|_| PointsFileError::InvalidFloat {
                    record: record_num,
                    column: col + 1,
                    value: field.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let (temperature, fields) = if has_temperature {
            (values[0], &values[1..])
        } else {
            (constant_temperature, &values[..])
        };
        let order_parameters = fields[..num_grains].to_vec();
        let gradients = fields[num_grains..]
            .chunks_exact(3)
            .map(|c| Vector3::new(c[0], c[1], c[2]))
            .collect();
        points.push(PointSample::new(temperature, order_parameters, gradients));
    }

    Ok(points)
}

pub fn read_points_from_path(
    path: &Path,
    num_grains: usize,
    constant_temperature: f64,
) -> Result<Vec<PointSample>, PointsFileError> {
    let file = std::fs::File::open(path).map_err(|e| PointsFileError::Csv {
        path: path.to_string_lossy().to_string(),
        source: e.into(),
    })?;
    read_points(file, num_grains, constant_temperature)
}

pub fn write_outputs<W: Write>(
    writer: W,
    outputs: &[ScalarFieldOutputs],
) -> Result<(), PointsFileError> {
    let mut writer = csv::Writer::from_writer(writer);
    if outputs.is_empty() {
        writer.write_record(ScalarFieldOutputs::PROPERTY_NAMES)?;
    }
    for out in outputs {
        writer.serialize(out)?;
    }
    writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

#[derive(Debug, Serialize)]
struct CalibrationRow {
    m: usize,
    n: usize,
    sigma: f64,
    mobility: f64,
    activation_energy: f64,
    kappa: f64,
    gamma: f64,
    a: f64,
    g2: f64,
}

/// Writes one row per grain pair with its model-unit properties and calibration.
pub fn write_calibration<W: Write>(
    writer: W,
    table: &GrainPairTable,
    calibration: &CalibratedPairParams,
) -> Result<(), PointsFileError> {
    let mut writer = csv::Writer::from_writer(writer);
    for ((pair, props), (_, cal)) in table.iter().zip(calibration.iter()) {
        writer.serialize(CalibrationRow {
            m: pair.low(),
            n: pair.high(),
            sigma: props.sigma,
            mobility: props.mobility,
            activation_energy: props.activation_energy,
            kappa: cal.kappa,
            gamma: cal.gamma,
            a: cal.a,
            g2: cal.g2,
        })?;
    }
    writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

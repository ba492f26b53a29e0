use crate::core::io::traits::PairDataFile;
use crate::core::models::table::RawPairMatrices;
use std::io::{self, BufRead, Write};
use thiserror::Error;

const HEADER_LINES: usize = 2;

#[derive(Debug, Error)]
pub enum GbDataError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse { line: usize, kind: GbParseErrorKind },
    #[error("Expected {expected} data rows for {num_grains} grains, found {found}")]
    RowCount {
        num_grains: usize,
        expected: usize,
        found: usize,
    },
    #[error("File ended before the two-line header was complete")]
    MissingHeader,
}

#[derive(Debug, Error, PartialEq)]
pub enum GbParseErrorKind {
    #[error("Invalid float in column {column} (value: '{value}')")]
    InvalidFloat { column: usize, value: String },
    #[error("Expected {expected} values, found {found}")]
    ColumnCount { expected: usize, found: usize },
}

/// Whitespace-separated GB anisotropy table.
///
/// Two free-form header lines are followed by `N` rows of GB energies (J/m²),
/// `N` rows of mobility prefactors (m⁴/(J·s)) and `N` rows of activation energies
/// (eV), each row holding `N` values.
pub struct GbDataFile;

fn parse_row(line: &str, line_num: usize, num_grains: usize) -> Result<Vec<f64>, GbDataError> {
    let row = line
        .split_whitespace()
        .enumerate()
        .map(|(col, token)| {
            token.parse::<f64>().map_err(|_| GbDataError::Parse {
                line: line_num,
                kind: GbParseErrorKind::InvalidFloat {
                    column: col + 1,
                    value: token.to_string(),
                },
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    if row.len() != num_grains {
        return Err(GbDataError::Parse {
            line: line_num,
            kind: GbParseErrorKind::ColumnCount {
                expected: num_grains,
                found: row.len(),
            },
        });
    }
    Ok(row)
}

impl PairDataFile for GbDataFile {
    type Error = GbDataError;

    fn read_from(
        reader: &mut impl BufRead,
        num_grains: usize,
    ) -> Result<RawPairMatrices, Self::Error> {
        let expected = 3 * num_grains;
        let mut rows: Vec<Vec<f64>> = Vec::with_capacity(expected);
        let mut header_seen = 0;

        for (line_num, line_res) in reader.lines().enumerate() {
            let line = line_res?;
            let line_num = line_num + 1;

            if header_seen < HEADER_LINES {
                header_seen += 1;
                continue;
            }
            if line.trim().is_empty() {
                continue;
            }
            if rows.len() == expected {
                return Err(GbDataError::RowCount {
                    num_grains,
                    expected,
                    found: rows.len() + 1,
                });
            }
            rows.push(parse_row(&line, line_num, num_grains)?);
        }

        if header_seen < HEADER_LINES {
            return Err(GbDataError::MissingHeader);
        }
        if rows.len() != expected {
            return Err(GbDataError::RowCount {
                num_grains,
                expected,
                found: rows.len(),
            });
        }

        let activation_energy = rows.split_off(2 * num_grains);
        let mobility = rows.split_off(num_grains);
        Ok(RawPairMatrices {
            sigma: rows,
            mobility,
            activation_energy,
        })
    }

    fn write_to(matrices: &RawPairMatrices, writer: &mut impl Write) -> Result<(), Self::Error> {
        writeln!(writer, "# GB anisotropy data: {} grains", matrices.num_grains())?;
        writeln!(
            writer,
            "# sigma [J/m^2], mobility [m^4/(J s)], activation energy [eV]"
        )?;
        for block in [
            &matrices.sigma,
            &matrices.mobility,
            &matrices.activation_energy,
        ] {
            for row in block {
                let line: Vec<String> = row.iter().map(|v| format!("{v:e}")).collect();
                writeln!(writer, "{}", line.join(" "))?;
            }
        }
        Ok(())
    }
}

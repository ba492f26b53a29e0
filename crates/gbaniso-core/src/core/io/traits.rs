use crate::core::models::table::RawPairMatrices;
use std::error::Error;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Defines the interface for reading and writing tabulated grain-pair data.
///
/// Implementors handle one concrete text layout. The number of grains is not
/// stored in the files themselves and has to be supplied by the caller.
pub trait PairDataFile {
    /// The error type for I/O and parse failures.
    type Error: Error + From<io::Error>;

    /// Reads the three pair matrices for `num_grains` grains from a buffered reader.
    ///
    /// # Errors
    ///
    /// Returns an error if the data do not describe exactly `num_grains` grains
    /// or a value cannot be parsed.
    fn read_from(
        reader: &mut impl BufRead,
        num_grains: usize,
    ) -> Result<RawPairMatrices, Self::Error>;

    /// Writes the three pair matrices to a writer.
    fn write_to(matrices: &RawPairMatrices, writer: &mut impl Write) -> Result<(), Self::Error>;

    /// Reads the pair matrices from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or parsing fails.
    fn read_from_path<P: AsRef<Path>>(
        path: P,
        num_grains: usize,
    ) -> Result<RawPairMatrices, Self::Error> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_from(&mut reader, num_grains)
    }

    fn write_to_path<P: AsRef<Path>>(
        matrices: &RawPairMatrices,
        path: P,
    ) -> Result<(), Self::Error> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        Self::write_to(matrices, &mut writer)?;
        writer.flush()?;
        Ok(())
    }
}

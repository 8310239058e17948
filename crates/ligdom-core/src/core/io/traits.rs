use crate::core::models::structure::Structure;
use std::error::Error;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Defines the interface for reading a structure from a coordinate file format.
pub trait StructureFile {
    /// Format-specific options that steer parsing.
    type Options;

    /// The error type for read operations.
    type Error: Error + From<io::Error>;

    /// Reads a structure from a buffered reader.
    ///
    /// # Arguments
    ///
    /// * `id` - The identifier to give the structure.
    /// * `reader` - The buffered reader to read from.
    /// * `options` - Format-specific parsing options.
    ///
    /// # Errors
    ///
    /// Returns an error if a record cannot be parsed or reading fails.
    fn read_from(
        id: &str,
        reader: &mut impl BufRead,
        options: &Self::Options,
    ) -> Result<Structure, Self::Error>;

    /// Reads a structure from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or parsing fails.
    fn read_from_path<P: AsRef<Path>>(
        id: &str,
        path: P,
        options: &Self::Options,
    ) -> Result<Structure, Self::Error> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_from(id, &mut reader, options)
    }
}

use crate::data::DoseEntry;
use std::io;
use std::path::Path;
use thiserror::Error;

/// Errors raised while reading a dose file
#[derive(Error, Debug, Clone)]
pub enum ParseError {
    /// Error encountered when reading CSV data
    #[error("CSV error: {0}")]
    CSVError(String),
    /// A required column is absent from the header
    #[error("Missing required column '{0}'")]
    MissingColumn(String),
}

const REQUIRED_COLUMNS: [&str; 2] = ["dosage", "time"];

/// Read a CSV file of dose entries
///
/// The file must have a header with (at least) `dosage` and `time` columns.
/// Headers are matched case-insensitively, cells are trimmed and lines starting
/// with `#` are ignored.
///
/// Rows are returned as raw [`DoseEntry`] values; unusable dosages or times are
/// not an error here and are dropped later by [`normalize`](crate::data::normalize).
///
/// # Example
///
/// ```rust,no_run
/// use halflife::data::parser::read_doses;
///
/// let entries = read_doses("path/to/doses.csv").unwrap();
/// println!("Number of entries: {}", entries.len());
/// ```
pub fn read_doses(path: impl AsRef<Path>) -> Result<Vec<DoseEntry>, ParseError> {
    let reader = builder()
        .from_path(path.as_ref())
        .map_err(|e| ParseError::CSVError(e.to_string()))?;
    read_entries(reader)
}

/// Read dose entries from any reader, see [`read_doses`] for the format
pub fn from_reader<R: io::Read>(reader: R) -> Result<Vec<DoseEntry>, ParseError> {
    read_entries(builder().from_reader(reader))
}

fn builder() -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    builder
        .comment(Some(b'#'))
        .has_headers(true)
        .trim(csv::Trim::All);
    builder
}

fn read_entries<R: io::Read>(mut reader: csv::Reader<R>) -> Result<Vec<DoseEntry>, ParseError> {
    // Convert headers to lowercase
    let headers = reader
        .headers()
        .map_err(|e| ParseError::CSVError(e.to_string()))?
        .iter()
        .map(|h| h.to_lowercase())
        .collect::<Vec<_>>();

    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(ParseError::MissingColumn(column.to_string()));
        }
    }
    reader.set_headers(csv::StringRecord::from(headers));

    reader
        .deserialize::<DoseEntry>()
        .map(|row| row.map_err(|e| ParseError::CSVError(e.to_string())))
        .collect()
}

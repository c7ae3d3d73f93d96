//! CSV reading and writing for point-of-sale exports
//!
//! Exports carry a title line above the real header, so reading takes a
//! header row offset. Short rows are padded with empty fields; rows with more
//! fields than the header are skipped with a warning. Output is written as
//! UTF-8 with a byte-order mark so that spreadsheet software picks the right
//! encoding.

use crate::adapters::encoding;
use crate::domain::{Dataset, PosanonError, Result};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// How to parse an input file
#[derive(Debug, Clone)]
pub struct ReadOptions {
    /// Field delimiter
    pub delimiter: u8,
    /// Zero-based index of the header among non-blank lines
    pub header_row: usize,
    /// Encoding label or `"auto"`
    pub encoding: String,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            delimiter: b';',
            header_row: 1,
            encoding: encoding::AUTO.to_string(),
        }
    }
}

/// How to write an output file
#[derive(Debug, Clone)]
pub struct WriteOptions {
    /// Field delimiter
    pub delimiter: u8,
    /// Prefix the file with a UTF-8 byte-order mark
    pub bom: bool,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            delimiter: b';',
            bom: true,
        }
    }
}

/// A parsed input file
#[derive(Debug, Clone)]
pub struct LoadedDataset {
    /// Parsed rows
    pub dataset: Dataset,
    /// Name of the encoding the file was decoded with
    pub encoding: &'static str,
    /// Rows skipped for having more fields than the header
    pub skipped_rows: usize,
}

/// Convert a configured delimiter to a single byte
///
/// # Errors
///
/// Returns [`PosanonError::Validation`] unless the delimiter is exactly one ASCII character.
pub fn delimiter_byte(delimiter: &str) -> Result<u8> {
    match delimiter.as_bytes() {
        [byte] if byte.is_ascii() => Ok(*byte),
        _ => Err(PosanonError::Validation(format!(
            "delimiter must be a single ASCII character, got '{delimiter}'"
        ))),
    }
}

/// Parse decoded CSV text into a dataset
///
/// Returns the dataset and the number of skipped rows. Short rows are padded
/// with empty fields.
///
/// # Errors
///
/// Returns [`PosanonError::Csv`] if the text is not valid CSV or has no line at
/// the header offset.
pub fn parse_dataset(text: &str, options: &ReadOptions) -> Result<(Dataset, usize)> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(options.delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut dataset: Option<Dataset> = None;
    let mut skipped = 0;

    for (index, result) in reader.records().enumerate() {
        let record = result?;

        if index < options.header_row {
            continue;
        }

        let current = match dataset.as_mut() {
            Some(current) => current,
            None => {
                let headers = record.iter().map(str::to_string).collect();
                dataset = Some(Dataset::new(headers));
                continue;
            }
        };

        let width = current.headers().len();
        if record.len() > width {
            skipped += 1;
            tracing::warn!(
                line = ?record.position().map(|p| p.line()),
                expected = width,
                found = record.len(),
                "Skipping row with too many fields"
            );
            continue;
        }

        // Trailing empty fields are often omitted by the export
        let mut fields: Vec<String> = record.iter().map(str::to_string).collect();
        fields.resize(width, String::new());
        current.push(fields)?;
    }

    let dataset = dataset.ok_or_else(|| {
        PosanonError::Csv(format!(
            "no header row found at offset {}",
            options.header_row
        ))
    })?;

    Ok((dataset, skipped))
}

/// Read, decode and parse an input file
///
/// # Errors
///
/// Returns [`PosanonError::Io`] when the file cannot be read, otherwise the
/// errors of [`encoding::resolve_encoding`] and [`parse_dataset`].
pub fn read_dataset(path: impl AsRef<Path>, options: &ReadOptions) -> Result<LoadedDataset> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|e| {
        PosanonError::Io(format!("Failed to read input file {}: {}", path.display(), e))
    })?;

    let encoding = encoding::resolve_encoding(&options.encoding, &bytes)?;
    tracing::info!(
        path = %path.display(),
        encoding = encoding.name(),
        bytes = bytes.len(),
        "Input encoding resolved"
    );

    let text = encoding::decode(&bytes, encoding);
    let (dataset, skipped_rows) = parse_dataset(&text, options)?;

    tracing::info!(
        rows = dataset.len(),
        columns = ?dataset.headers(),
        skipped_rows,
        "Input parsed"
    );

    Ok(LoadedDataset {
        dataset,
        encoding: encoding.name(),
        skipped_rows,
    })
}

/// Write a dataset as CSV to any writer
///
/// # Errors
///
/// Returns [`PosanonError::Csv`] or [`PosanonError::Io`] when writing fails.
pub fn write_to<W: Write>(mut writer: W, dataset: &Dataset, options: &WriteOptions) -> Result<()> {
    if options.bom {
        writer.write_all(UTF8_BOM)?;
    }

    let mut csv_writer = csv::WriterBuilder::new()
        .delimiter(options.delimiter)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);

    csv_writer.write_record(dataset.headers())?;
    for record in dataset.records() {
        csv_writer.write_record(record.fields())?;
    }
    csv_writer.flush()?;

    Ok(())
}

/// Write a dataset to a file
///
/// # Errors
///
/// Returns [`PosanonError::Io`] when the file cannot be created, otherwise the
/// errors of [`write_to`].
pub fn write_dataset(
    path: impl AsRef<Path>,
    dataset: &Dataset,
    options: &WriteOptions,
) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| {
        PosanonError::Io(format!(
            "Failed to create output file {}: {}",
            path.display(),
            e
        ))
    })?;

    write_to(BufWriter::new(file), dataset, options)?;

    tracing::info!(path = %path.display(), rows = dataset.len(), "Output written");
    Ok(())
}

/// `Filtered_<file name>` next to the input file
pub fn default_output_path(input: &Path) -> PathBuf {
    let file_name = input
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output.csv".to_string());
    input.with_file_name(format!("Filtered_{file_name}"))
}

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CSV ingestion of the historical accident dataset.
//!
//! The dataset has one header row followed by rows of at least
//! [`FIELD_COUNT`] positional columns, one row per line. Quoted fields may
//! contain commas but not line breaks. Malformed rows are skipped and
//! counted; ingestion only fails when the input itself cannot be read.

use std::io::{BufRead as _, BufReader, Read};
use std::path::Path;

use saferoute_accident_models::{AccidentRecord, AccidentSeverity};

/// Minimum number of columns in a well-formed row.
pub const FIELD_COUNT: usize = 22;

/// Errors that abort ingestion.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    /// The input could not be read.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Why a single row was skipped.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RowError {
    #[error("unreadable row: {0}")]
    Unreadable(String),
    #[error("expected at least 22 fields, found {0}")]
    TooFewFields(usize),
    #[error("unrecognized severity '{0}'")]
    Severity(String),
}

/// Parses accident records from CSV text.
///
/// Each line is split on its own, so a malformed line (for example one
/// with an unterminated quote) only costs that row.
///
/// # Errors
///
/// * If reading from `reader` fails
pub fn parse_csv(reader: impl Read) -> Result<Vec<AccidentRecord>, IngestError> {
    let mut lines = BufReader::new(reader).lines();

    if lines.next().transpose()?.is_none() {
        log::info!("Accident data is empty");
        return Ok(Vec::new());
    }

    let mut records = Vec::new();
    let mut skipped = 0usize;

    for (index, line) in lines.enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        match split_line(&line).and_then(|row| parse_row(&row)) {
            Ok(record) => records.push(record),
            Err(e) => {
                // Header is line 1.
                log::debug!("Skipping row at line {}: {e}", index + 2);
                skipped += 1;
            }
        }
    }

    log::info!(
        "Parsed {} accident records ({skipped} malformed rows skipped)",
        records.len()
    );

    Ok(records)
}

/// Splits one line into trimmed fields.
///
/// # Errors
///
/// * [`RowError::Unreadable`] if the CSV reader rejects the line
pub fn split_line(line: &str) -> Result<csv::StringRecord, RowError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(line.as_bytes());

    reader
        .records()
        .next()
        .unwrap_or_else(|| Ok(csv::StringRecord::new()))
        .map_err(|e| RowError::Unreadable(e.to_string()))
}

/// Loads accident records from a CSV file.
///
/// # Errors
///
/// * If the file cannot be opened or read
pub fn load_csv(path: &Path) -> Result<Vec<AccidentRecord>, IngestError> {
    log::info!("Loading accident data from {}", path.display());
    let file = std::fs::File::open(path)?;
    parse_csv(std::io::BufReader::new(file))
}

/// Converts one CSV row into a record.
///
/// Extra trailing columns are ignored. Numeric columns that fail to parse
/// read as `0`.
///
/// # Errors
///
/// * [`RowError::TooFewFields`] if the row is short
/// * [`RowError::Severity`] if the severity column is not a known severity
pub fn parse_row(row: &csv::StringRecord) -> Result<AccidentRecord, RowError> {
    if row.len() < FIELD_COUNT {
        return Err(RowError::TooFewFields(row.len()));
    }

    let field = |index: usize| row.get(index).unwrap_or_default();
    let text = |index: usize| field(index).to_owned();
    let number = |index: usize| field(index).parse::<u32>().unwrap_or(0);

    let severity = field(6)
        .parse::<AccidentSeverity>()
        .map_err(|_| RowError::Severity(text(6)))?;

    Ok(AccidentRecord {
        state: text(0),
        city: text(1),
        year: number(2),
        month: text(3),
        day_of_week: text(4),
        time_of_day: text(5),
        severity,
        vehicles_involved: number(7),
        vehicle_type: text(8),
        casualties: number(9),
        fatalities: number(10),
        weather: text(11),
        road_type: text(12),
        road_condition: text(13),
        lighting: text(14),
        traffic_control: text(15),
        speed_limit: number(16),
        driver_age: number(17),
        driver_gender: text(18),
        license_status: text(19),
        alcohol_involved: field(20).eq_ignore_ascii_case("yes"),
        location_detail: text(21),
    })
}

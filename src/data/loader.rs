use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use csv::{ReaderBuilder, StringRecord, Trim};

use super::error::DataError;
use super::model::{Marker, Record, SunspotTable};

/// Column names in file order. The files carry no header row.
pub const COLUMNS: [&str; 7] = [
    "Year",
    "Month",
    "Date",
    "Mean_Number",
    "S.D.",
    "Observations",
    "Marker",
];

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load a monthly sunspot file (`Year;Month;Date;Mean_Number;S.D.;Observations;Marker`).
pub fn load_file(path: &Path) -> Result<SunspotTable, DataError> {
    let file = File::open(path).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let table = load_reader(file)?;

    match table.year_bounds() {
        Some((first, last)) => log::info!(
            "Loaded {} monthly records ({first}–{last}) from {}",
            table.len(),
            path.display()
        ),
        None => log::warn!("{} contains no records", path.display()),
    }
    Ok(table)
}

/// Parse semicolon-delimited rows from any reader. Row order is preserved.
pub fn load_reader<R: Read>(source: R) -> Result<SunspotTable, DataError> {
    let mut reader = ReaderBuilder::new()
        .delimiter(b';')
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(source);

    let mut records = Vec::new();
    for result in reader.records() {
        let row = result?;
        let line = row.position().map(|p| p.line()).unwrap_or(0);
        if row.iter().all(str::is_empty) {
            continue;
        }
        records.push(parse_row(&row, line)?);
    }

    SunspotTable::from_records(records)
}

// ---------------------------------------------------------------------------
// Row parsing
// ---------------------------------------------------------------------------

fn parse_row(row: &StringRecord, line: u64) -> Result<Record, DataError> {
    if row.len() != COLUMNS.len() {
        return Err(DataError::MalformedRow {
            line,
            reason: format!("expected {} fields, found {}", COLUMNS.len(), row.len()),
        });
    }

    let month: u8 = parse_field(row, 1, line)?;
    if !(1..=12).contains(&month) {
        return Err(DataError::MalformedRow {
            line,
            reason: format!("month {month} is outside 1–12"),
        });
    }

    let marker = Marker::parse(&row[6]).ok_or_else(|| DataError::MalformedRow {
        line,
        reason: format!("unknown marker '{}'", &row[6]),
    })?;

    Ok(Record {
        year: parse_field(row, 0, line)?,
        month,
        date: parse_finite(row, 2, line)?,
        mean_number: parse_finite(row, 3, line)?,
        std_dev: parse_finite(row, 4, line)?,
        observation_count: parse_field(row, 5, line)?,
        marker,
    })
}

fn parse_field<T: FromStr>(row: &StringRecord, idx: usize, line: u64) -> Result<T, DataError> {
    let raw = &row[idx];
    raw.parse::<T>().map_err(|_| DataError::MalformedRow {
        line,
        reason: format!("{}: '{raw}' is not a valid number", COLUMNS[idx]),
    })
}

fn parse_finite(row: &StringRecord, idx: usize, line: u64) -> Result<f64, DataError> {
    let value: f64 = parse_field(row, idx, line)?;
    if !value.is_finite() {
        return Err(DataError::MalformedRow {
            line,
            reason: format!("{}: '{}' is not finite", COLUMNS[idx], &row[idx]),
        });
    }
    Ok(value)
}

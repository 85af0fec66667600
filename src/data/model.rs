use std::fmt;

use super::error::DataError;

/// Sentinel used by the monthly sunspot files for "no value".
pub const MISSING_SENTINEL: f64 = -1.0;

// ---------------------------------------------------------------------------
// Marker – definitive / provisional flag of a row
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Definitive,
    Provisional,
}

impl Marker {
    /// Parse the last column of a row: `1` is definitive, `0` or `*` provisional.
    pub fn parse(field: &str) -> Option<Self> {
        match field {
            "1" => Some(Marker::Definitive),
            "0" | "*" => Some(Marker::Provisional),
            _ => None,
        }
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Marker::Definitive => write!(f, "definitive"),
            Marker::Provisional => write!(f, "provisional"),
        }
    }
}

// ---------------------------------------------------------------------------
// Record – one monthly observation
// ---------------------------------------------------------------------------

/// One row of the monthly sunspot file.
///
/// Numeric columns are kept exactly as read; the accessors translate the
/// `-1` sentinel into `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub year: i32,
    /// Month of the year, 1–12.
    pub month: u8,
    /// Fractional year at the middle of the month, e.g. `1749.042`.
    pub date: f64,
    pub mean_number: f64,
    pub std_dev: f64,
    pub observation_count: i32,
    pub marker: Marker,
}

impl Record {
    /// Monthly mean sunspot number, `None` when the row carries the sentinel.
    pub fn mean(&self) -> Option<f64> {
        known(self.mean_number)
    }

    /// Standard deviation of the daily values, `None` when unknown.
    pub fn deviation(&self) -> Option<f64> {
        known(self.std_dev)
    }

    /// Number of observations behind the mean, `None` when unknown.
    pub fn observations(&self) -> Option<u32> {
        u32::try_from(self.observation_count).ok()
    }
}

fn known(value: f64) -> Option<f64> {
    (value.is_finite() && value != MISSING_SENTINEL).then_some(value)
}

// ---------------------------------------------------------------------------
// SunspotTable – the canonical, immutable table
// ---------------------------------------------------------------------------

/// The loaded time series, ordered by ascending `date`.
///
/// There is no way to mutate the records once the table is built; every
/// transform borrows them and allocates its own output.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SunspotTable {
    records: Vec<Record>,
}

impl SunspotTable {
    /// Build a table, checking that dates strictly ascend and years never
    /// decrease. Errors report the 1-based row of the offending record.
    pub fn from_records(records: Vec<Record>) -> Result<Self, DataError> {
        for (i, pair) in records.windows(2).enumerate() {
            let (prev, cur) = (&pair[0], &pair[1]);
            if cur.date <= prev.date || cur.year < prev.year {
                return Err(DataError::OutOfOrder {
                    row: i + 2,
                    date: cur.date,
                    previous_date: prev.date,
                    previous_year: prev.year,
                });
            }
        }
        Ok(SunspotTable { records })
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// First and last year of the table, `None` when empty.
    pub fn year_bounds(&self) -> Option<(i32, i32)> {
        Some((self.records.first()?.year, self.records.last()?.year))
    }

    /// Number of rows whose mean carries the missing sentinel.
    pub fn missing_count(&self) -> usize {
        self.records.iter().filter(|r| r.mean().is_none()).count()
    }
}

#[cfg(test)]
pub(crate) fn record(year: i32, month: u8, mean_number: f64) -> Record {
    Record {
        year,
        month,
        date: year as f64 + (month as f64 - 0.5) / 12.0,
        mean_number,
        std_dev: MISSING_SENTINEL,
        observation_count: -1,
        marker: Marker::Definitive,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel_values_read_as_none() {
        let r = record(1749, 1, MISSING_SENTINEL);
        assert_eq!(r.mean(), None);
        assert_eq!(r.deviation(), None);
        assert_eq!(r.observations(), None);

        let r = Record {
            std_dev: 4.5,
            observation_count: 28,
            ..record(1990, 6, 0.0)
        };
        assert_eq!(r.mean(), Some(0.0));
        assert_eq!(r.deviation(), Some(4.5));
        assert_eq!(r.observations(), Some(28));
    }

    #[test]
    fn marker_parsing() {
        assert_eq!(Marker::parse("1"), Some(Marker::Definitive));
        assert_eq!(Marker::parse("0"), Some(Marker::Provisional));
        assert_eq!(Marker::parse("*"), Some(Marker::Provisional));
        assert_eq!(Marker::parse("2"), None);
    }

    #[test]
    fn table_reports_bounds_and_missing() {
        let table = SunspotTable::from_records(vec![
            record(1749, 1, 96.7),
            record(1749, 2, MISSING_SENTINEL),
            record(1750, 1, 12.0),
        ])
        .unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.year_bounds(), Some((1749, 1750)));
        assert_eq!(table.missing_count(), 1);
        assert_eq!(SunspotTable::default().year_bounds(), None);
    }

    #[test]
    fn table_rejects_descending_dates() {
        let err = SunspotTable::from_records(vec![record(1750, 2, 1.0), record(1750, 1, 2.0)])
            .unwrap_err();
        match err {
            DataError::OutOfOrder { row, .. } => assert_eq!(row, 2),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn table_rejects_duplicate_dates() {
        let r = record(1750, 1, 1.0);
        assert!(SunspotTable::from_records(vec![r.clone(), r]).is_err());
    }
}

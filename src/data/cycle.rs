use std::fmt;
use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

use super::error::DataError;
use super::model::Record;

// ---------------------------------------------------------------------------
// Cycle period
// ---------------------------------------------------------------------------

/// Folding period in years. Always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct CyclePeriod(NonZeroU32);

impl CyclePeriod {
    pub fn new(years: i64) -> Result<Self, DataError> {
        u32::try_from(years)
            .ok()
            .and_then(NonZeroU32::new)
            .map(CyclePeriod)
            .ok_or(DataError::InvalidPeriod(years))
    }

    pub fn years(self) -> u32 {
        self.0.get()
    }
}

impl fmt::Display for CyclePeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} yr", self.0)
    }
}

// ---------------------------------------------------------------------------
// Missing-value policy
// ---------------------------------------------------------------------------

/// What folding does with records whose mean is missing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingPolicy {
    /// Keep the point with an undefined value; output size equals input size.
    #[default]
    Keep,
    /// Remove the record before folding.
    Drop,
}

impl fmt::Display for MissingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MissingPolicy::Keep => write!(f, "Keep missing"),
            MissingPolicy::Drop => write!(f, "Drop missing"),
        }
    }
}

// ---------------------------------------------------------------------------
// Folding
// ---------------------------------------------------------------------------

/// A record projected into phase space. Order carries no meaning.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FoldedPoint {
    /// `date mod period`, in `[0, period)`.
    pub phase: f64,
    pub mean_number: Option<f64>,
    /// Which repetition of the period the record falls in, `floor(date / period)`.
    pub cycle: i64,
}

/// Fold every record's date modulo `period`. Duplicate phases are kept.
pub fn fold(records: &[Record], period: CyclePeriod, missing: MissingPolicy) -> Vec<FoldedPoint> {
    let p = f64::from(period.years());
    let points: Vec<FoldedPoint> = records
        .iter()
        .filter(|r| missing == MissingPolicy::Keep || r.mean().is_some())
        .map(|r| FoldedPoint {
            phase: phase(r.date, p),
            mean_number: r.mean(),
            cycle: (r.date / p).floor() as i64,
        })
        .collect();

    if points.len() != records.len() {
        log::debug!(
            "Dropped {} records with missing means before folding",
            records.len() - points.len()
        );
    }
    points
}

fn phase(date: f64, period: f64) -> f64 {
    let phase = date.rem_euclid(period);
    // rem_euclid may round up to exactly `period` for tiny negative dates
    if phase >= period {
        0.0
    } else {
        phase
    }
}

use super::error::DataError;
use super::model::Record;

// ---------------------------------------------------------------------------
// Trailing moving average
// ---------------------------------------------------------------------------

/// Moving average aligned index-for-index with the records it was computed
/// from. `None` marks positions where no mean exists.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SmoothedSeries {
    values: Vec<Option<f64>>,
}

impl SmoothedSeries {
    pub fn values(&self) -> &[Option<f64>] {
        &self.values
    }

    /// Number of positions that carry a mean.
    pub fn defined_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_some()).count()
    }
}

/// Validate a caller-supplied window width.
pub fn smoothing_window(requested: i64) -> Result<usize, DataError> {
    usize::try_from(requested).map_err(|_| DataError::InvalidWindow(requested))
}

/// Trailing simple moving average of `mean_number` over `window` records.
///
/// Position `i` holds the mean of records `i + 1 - window ..= i` when all of
/// them exist and none is missing; otherwise it is `None`. A window of 0
/// has no mean anywhere, a window of 1 reproduces the input.
pub fn smooth(records: &[Record], window: usize) -> SmoothedSeries {
    let n = records.len();
    if window == 0 || window > n {
        return SmoothedSeries {
            values: vec![None; n],
        };
    }

    let mut values = vec![None; window - 1];
    values.extend(records.windows(window).map(window_mean));
    debug_assert_eq!(values.len(), n);
    SmoothedSeries { values }
}

fn window_mean(window: &[Record]) -> Option<f64> {
    let mut sum = 0.0;
    for r in window {
        sum += r.mean()?;
    }
    Some(sum / window.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{record, MISSING_SENTINEL};

    fn series(means: &[f64]) -> Vec<Record> {
        means
            .iter()
            .enumerate()
            .map(|(i, &m)| record(1749 + i as i32 / 12, (i % 12) as u8 + 1, m))
            .collect()
    }

    #[test]
    fn trailing_mean_of_two() {
        let view = series(&[20.0, 30.0]);
        assert_eq!(smooth(&view, 2).values(), &[None, Some(25.0)]);
    }

    #[test]
    fn window_of_three() {
        let view = series(&[3.0, 6.0, 9.0, 12.0, 0.0]);
        assert_eq!(
            smooth(&view, 3).values(),
            &[None, None, Some(6.0), Some(9.0), Some(7.0)]
        );
    }

    #[test]
    fn window_of_one_is_identity() {
        let means = [96.7, 104.3, 116.7, 92.8, 141.7, 139.2];
        let out = smooth(&series(&means), 1);
        let expected: Vec<Option<f64>> = means.iter().copied().map(Some).collect();
        assert_eq!(out.values(), expected.as_slice());
    }

    #[test]
    fn window_of_zero_is_all_undefined() {
        let out = smooth(&series(&[1.0, 2.0, 3.0]), 0);
        assert_eq!(out.values().len(), 3);
        assert_eq!(out.defined_count(), 0);
    }

    #[test]
    fn window_wider_than_view_is_all_undefined() {
        let out = smooth(&series(&[1.0, 2.0, 3.0]), 4);
        assert_eq!(out.values(), &[None, None, None]);
        assert!(smooth(&[], 3).values().is_empty());
    }

    #[test]
    fn missing_value_poisons_every_window_it_touches() {
        let view = series(&[1.0, 2.0, MISSING_SENTINEL, 4.0, 5.0, 6.0]);
        assert_eq!(
            smooth(&view, 2).values(),
            &[None, Some(1.5), None, None, Some(4.5), Some(5.5)]
        );
        assert_eq!(smooth(&view, 1).values()[2], None);
    }

    #[test]
    fn negative_window_is_rejected() {
        assert_eq!(smoothing_window(0).unwrap(), 0);
        assert_eq!(smoothing_window(24).unwrap(), 24);
        assert!(matches!(
            smoothing_window(-1),
            Err(DataError::InvalidWindow(-1))
        ));
    }
}

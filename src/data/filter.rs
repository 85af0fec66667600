use std::ops::Range;

use super::model::Record;

// ---------------------------------------------------------------------------
// Year-range selection
// ---------------------------------------------------------------------------

/// A contiguous, ordered slice of records whose years lie in a closed range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilteredView<'a> {
    records: &'a [Record],
    offset: usize,
}

impl<'a> FilteredView<'a> {
    pub fn records(&self) -> &'a [Record] {
        self.records
    }

    /// Position of the view inside the sequence it was filtered from.
    pub fn indices(&self) -> Range<usize> {
        self.offset..self.offset + self.records.len()
    }
}

/// Select the records with `year_min <= year <= year_max`.
///
/// `records` must have non-decreasing years, which every [`SunspotTable`]
/// guarantees, so the selection is a single contiguous run. An inverted
/// range selects nothing.
///
/// [`SunspotTable`]: super::model::SunspotTable
pub fn filter_years(records: &[Record], year_min: i32, year_max: i32) -> FilteredView<'_> {
    if year_min > year_max {
        log::debug!("Inverted year range {year_min}..={year_max}: empty selection");
        return FilteredView {
            records: &records[..0],
            offset: 0,
        };
    }
    let start = records.partition_point(|r| r.year < year_min);
    let end = records.partition_point(|r| r.year <= year_max);
    FilteredView {
        records: &records[start..end],
        offset: start,
    }
}

/// Clamp a requested range to the table's year extremes.
///
/// Each bound is clamped on its own, so an inverted request stays inverted.
pub fn clamp_range(bounds: (i32, i32), year_min: i32, year_max: i32) -> (i32, i32) {
    let (lo, hi) = bounds;
    (year_min.clamp(lo, hi), year_max.clamp(lo, hi))
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::data::model::record;

    fn years(view: &FilteredView<'_>) -> Vec<i32> {
        view.records().iter().map(|r| r.year).collect()
    }

    fn table() -> Vec<Record> {
        (1749..1760)
            .flat_map(|y| (1..=12).map(move |m| record(y, m, (y - 1749) as f64 * 12.0 + m as f64)))
            .collect()
    }

    #[test]
    fn inclusive_on_both_ends() {
        let t = vec![record(1749, 1, 10.0), record(1750, 1, 20.0), record(1751, 1, 30.0)];
        let view = filter_years(&t, 1750, 1751);
        assert_eq!(years(&view), vec![1750, 1751]);
        assert_eq!(view.indices(), 1..3);
    }

    #[test]
    fn whole_years_are_selected() {
        let t = table();
        let view = filter_years(&t, 1751, 1752);
        assert_eq!(view.records().len(), 24);
        assert_eq!(view.records()[0].month, 1);
        assert_eq!(view.records()[23].month, 12);
    }

    #[test]
    fn inverted_range_is_empty() {
        let t = table();
        let view = filter_years(&t, 1755, 1750);
        assert!(view.records().is_empty());
        assert_eq!(view.indices().len(), 0);
    }

    #[test]
    fn out_of_bounds_range_selects_what_exists() {
        let t = table();
        assert_eq!(filter_years(&t, 1000, 3000).records().len(), t.len());
        assert!(filter_years(&t, 1900, 2000).records().is_empty());
    }

    #[test]
    fn clamp_range_to_bounds() {
        assert_eq!(clamp_range((1749, 2024), 1700, 2100), (1749, 2024));
        assert_eq!(clamp_range((1749, 2024), 1800, 1900), (1800, 1900));
        assert_eq!(clamp_range((1749, 2024), 1900, 1800), (1900, 1800));
    }

    proptest! {
        #[test]
        fn selection_is_contiguous_and_in_range(a in 1740i32..1770, b in 1740i32..1770) {
            let t = table();
            let (lo, hi) = (a.min(b), a.max(b));
            let view = filter_years(&t, lo, hi);

            prop_assert!(view.records().iter().all(|r| lo <= r.year && r.year <= hi));
            prop_assert_eq!(view.records(), &t[view.indices()]);
            let expected = t.iter().filter(|r| lo <= r.year && r.year <= hi).count();
            prop_assert_eq!(view.records().len(), expected);
        }

        #[test]
        fn filtering_is_idempotent(a in 1740i32..1770, b in 1740i32..1770) {
            let t = table();
            let once = filter_years(&t, a, b);
            let twice = filter_years(once.records(), a, b);
            prop_assert_eq!(once.records(), twice.records());
        }
    }
}

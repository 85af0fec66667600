use std::ops::Range;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};

use crate::config::ViewerConfig;
use crate::data::cycle::{fold, CyclePeriod, FoldedPoint, MissingPolicy};
use crate::data::error::DataError;
use crate::data::filter::{clamp_range, filter_years};
use crate::data::images::ImageCatalog;
use crate::data::model::{Record, SunspotTable};
use crate::data::smoothing::{smooth, smoothing_window, SmoothedSeries};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
///
/// The loaded table is never modified; the derived views below are rebuilt
/// from it whenever a control changes.
pub struct AppState {
    /// Loaded table (None until a file is loaded).
    pub dataset: Option<SunspotTable>,

    /// File the table was read from.
    pub source: Option<PathBuf>,

    /// Selected `(from, to)` years.
    pub year_range: (i32, i32),

    /// Range from the configuration; each newly loaded table starts from it.
    initial_range: (i32, i32),

    /// Moving-average width in months.
    pub window: usize,

    pub period: CyclePeriod,
    pub fold_missing: MissingPolicy,
    pub fold_selection_only: bool,

    /// Image filter names and their URLs.
    pub images: ImageCatalog,
    pub image_label: String,
    /// When the displayed image was last requested.
    pub image_requested: Instant,

    /// Rows of `dataset` inside `year_range` (cached).
    pub visible: Range<usize>,

    /// Moving average over the visible rows (cached).
    pub smoothed: SmoothedSeries,

    /// Cycle-folded scatter (cached).
    pub folded: Vec<FoldedPoint>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Whether a file loading operation is in progress.
    pub loading: bool,
}

impl AppState {
    /// Build the initial state from a validated configuration.
    pub fn new(config: &ViewerConfig, images: ImageCatalog) -> Result<Self> {
        let window = smoothing_window(config.smoothing_window).context("smoothing_window")?;
        let period = CyclePeriod::new(config.cycle_period).context("cycle_period")?;
        images
            .resolve(&config.image_label)
            .context("image_label")?;

        Ok(Self {
            dataset: None,
            source: None,
            year_range: (config.year_range[0], config.year_range[1]),
            initial_range: (config.year_range[0], config.year_range[1]),
            window,
            period,
            fold_missing: config.fold_missing,
            fold_selection_only: config.fold_selection_only,
            images,
            image_label: config.image_label.clone(),
            image_requested: Instant::now(),
            visible: 0..0,
            smoothed: SmoothedSeries::default(),
            folded: Vec::new(),
            status_message: None,
            loading: false,
        })
    }

    /// Ingest a newly loaded table and rebuild every view.
    ///
    /// The selection restarts from the configured range, clamped to the new
    /// table, so a previous file's selection never narrows the next one.
    pub fn set_dataset(&mut self, dataset: SunspotTable, source: Option<PathBuf>) {
        let (from, to) = self.initial_range;
        if let Some(bounds) = dataset.year_bounds() {
            self.year_range = clamp_range(bounds, from, to);
        }
        self.dataset = Some(dataset);
        self.source = source;
        self.status_message = None;
        self.loading = false;
        self.refresh_views();
    }

    /// Recompute the filtered, smoothed and folded views.
    pub fn refresh_views(&mut self) {
        let Some(table) = &self.dataset else {
            return;
        };
        let view = filter_years(table.records(), self.year_range.0, self.year_range.1);
        let fold_source = if self.fold_selection_only {
            view.records()
        } else {
            table.records()
        };

        self.folded = fold(fold_source, self.period, self.fold_missing);
        self.smoothed = smooth(view.records(), self.window);
        self.visible = view.indices();
        log::debug!(
            "Views rebuilt: {} rows visible, {} smoothed values, {} folded points",
            self.visible.len(),
            self.smoothed.defined_count(),
            self.folded.len()
        );
    }

    /// Rows inside the selected year range.
    pub fn visible_records(&self) -> &[Record] {
        match &self.dataset {
            Some(ds) => &ds.records()[self.visible.clone()],
            None => &[],
        }
    }

    pub fn year_bounds(&self) -> Option<(i32, i32)> {
        self.dataset.as_ref().and_then(SunspotTable::year_bounds)
    }

    /// Select years, clamping each bound to the loaded data.
    pub fn set_year_range(&mut self, year_min: i32, year_max: i32) {
        self.year_range = match self.year_bounds() {
            Some(bounds) => clamp_range(bounds, year_min, year_max),
            None => (year_min, year_max),
        };
        self.refresh_views();
    }

    pub fn set_window(&mut self, requested: i64) -> Result<(), DataError> {
        self.window = smoothing_window(requested)?;
        self.refresh_views();
        Ok(())
    }

    pub fn set_period(&mut self, years: i64) -> Result<(), DataError> {
        self.period = CyclePeriod::new(years)?;
        self.refresh_views();
        Ok(())
    }

    pub fn set_fold_missing(&mut self, policy: MissingPolicy) {
        self.fold_missing = policy;
        self.refresh_views();
    }

    pub fn set_fold_selection_only(&mut self, selection_only: bool) {
        self.fold_selection_only = selection_only;
        self.refresh_views();
    }

    /// Switch the displayed image. Unknown labels leave the selection unchanged.
    pub fn select_image(&mut self, label: &str) -> Result<(), DataError> {
        self.images.resolve(label)?;
        self.image_label = label.to_string();
        self.image_requested = Instant::now();
        Ok(())
    }

    pub fn image_url(&self) -> Result<&str, DataError> {
        self.images.resolve(&self.image_label)
    }

    /// Text reporting the current year selection.
    pub fn range_message(&self) -> String {
        format!(
            "You have selected {} to {}",
            self.year_range.0, self.year_range.1
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{record, MISSING_SENTINEL};

    fn span(first: i32, last: i32) -> SunspotTable {
        let records = (first..=last)
            .flat_map(|y| (1..=12).map(move |m| record(y, m, f64::from(y - first))))
            .collect();
        SunspotTable::from_records(records).unwrap()
    }

    fn table() -> SunspotTable {
        span(1749, 1760)
    }

    fn state() -> AppState {
        let mut state =
            AppState::new(&ViewerConfig::default(), ImageCatalog::builtin().unwrap()).unwrap();
        state.set_dataset(table(), None);
        state
    }

    #[test]
    fn default_range_is_clamped_to_data() {
        let state = state();
        assert_eq!(state.year_range, (1749, 1760));
        assert_eq!(state.visible_records().len(), 12 * 12);
        assert_eq!(state.range_message(), "You have selected 1749 to 1760");
    }

    #[test]
    fn reloading_a_different_span_selects_the_new_years() {
        let mut state = state();
        state.set_year_range(1752, 1755);
        state.set_dataset(span(1900, 2000), None);
        assert_eq!(state.year_range, (1900, 2000));
        assert_eq!(state.visible_records().len(), 101 * 12);

        state.set_dataset(table(), None);
        assert_eq!(state.year_range, (1749, 1760));
        assert_eq!(state.visible_records().len(), 12 * 12);
    }

    #[test]
    fn configured_range_applies_to_each_load() {
        let config = ViewerConfig {
            year_range: [1950, 1960],
            ..ViewerConfig::default()
        };
        let mut state = AppState::new(&config, ImageCatalog::builtin().unwrap()).unwrap();
        state.set_dataset(table(), None);
        assert_eq!(state.year_range, (1760, 1760));
        state.set_dataset(span(1900, 2000), None);
        assert_eq!(state.year_range, (1950, 1960));
    }

    #[test]
    fn changing_controls_rebuilds_views() {
        let mut state = state();
        state.set_year_range(1750, 1751);
        assert_eq!(state.visible_records().len(), 24);
        assert_eq!(state.smoothed.values().len(), 24);
        assert_eq!(state.folded.len(), 12 * 12);

        state.set_fold_selection_only(true);
        assert_eq!(state.folded.len(), 24);

        state.set_window(3).unwrap();
        assert_eq!(state.smoothed.defined_count(), 22);
        state.set_window(0).unwrap();
        assert_eq!(state.smoothed.defined_count(), 0);
    }

    #[test]
    fn invalid_parameters_keep_previous_values() {
        let mut state = state();
        assert!(matches!(state.set_window(-2), Err(DataError::InvalidWindow(-2))));
        assert_eq!(state.window, 1);
        assert!(matches!(state.set_period(0), Err(DataError::InvalidPeriod(0))));
        assert_eq!(state.period.years(), 11);
    }

    #[test]
    fn inverted_range_shows_nothing() {
        let mut state = state();
        state.set_year_range(1758, 1752);
        assert!(state.visible_records().is_empty());
        assert!(state.smoothed.values().is_empty());
    }

    #[test]
    fn drop_policy_removes_missing_points() {
        let mut records: Vec<Record> = table().records().to_vec();
        records[5].mean_number = MISSING_SENTINEL;
        let mut state = state();
        state.set_dataset(SunspotTable::from_records(records).unwrap(), None);
        assert_eq!(state.folded.len(), 144);
        state.set_fold_missing(MissingPolicy::Drop);
        assert_eq!(state.folded.len(), 143);
    }

    #[test]
    fn image_selection() {
        let mut state = state();
        assert!(state.image_url().unwrap().contains("hmi_igr"));
        state.select_image("LASCO C2").unwrap();
        assert!(state.image_url().unwrap().contains("/c2/"));
        assert!(state.select_image("nonexistent").is_err());
        assert_eq!(state.image_label, "LASCO C2");
    }

    #[test]
    fn rejects_invalid_configuration() {
        let images = ImageCatalog::builtin().unwrap();
        let config = ViewerConfig {
            cycle_period: 0,
            ..ViewerConfig::default()
        };
        assert!(AppState::new(&config, images.clone()).is_err());
        let config = ViewerConfig {
            image_label: "EIT 999".into(),
            ..ViewerConfig::default()
        };
        assert!(AppState::new(&config, images).is_err());
    }
}

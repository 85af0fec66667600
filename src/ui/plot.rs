use std::collections::BTreeMap;

use eframe::egui::Ui;
use egui_plot::{Legend, Line, Plot, PlotPoints, Points};

use crate::color::{CyclePalette, MONTHLY_COLOR, SMOOTHED_COLOR};
use crate::data::cycle::FoldedPoint;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Monthly + smoothed time series
// ---------------------------------------------------------------------------

/// Render the monthly means of the selected years with the smoothed line on top.
pub fn series_plot(ui: &mut Ui, state: &AppState, height: f32) {
    let records = state.visible_records();

    let monthly = defined_runs(records.iter().map(|r| (r.date, r.mean())));
    let smoothed = defined_runs(
        records
            .iter()
            .zip(state.smoothed.values())
            .map(|(r, v)| (r.date, *v)),
    );

    ui.strong("Sunspot monthly mean and smoothed line");
    Plot::new("series_plot")
        .legend(Legend::default())
        .height(height)
        .x_axis_label("Time(years)")
        .y_axis_label("Sunspot mean")
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for run in monthly {
                plot_ui.line(
                    Line::new(PlotPoints::from(run))
                        .name("monthly")
                        .color(MONTHLY_COLOR)
                        .width(1.0),
                );
            }
            for run in smoothed {
                plot_ui.line(
                    Line::new(PlotPoints::from(run))
                        .name("smoothed")
                        .color(SMOOTHED_COLOR)
                        .width(2.0),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// Cycle-folded scatter
// ---------------------------------------------------------------------------

/// Render the folded points, one colour per cycle.
pub fn cycle_plot(ui: &mut Ui, state: &AppState, height: f32) {
    let palette = CyclePalette::default();
    let by_cycle = group_by_cycle(&state.folded);

    ui.strong(format!("Sunspot Variation ({} cycle)", state.period));
    Plot::new("cycle_plot")
        .height(height)
        .x_axis_label("Years")
        .y_axis_label("# of Sunspot")
        .include_x(0.0)
        .include_x(f64::from(state.period.years()))
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for (cycle, points) in by_cycle {
                plot_ui.points(
                    Points::new(PlotPoints::from(points))
                        .radius(1.5)
                        .color(palette.color_for(cycle)),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Split `(x, y)` samples into runs of consecutive defined values, so lines
/// break at undefined entries instead of bridging them.
pub fn defined_runs(samples: impl Iterator<Item = (f64, Option<f64>)>) -> Vec<Vec<[f64; 2]>> {
    let mut runs = Vec::new();
    let mut current = Vec::new();
    for (x, y) in samples {
        match y {
            Some(y) => current.push([x, y]),
            None if !current.is_empty() => runs.push(std::mem::take(&mut current)),
            None => {}
        }
    }
    if !current.is_empty() {
        runs.push(current);
    }
    runs
}

/// Plot coordinates of the defined folded points, keyed by cycle index.
pub fn group_by_cycle(points: &[FoldedPoint]) -> BTreeMap<i64, Vec<[f64; 2]>> {
    let mut groups: BTreeMap<i64, Vec<[f64; 2]>> = BTreeMap::new();
    for p in points {
        if let Some(y) = p.mean_number {
            groups.entry(p.cycle).or_default().push([p.phase, y]);
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runs_break_at_undefined_values() {
        let samples = vec![
            (1.0, None),
            (2.0, Some(20.0)),
            (3.0, Some(30.0)),
            (4.0, None),
            (5.0, Some(50.0)),
        ];
        let runs = defined_runs(samples.into_iter());
        assert_eq!(runs, vec![vec![[2.0, 20.0], [3.0, 30.0]], vec![[5.0, 50.0]]]);
    }

    #[test]
    fn all_undefined_gives_no_runs() {
        assert!(defined_runs(vec![(1.0, None), (2.0, None)].into_iter()).is_empty());
    }

    #[test]
    fn cycles_group_and_skip_missing() {
        let points = [
            FoldedPoint { phase: 0.5, mean_number: Some(1.0), cycle: 159 },
            FoldedPoint { phase: 1.5, mean_number: None, cycle: 159 },
            FoldedPoint { phase: 0.5, mean_number: Some(2.0), cycle: 160 },
        ];
        let groups = group_by_cycle(&points);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[&159], vec![[0.5, 1.0]]);
        assert_eq!(groups[&160], vec![[0.5, 2.0]]);
    }
}

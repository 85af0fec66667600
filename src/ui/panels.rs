use std::time::Duration;

use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::cycle::MissingPolicy;
use crate::data::error::DataError;
use crate::data::loader::load_file;
use crate::data::model::Record;
use crate::state::AppState;

/// Slider limits of the interactive controls.
const MAX_WINDOW: usize = 24;
const MAX_PERIOD: u32 = 20;

// ---------------------------------------------------------------------------
// Left side panel – view controls
// ---------------------------------------------------------------------------

/// Render the left control panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Controls");
    ui.separator();

    let Some((first, last)) = state.year_bounds() else {
        ui.label("No dataset loaded.");
        return;
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Year range ----
            ui.strong("Select Year Range:");
            let (mut from, mut to) = state.year_range;
            let from_changed = ui
                .add(egui::Slider::new(&mut from, first..=last).text("from"))
                .changed();
            let to_changed = ui
                .add(egui::Slider::new(&mut to, first..=last).text("to"))
                .changed();
            if from_changed || to_changed {
                state.set_year_range(from, to);
            }
            ui.label(RichText::new(state.range_message()).strong());
            match state.visible_records().last() {
                Some(latest) => {
                    ui.small(record_summary(latest));
                }
                None => {
                    ui.label(RichText::new("No months in the selected range.").color(Color32::YELLOW));
                }
            }
            ui.separator();

            // ---- Smoothing ----
            ui.strong("Observation periods for the smoothing line:");
            let mut window = state.window;
            if ui
                .add(egui::Slider::new(&mut window, 0..=MAX_WINDOW).text("months"))
                .changed()
            {
                apply(state, |s| s.set_window(window as i64));
            }
            if state.window == 0 {
                ui.small("A window of 0 months has no mean.");
            }
            ui.separator();

            // ---- Cycle folding ----
            ui.strong("Select cycle period:");
            let mut years = state.period.years();
            if ui
                .add(egui::Slider::new(&mut years, 1..=MAX_PERIOD).text("years"))
                .changed()
            {
                apply(state, |s| s.set_period(i64::from(years)));
            }

            let current = state.fold_missing;
            egui::ComboBox::from_id_salt("fold_missing")
                .selected_text(current.to_string())
                .show_ui(ui, |ui: &mut Ui| {
                    for policy in [MissingPolicy::Keep, MissingPolicy::Drop] {
                        if ui
                            .selectable_label(current == policy, policy.to_string())
                            .clicked()
                        {
                            state.set_fold_missing(policy);
                        }
                    }
                });

            let mut selection_only = state.fold_selection_only;
            if ui
                .checkbox(&mut selection_only, "Fold selected years only")
                .changed()
            {
                state.set_fold_selection_only(selection_only);
            }
            ui.label(format!("{} points folded", state.folded.len()));
        });
}

/// One-line description of a month, e.g. `2024-05: 171.7 ± 27.5 (1234 obs, provisional)`.
fn record_summary(r: &Record) -> String {
    let mean = r
        .mean()
        .map_or_else(|| "missing".to_string(), |m| format!("{m:.1}"));
    let spread = r
        .deviation()
        .map(|sd| format!(" ± {sd:.1}"))
        .unwrap_or_default();
    let obs = r
        .observations()
        .map(|n| format!("{n} obs, "))
        .unwrap_or_default();
    format!("{}-{:02}: {mean}{spread} ({obs}{})", r.year, r.month, r.marker)
}

/// "Last updated ..." text for an image requested `elapsed` ago.
fn age_label(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    match secs {
        0..=59 => format!("Last updated {secs}s ago"),
        60..=3599 => format!("Last updated {}m {}s ago", secs / 60, secs % 60),
        _ => format!("Last updated {}h {}m ago", secs / 3600, (secs % 3600) / 60),
    }
}

/// Run a fallible state change and surface its error in the status line.
fn apply(state: &mut AppState, change: impl FnOnce(&mut AppState) -> Result<(), DataError>) {
    match change(state) {
        Ok(()) => state.status_message = None,
        Err(e) => {
            log::warn!("Rejected control value: {e}");
            state.status_message = Some(format!("Error: {e}"));
        }
    }
}

// ---------------------------------------------------------------------------
// Right side panel – real-time image
// ---------------------------------------------------------------------------

/// Render the real-time solar image selector and viewer.
pub fn image_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Real time image of the sun");
    ui.separator();

    let labels: Vec<String> = state.images.labels().map(str::to_string).collect();
    let current = state.image_label.clone();
    egui::ComboBox::from_id_salt("image_filter")
        .selected_text(&current)
        .show_ui(ui, |ui: &mut Ui| {
            for label in &labels {
                if ui.selectable_label(current == *label, label).clicked() {
                    apply(state, |s| s.select_image(label));
                }
            }
        });

    let url = match state.image_url() {
        Ok(url) => url.to_string(),
        Err(e) => {
            ui.label(RichText::new(e.to_string()).color(Color32::RED));
            return;
        }
    };

    if ui.button("Refresh real time image").clicked() {
        ui.ctx().forget_image(&url);
        state.image_requested = std::time::Instant::now();
        log::info!("Refreshing {url}");
    }
    ui.small(age_label(state.image_requested.elapsed()));
    ui.ctx().request_repaint_after(Duration::from_secs(1));

    ui.add(
        egui::Image::from_uri(url.clone())
            .max_width(ui.available_width())
            .maintain_aspect_ratio(true),
    );
    ui.hyperlink_to("Open in browser", &url);
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if state.loading {
            ui.spinner();
        }
        if let Some(ds) = &state.dataset {
            let missing = ds.missing_count();
            ui.label(format!(
                "{} months loaded, {} visible{}",
                ds.len(),
                state.visible.len(),
                if missing > 0 {
                    format!(", {missing} missing")
                } else {
                    String::new()
                }
            ));
        }
        if let Some(path) = &state.source {
            ui.separator();
            ui.label(path.display().to_string());
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open monthly sunspot data")
        .add_filter("Sunspot files", &["csv", "txt"])
        .pick_file();

    if let Some(path) = file {
        state.loading = true;
        match load_file(&path) {
            Ok(dataset) => {
                state.set_dataset(dataset, Some(path));
            }
            Err(e) => {
                log::error!("Failed to load file: {e}");
                state.status_message = Some(format!("Error: {e}"));
                state.loading = false;
            }
        }
    }
}

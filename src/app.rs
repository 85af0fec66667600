use eframe::egui;

use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct SunspotApp {
    pub state: AppState,
}

impl SunspotApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for SunspotApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: controls ----
        egui::SidePanel::left("control_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Right side panel: real-time image ----
        egui::SidePanel::right("image_panel")
            .default_width(320.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::image_panel(ui, &mut self.state);
            });

        // ---- Central panel: series on top, folded scatter below ----
        egui::CentralPanel::default().show(ctx, |ui| {
            if self.state.dataset.is_none() {
                ui.centered_and_justified(|ui| {
                    ui.heading("Open a sunspot file to start  (File → Open…)");
                });
                return;
            }
            let height = (ui.available_height() / 2.0 - 30.0).max(120.0);
            plot::series_plot(ui, &self.state, height);
            ui.separator();
            plot::cycle_plot(ui, &self.state, height);
        });
    }
}
